use crate::util::error::GeoshiftError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A single `[longitude, latitude]` pair.
pub type Position = [f64; 2];

/// An ordered run of positions: a line, a ring, or a set of points.
pub type Ring = Vec<Position>;

/// The rings of one polygon, or the lines of a multi-line.
pub type Rings = Vec<Ring>;

/// Coordinates normalized to four levels: groups of rings of positions of ordinates.
pub type Coords = Vec<Rings>;

/// The six supported geometry kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryType {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
}

impl GeometryType {
    /// Every type, in declaration order.
    pub const ALL: [GeometryType; 6] = [
        GeometryType::Point,
        GeometryType::LineString,
        GeometryType::Polygon,
        GeometryType::MultiPoint,
        GeometryType::MultiLineString,
        GeometryType::MultiPolygon,
    ];

    /// Canonical mixed-case name, as used by GeoJSON.
    pub fn as_str(self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::MultiPolygon => "MultiPolygon",
        }
    }

    /// Upper-case WKT keyword.
    pub fn wkt_keyword(self) -> &'static str {
        match self {
            GeometryType::Point => "POINT",
            GeometryType::LineString => "LINESTRING",
            GeometryType::Polygon => "POLYGON",
            GeometryType::MultiPoint => "MULTIPOINT",
            GeometryType::MultiLineString => "MULTILINESTRING",
            GeometryType::MultiPolygon => "MULTIPOLYGON",
        }
    }

    /// Array nesting depth of this type's GeoJSON `coordinates`.
    ///
    /// Point is 1 (`[x, y]`), LineString and MultiPoint 2, Polygon and
    /// MultiLineString 3, MultiPolygon 4.
    pub fn nesting_depth(self) -> usize {
        match self {
            GeometryType::Point => 1,
            GeometryType::LineString | GeometryType::MultiPoint => 2,
            GeometryType::Polygon | GeometryType::MultiLineString => 3,
            GeometryType::MultiPolygon => 4,
        }
    }
}

impl FromStr for GeometryType {
    type Err = GeoshiftError;

    /// Parses a type name case-insensitively (`POINT`, `Point`, `point`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeometryType::ALL
            .into_iter()
            .find(|t| t.wkt_keyword().eq_ignore_ascii_case(s))
            .ok_or_else(|| GeoshiftError::UnknownGeometryType(s.to_string()))
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vector geometry with its coordinates normalized to four levels of nesting.
///
/// Shallower types leave the outer levels as single-element vectors:
///
/// | type                          | groups | rings per group | positions per ring |
/// |-------------------------------|--------|-----------------|--------------------|
/// | `Point`                       | 1      | 1               | 1                  |
/// | `LineString`, `MultiPoint`    | 1      | 1               | ≥ 1                |
/// | `Polygon`, `MultiLineString`  | 1      | ≥ 1             | ≥ 1                |
/// | `MultiPolygon`                | ≥ 1    | ≥ 1             | ≥ 1                |
///
/// An empty geometry has no groups at all.
///
/// # Example
///
/// ```
/// use geoshift::{Geometry, GeometryType};
///
/// # fn main() -> Result<(), geoshift::GeoshiftError> {
/// let geom = Geometry::from_wkt("POINT (1 2)")?;
/// assert_eq!(geom.geometry_type, GeometryType::Point);
/// assert_eq!(geom.coords, vec![vec![vec![[1.0, 2.0]]]]);
/// assert_eq!(geom.to_wkt(), "POINT (1 2)");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    /// What kind of geometry the coordinates describe
    pub geometry_type: GeometryType,
    /// Normalized coordinates, see the type-level table
    pub coords: Coords,
}

impl Geometry {
    /// Creates a geometry, checking that `coords` has the shape `geometry_type` requires.
    pub fn new(geometry_type: GeometryType, coords: Coords) -> Result<Self, GeoshiftError> {
        validate_shape(geometry_type, &coords)?;
        Ok(Self {
            geometry_type,
            coords,
        })
    }

    /// Creates a geometry with no positions.
    pub fn empty(geometry_type: GeometryType) -> Self {
        Self {
            geometry_type,
            coords: Vec::new(),
        }
    }

    /// Creates a `Point`; every pair of ordinates is a valid point.
    pub fn point(x: f64, y: f64) -> Self {
        Self {
            geometry_type: GeometryType::Point,
            coords: vec![vec![vec![[x, y]]]],
        }
    }

    /// Creates a `LineString` from at least one position.
    pub fn line_string(positions: Ring) -> Result<Self, GeoshiftError> {
        Self::new(GeometryType::LineString, vec![vec![positions]])
    }

    /// Creates a `MultiPoint` from at least one position.
    pub fn multi_point(positions: Ring) -> Result<Self, GeoshiftError> {
        Self::new(GeometryType::MultiPoint, vec![vec![positions]])
    }

    /// Creates a `Polygon`: the exterior ring first, then any holes.
    pub fn polygon(rings: Rings) -> Result<Self, GeoshiftError> {
        Self::new(GeometryType::Polygon, vec![rings])
    }

    /// Creates a `MultiLineString` with one entry per line.
    pub fn multi_line_string(lines: Rings) -> Result<Self, GeoshiftError> {
        Self::new(GeometryType::MultiLineString, vec![lines])
    }

    /// Creates a `MultiPolygon` with one group of rings per polygon.
    pub fn multi_polygon(polygons: Coords) -> Result<Self, GeoshiftError> {
        Self::new(GeometryType::MultiPolygon, polygons)
    }

    /// Returns `true` if the geometry holds no positions.
    pub fn is_empty(&self) -> bool {
        self.points().next().is_none()
    }

    /// Number of positions across all rings.
    pub fn num_points(&self) -> usize {
        self.coords.iter().flatten().map(Vec::len).sum()
    }

    /// Iterates over every ring (or line, or point run) in order.
    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        self.coords.iter().flatten()
    }

    /// Iterates over every position in order.
    pub fn points(&self) -> impl Iterator<Item = &Position> {
        self.coords.iter().flatten().flatten()
    }

    /// Iterates mutably over every position in order.
    pub fn points_mut(&mut self) -> impl Iterator<Item = &mut Position> {
        self.coords.iter_mut().flatten().flatten()
    }

    /// Decodes coordinates nested `depth` levels deep (1 = a bare position)
    /// into the normalized four-level form.
    pub(crate) fn coords_at_depth(depth: usize, value: Value) -> serde_json::Result<Coords> {
        Ok(match depth {
            1 => vec![vec![vec![serde_json::from_value::<Position>(value)?]]],
            2 => vec![vec![serde_json::from_value::<Ring>(value)?]],
            3 => vec![serde_json::from_value::<Rings>(value)?],
            _ => serde_json::from_value::<Coords>(value)?,
        })
    }
}

fn validate_shape(geometry_type: GeometryType, coords: &Coords) -> Result<(), GeoshiftError> {
    if coords.is_empty() {
        return Ok(());
    }
    let invalid = |msg: &str| {
        Err(GeoshiftError::InvalidGeometry(format!(
            "{}: {}",
            geometry_type, msg
        )))
    };

    if coords.iter().any(Vec::is_empty) {
        return invalid("group without rings");
    }
    if coords.iter().flatten().any(Vec::is_empty) {
        return invalid("ring without positions");
    }

    let single_group = coords.len() == 1;
    let single_ring = single_group && coords[0].len() == 1;
    match geometry_type {
        GeometryType::Point if !(single_ring && coords[0][0].len() == 1) => {
            invalid("expected exactly one position")
        }
        GeometryType::LineString | GeometryType::MultiPoint if !single_ring => {
            invalid("expected a single run of positions")
        }
        GeometryType::Polygon | GeometryType::MultiLineString if !single_group => {
            invalid("expected a single group of rings")
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names_are_case_insensitive() -> Result<(), GeoshiftError> {
        assert_eq!("MULTIPOLYGON".parse::<GeometryType>()?, GeometryType::MultiPolygon);
        assert_eq!("MultiPolygon".parse::<GeometryType>()?, GeometryType::MultiPolygon);
        assert_eq!("linestring".parse::<GeometryType>()?, GeometryType::LineString);
        assert!(matches!(
            "CIRCLE".parse::<GeometryType>(),
            Err(GeoshiftError::UnknownGeometryType(_))
        ));
        Ok(())
    }

    #[test]
    fn test_type_canonical_names() {
        assert_eq!(GeometryType::MultiLineString.to_string(), "MultiLineString");
        assert_eq!(GeometryType::MultiLineString.wkt_keyword(), "MULTILINESTRING");
    }

    #[test]
    fn test_nesting_depths() {
        let depths: Vec<usize> = GeometryType::ALL.iter().map(|t| t.nesting_depth()).collect();
        assert_eq!(depths, vec![1, 2, 3, 2, 3, 4]);
    }

    #[test]
    fn test_point_constructor_shape() {
        let pt = Geometry::point(1.0, 2.0);
        assert_eq!(pt.coords, vec![vec![vec![[1.0, 2.0]]]]);
        assert_eq!(pt.num_points(), 1);
        assert!(!pt.is_empty());
    }

    #[test]
    fn test_new_rejects_wrong_shapes() {
        let two_points = vec![vec![vec![[0.0, 0.0], [1.0, 1.0]]]];
        assert!(matches!(
            Geometry::new(GeometryType::Point, two_points.clone()),
            Err(GeoshiftError::InvalidGeometry(_))
        ));
        assert!(Geometry::new(GeometryType::LineString, two_points).is_ok());

        let two_groups = vec![vec![vec![[0.0, 0.0]]], vec![vec![[1.0, 1.0]]]];
        assert!(Geometry::new(GeometryType::Polygon, two_groups.clone()).is_err());
        assert!(Geometry::new(GeometryType::MultiPolygon, two_groups).is_ok());

        assert!(Geometry::line_string(vec![]).is_err());
        assert!(Geometry::polygon(vec![vec![]]).is_err());
    }

    #[test]
    fn test_empty_geometry() {
        let empty = Geometry::empty(GeometryType::Polygon);
        assert!(empty.is_empty());
        assert_eq!(empty.num_points(), 0);
        assert!(Geometry::new(GeometryType::Point, vec![]).is_ok());
    }

    #[test]
    fn test_iterators_walk_all_levels() -> Result<(), GeoshiftError> {
        let mut geom = Geometry::multi_polygon(vec![
            vec![vec![[0.0, 0.0], [1.0, 0.0], [0.0, 0.0]]],
            vec![vec![[5.0, 5.0], [6.0, 5.0], [5.0, 5.0]], vec![[5.5, 5.2]]],
        ])?;
        assert_eq!(geom.rings().count(), 3);
        assert_eq!(geom.points().count(), 7);

        for p in geom.points_mut() {
            p[0] += 1.0;
        }
        assert_eq!(geom.coords[1][1][0], [6.5, 5.2]);
        Ok(())
    }
}
