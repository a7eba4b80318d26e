//! Interop with `geo-types` and `geojson`.

use crate::geom::geometry::{Geometry, GeometryType, Position, Ring, Rings};
use crate::util::error::GeoshiftError;
use geo_types::{Coord, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};

fn line(ring: &Ring) -> LineString<f64> {
    ring.iter().map(|&[x, y]| Coord { x, y }).collect()
}

fn polygon(rings: &Rings) -> Polygon<f64> {
    let mut iter = rings.iter();
    let exterior = iter.next().map(line).unwrap_or_else(|| LineString::new(Vec::new()));
    Polygon::new(exterior, iter.map(line).collect())
}

fn positions(ls: &LineString<f64>) -> Ring {
    ls.coords().map(|c| [c.x, c.y]).collect()
}

fn polygon_rings(p: &Polygon<f64>) -> Rings {
    std::iter::once(p.exterior())
        .chain(p.interiors())
        .map(positions)
        .collect()
}

/// Converts to the `geo-types` geometry of the same kind.
///
/// `geo-types` has no empty point, so an empty `Point` becomes an empty
/// `MultiPoint`. Polygon rings are closed by `geo-types` if they are not already.
impl From<&Geometry> for geo_types::Geometry<f64> {
    fn from(geom: &Geometry) -> Self {
        let first_ring = || geom.rings().next().cloned().unwrap_or_default();
        match geom.geometry_type {
            GeometryType::Point => match geom.points().next() {
                Some(&[x, y]) => Point::new(x, y).into(),
                None => MultiPoint::<f64>::new(Vec::new()).into(),
            },
            GeometryType::LineString => line(&first_ring()).into(),
            GeometryType::MultiPoint => first_ring()
                .into_iter()
                .map(Point::from)
                .collect::<MultiPoint<f64>>()
                .into(),
            GeometryType::Polygon => match geom.coords.first() {
                Some(rings) => polygon(rings).into(),
                None => polygon(&Vec::new()).into(),
            },
            GeometryType::MultiLineString => {
                let lines = geom.rings().map(line).collect();
                MultiLineString::new(lines).into()
            }
            GeometryType::MultiPolygon => {
                let polygons = geom.coords.iter().map(polygon).collect();
                MultiPolygon::new(polygons).into()
            }
        }
    }
}

impl From<Geometry> for geo_types::Geometry<f64> {
    fn from(geom: Geometry) -> Self {
        (&geom).into()
    }
}

/// Converts from `geo-types`.
///
/// `Line` becomes a two-point `LineString`; `Rect` and `Triangle` become a
/// `Polygon`. A `GeometryCollection` has no counterpart and is rejected with
/// [`GeoshiftError::UnsupportedGeometryOperation`].
impl TryFrom<geo_types::Geometry<f64>> for Geometry {
    type Error = GeoshiftError;

    fn try_from(geom: geo_types::Geometry<f64>) -> Result<Self, Self::Error> {
        use geo_types::Geometry as G;

        let or_empty = |kind: GeometryType, coords: Vec<Rings>| {
            if coords.iter().flatten().all(Vec::is_empty) {
                Ok(Geometry::empty(kind))
            } else {
                Geometry::new(kind, coords)
            }
        };

        match geom {
            G::Point(p) => Ok(Geometry::point(p.x(), p.y())),
            G::Line(l) => {
                let ends: Ring = vec![l.start.into(), l.end.into()];
                Geometry::line_string(ends)
            }
            G::LineString(ls) => or_empty(GeometryType::LineString, vec![vec![positions(&ls)]]),
            G::MultiPoint(mp) => {
                let points: Ring = mp.iter().map(|p| -> Position { [p.x(), p.y()] }).collect();
                or_empty(GeometryType::MultiPoint, vec![vec![points]])
            }
            G::Polygon(p) => or_empty(GeometryType::Polygon, vec![polygon_rings(&p)]),
            G::MultiLineString(mls) => {
                let lines = mls.iter().map(positions).collect();
                or_empty(GeometryType::MultiLineString, vec![lines])
            }
            G::MultiPolygon(mp) => {
                let polygons = mp.iter().map(polygon_rings).collect();
                or_empty(GeometryType::MultiPolygon, polygons)
            }
            G::Rect(r) => Geometry::polygon(polygon_rings(&r.to_polygon())),
            G::Triangle(t) => Geometry::polygon(polygon_rings(&t.to_polygon())),
            G::GeometryCollection(gc) => Err(GeoshiftError::UnsupportedGeometryOperation(format!(
                "GeometryCollection of {} members has no single geometry type",
                gc.len()
            ))),
        }
    }
}

impl Geometry {
    /// Converts to a `geojson::Geometry`, for callers building features.
    pub fn to_geojson_geometry(&self) -> geojson::Geometry {
        let geom = geo_types::Geometry::from(self);
        geojson::Geometry::new(geojson::Value::from(&geom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{Rect, coord, line_string, point};

    #[test]
    fn test_to_geo_types_per_kind() -> Result<(), GeoshiftError> {
        let pt = Geometry::point(1.0, 2.0);
        assert_eq!(
            geo_types::Geometry::from(&pt),
            geo_types::Geometry::Point(point! { x: 1.0, y: 2.0 })
        );

        let line = Geometry::line_string(vec![[0.0, 0.0], [1.0, 1.0]])?;
        assert_eq!(
            geo_types::Geometry::from(&line),
            geo_types::Geometry::LineString(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)])
        );

        let poly = Geometry::from_wkt("POLYGON ((0 0, 4 0, 4 4, 0 0), (1 1, 2 1, 2 2, 1 1))")?;
        match geo_types::Geometry::from(&poly) {
            geo_types::Geometry::Polygon(p) => {
                assert_eq!(p.exterior().0.len(), 4);
                assert_eq!(p.interiors().len(), 1);
            }
            other => panic!("Expected Polygon, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_round_trip_through_geo_types() -> Result<(), GeoshiftError> {
        let samples = [
            "MULTIPOINT (10 40, 40 30)",
            "MULTILINESTRING ((10 10, 20 20, 10 40), (40 40, 30 30))",
            "MULTIPOLYGON (((40 40, 20 45, 45 30, 40 40)), ((20 35, 10 30, 10 10, 20 35)))",
        ];
        for sample in samples {
            let ours = Geometry::from_wkt(sample)?;
            let back = Geometry::try_from(geo_types::Geometry::from(&ours))?;
            assert_eq!(back, ours, "{}", sample);
        }
        Ok(())
    }

    #[test]
    fn test_from_line_and_rect() -> Result<(), GeoshiftError> {
        let l = geo_types::Line::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 3.0, y: 4.0 });
        let line = Geometry::try_from(geo_types::Geometry::Line(l))?;
        assert_eq!(line.geometry_type, GeometryType::LineString);
        assert_eq!(line.coords[0][0], vec![[0.0, 0.0], [3.0, 4.0]]);

        let r = Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 2.0, y: 2.0 });
        let poly = Geometry::try_from(geo_types::Geometry::Rect(r))?;
        assert_eq!(poly.geometry_type, GeometryType::Polygon);
        assert_eq!(poly.num_points(), 5);
        Ok(())
    }

    #[test]
    fn test_empty_geo_types_become_empty() -> Result<(), GeoshiftError> {
        let empty = Geometry::try_from(geo_types::Geometry::LineString(LineString::new(vec![])))?;
        assert!(empty.is_empty());
        assert_eq!(empty.geometry_type, GeometryType::LineString);

        let pt = geo_types::Geometry::from(&Geometry::empty(GeometryType::Point));
        assert_eq!(pt, geo_types::Geometry::MultiPoint(MultiPoint::new(vec![])));
        Ok(())
    }

    #[test]
    fn test_geometry_collection_is_rejected() {
        let gc = geo_types::GeometryCollection::<f64>::new_from(vec![]);
        assert!(matches!(
            Geometry::try_from(geo_types::Geometry::GeometryCollection(gc)),
            Err(GeoshiftError::UnsupportedGeometryOperation(_))
        ));
    }

    #[test]
    fn test_geojson_geometry_agrees_with_codec() -> Result<(), GeoshiftError> {
        let geom = Geometry::from_wkt("LINESTRING (116.404 39.915, 121.5 31.2)")?;
        let gj = geom.to_geojson_geometry();
        assert!(matches!(gj.value, geojson::Value::LineString(_)));

        let text = serde_json::to_string(&gj)
            .map_err(|e| GeoshiftError::MalformedGeoJson(e.to_string()))?;
        let reparsed = Geometry::from_geojson(&text)?;
        assert_eq!(reparsed, geom);
        Ok(())
    }
}
