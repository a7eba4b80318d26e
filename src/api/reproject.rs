use crate::core::datum::Transform;
use crate::geom::geometry::Geometry;
use crate::util::coord::Coordinate;
use crate::util::error::GeoshiftError;
use crate::util::precision::Precision;
use geo_types::Point;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Geodetic reference system of a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Datum {
    /// WGS-84 (EPSG:4326), as reported by GPS
    #[default]
    Wgs84,
    /// GCJ-02, the offset system mandated for maps published in China
    Gcj02,
    /// BD-09, Baidu's further offset on top of GCJ-02
    Bd09,
}

impl Datum {
    /// Lower-case name, as accepted by `FromStr` and serde.
    pub fn as_str(self) -> &'static str {
        match self {
            Datum::Wgs84 => "wgs84",
            Datum::Gcj02 => "gcj02",
            Datum::Bd09 => "bd09",
        }
    }

    /// The conversion from `self` to `to`, or `None` when they are the same datum.
    pub fn transform_to(self, to: Datum) -> Option<Transform> {
        match (self, to) {
            (Datum::Wgs84, Datum::Gcj02) => Some(Transform::Wgs2Gcj),
            (Datum::Gcj02, Datum::Wgs84) => Some(Transform::Gcj2Wgs),
            (Datum::Gcj02, Datum::Bd09) => Some(Transform::Gcj2Bd),
            (Datum::Bd09, Datum::Gcj02) => Some(Transform::Bd2Gcj),
            (Datum::Wgs84, Datum::Bd09) => Some(Transform::Wgs2Bd),
            (Datum::Bd09, Datum::Wgs84) => Some(Transform::Bd2Wgs),
            _ => None,
        }
    }

    /// Converts a coordinate in `self` to `to`, rounded to eight digits.
    ///
    /// The rounding applies even when `self == to`, as in [`Reprojection::apply`].
    ///
    /// ```
    /// use geoshift::Datum;
    ///
    /// let pt = Datum::Wgs84.convert(Datum::Gcj02, &(121.5012091398, 31.2355502882));
    /// assert_eq!((pt.x(), pt.y()), (121.50563645, 31.23353016));
    /// ```
    pub fn convert<C: Coordinate>(self, to: Datum, coord: &C) -> Point<f64> {
        match self.transform_to(to) {
            Some(transform) => transform.apply_point(coord),
            None => {
                let (lon, lat) = Precision::Point.apply_pair((coord.x(), coord.y()));
                Point::new(lon, lat)
            }
        }
    }
}

impl FromStr for Datum {
    type Err = GeoshiftError;

    /// Accepts `wgs84`, `gcj02`, `bd09`, with or without a hyphen, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().replace('-', "").to_ascii_lowercase();
        match key.as_str() {
            "wgs84" => Ok(Datum::Wgs84),
            "gcj02" => Ok(Datum::Gcj02),
            "bd09" => Ok(Datum::Bd09),
            _ => Err(GeoshiftError::UnknownDatum(s.to_string())),
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings for moving a geometry between datums.
///
/// # Example
/// ```
/// use geoshift::{Datum, Geometry, Precision, Reprojection};
///
/// let config = Reprojection::new(Datum::Wgs84, Datum::Bd09)
///     .precision(Precision::LngLat)
///     .parallel(true);
///
/// let mut pt = Geometry::point(121.5012091398, 31.2355502882);
/// pt.reproject(&config);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reprojection {
    pub from: Datum,
    pub to: Datum,
    #[serde(default)]
    pub precision: Precision,
    #[serde(default)]
    pub parallel: bool,
}

impl Reprojection {
    /// Eight-digit, sequential reprojection from `from` to `to`.
    pub fn new(from: Datum, to: Datum) -> Self {
        Self {
            from,
            to,
            precision: Precision::default(),
            parallel: false,
        }
    }

    /// Rounding applied to every converted ordinate.
    pub fn precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Spread the work over the rayon pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Converts a single `(lon, lat)`. Same-datum input is only rounded to `precision`.
    pub fn apply(&self, lon: f64, lat: f64) -> (f64, f64) {
        match self.from.transform_to(self.to) {
            Some(transform) => transform.apply(lon, lat, self.precision),
            None => self.precision.apply_pair((lon, lat)),
        }
    }
}

impl Geometry {
    /// Moves every position of the geometry to `config.to`, in place.
    pub fn reproject(&mut self, config: &Reprojection) -> &mut Self {
        debug!(
            "reprojecting {} with {} points from {} to {}",
            self.geometry_type,
            self.num_points(),
            config.from,
            config.to
        );
        let convert = |lon: f64, lat: f64| config.apply(lon, lat);
        if config.parallel {
            self.par_point_func(convert)
        } else {
            self.point_func(convert)
        }
    }

    /// Returns a reprojected copy, leaving `self` untouched.
    pub fn reprojected(&self, config: &Reprojection) -> Geometry {
        let mut copy = self.clone();
        copy.reproject(config);
        copy
    }
}
