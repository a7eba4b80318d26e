//! Conversions between the WGS-84, GCJ-02 and BD-09 reference systems.
//!
//! All functions take and return `(longitude, latitude)` in degrees. The
//! offset is applied everywhere, including outside China. The reverse
//! directions (`gcj2wgs`, `bd2gcj`) subtract the forward offset evaluated at
//! the already-shifted point, so they only approximate the inverse, to about
//! 1e-4 degrees. [`gcj2wgs_exact`] iterates to a tighter inverse when that
//! matters.

use crate::core::constants::{
    BD_LAT_OFFSET, BD_LON_OFFSET, KRASOVSKY_A, KRASOVSKY_EE, PI, X_PI,
};
use crate::util::coord::Coordinate;
use crate::util::precision::Precision;
use geo_types::Point;
use serde::{Deserialize, Serialize};

/// Convergence threshold of [`gcj2wgs_exact`], in degrees.
const EXACT_THRESHOLD: f64 = 1e-9;
const EXACT_MAX_ITERATIONS: usize = 30;

/// One of the six datum conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    Wgs2Gcj,
    Gcj2Wgs,
    Gcj2Bd,
    Bd2Gcj,
    Wgs2Bd,
    Bd2Wgs,
}

impl Transform {
    /// Applies the conversion without rounding.
    pub fn apply_raw(self, lon: f64, lat: f64) -> (f64, f64) {
        match self {
            Transform::Wgs2Gcj => shift_wgs2gcj(lon, lat),
            Transform::Gcj2Wgs => shift_gcj2wgs(lon, lat),
            Transform::Gcj2Bd => shift_gcj2bd(lon, lat),
            Transform::Bd2Gcj => shift_bd2gcj(lon, lat),
            Transform::Wgs2Bd => {
                let (lon, lat) = shift_wgs2gcj(lon, lat);
                shift_gcj2bd(lon, lat)
            }
            Transform::Bd2Wgs => {
                let (lon, lat) = shift_bd2gcj(lon, lat);
                shift_gcj2wgs(lon, lat)
            }
        }
    }

    /// Applies the conversion and rounds the result to `precision`.
    pub fn apply(self, lon: f64, lat: f64, precision: Precision) -> (f64, f64) {
        precision.apply_pair(self.apply_raw(lon, lat))
    }

    /// Point API: converts any [`Coordinate`], rounding to eight digits.
    pub fn apply_point<C: Coordinate>(self, coord: &C) -> Point<f64> {
        let (lon, lat) = self.apply(coord.x(), coord.y(), Precision::Point);
        Point::new(lon, lat)
    }

    /// The conversion that undoes this one (approximately, see module docs).
    pub fn inverse(self) -> Self {
        match self {
            Transform::Wgs2Gcj => Transform::Gcj2Wgs,
            Transform::Gcj2Wgs => Transform::Wgs2Gcj,
            Transform::Gcj2Bd => Transform::Bd2Gcj,
            Transform::Bd2Gcj => Transform::Gcj2Bd,
            Transform::Wgs2Bd => Transform::Bd2Wgs,
            Transform::Bd2Wgs => Transform::Wgs2Bd,
        }
    }
}

/// WGS-84 to GCJ-02, rounded to seven digits.
pub fn wgs2gcj(lon: f64, lat: f64) -> (f64, f64) {
    Transform::Wgs2Gcj.apply(lon, lat, Precision::LngLat)
}

/// GCJ-02 to WGS-84 (approximate inverse), rounded to seven digits.
pub fn gcj2wgs(lon: f64, lat: f64) -> (f64, f64) {
    Transform::Gcj2Wgs.apply(lon, lat, Precision::LngLat)
}

/// GCJ-02 to BD-09, rounded to seven digits.
pub fn gcj2bd(lon: f64, lat: f64) -> (f64, f64) {
    Transform::Gcj2Bd.apply(lon, lat, Precision::LngLat)
}

/// BD-09 to GCJ-02 (approximate inverse), rounded to seven digits.
pub fn bd2gcj(lon: f64, lat: f64) -> (f64, f64) {
    Transform::Bd2Gcj.apply(lon, lat, Precision::LngLat)
}

/// WGS-84 to BD-09, rounded once to seven digits.
pub fn wgs2bd(lon: f64, lat: f64) -> (f64, f64) {
    Transform::Wgs2Bd.apply(lon, lat, Precision::LngLat)
}

/// BD-09 to WGS-84, rounded once to seven digits.
pub fn bd2wgs(lon: f64, lat: f64) -> (f64, f64) {
    Transform::Bd2Wgs.apply(lon, lat, Precision::LngLat)
}

/// GCJ-02 to WGS-84 by fixed-point iteration on the forward offset.
///
/// Unlike [`gcj2wgs`] this converges on the point whose forward shift lands
/// on the input, so `wgs2gcj(gcj2wgs_exact(p)) ≈ p` to within rounding.
pub fn gcj2wgs_exact(lon: f64, lat: f64) -> (f64, f64) {
    let (mut wlon, mut wlat) = shift_gcj2wgs(lon, lat);
    for _ in 0..EXACT_MAX_ITERATIONS {
        let (glon, glat) = shift_wgs2gcj(wlon, wlat);
        let (dlon, dlat) = (glon - lon, glat - lat);
        if dlon.abs() < EXACT_THRESHOLD && dlat.abs() < EXACT_THRESHOLD {
            break;
        }
        wlon -= dlon;
        wlat -= dlat;
    }
    Precision::LngLat.apply_pair((wlon, wlat))
}

fn transform_lon(x: f64, y: f64) -> f64 {
    let mut ret = 300.0 + x + 2.0 * y + 0.1 * x * x + 0.1 * x * y + 0.1 * x.abs().sqrt();
    ret += (20.0 * (6.0 * x * PI).sin() + 20.0 * (2.0 * x * PI).sin()) * 2.0 / 3.0;
    ret += (20.0 * (x * PI).sin() + 40.0 * (x / 3.0 * PI).sin()) * 2.0 / 3.0;
    ret += (150.0 * (x / 12.0 * PI).sin() + 300.0 * (x / 30.0 * PI).sin()) * 2.0 / 3.0;
    ret
}

fn transform_lat(x: f64, y: f64) -> f64 {
    let mut ret = -100.0 + 2.0 * x + 3.0 * y + 0.2 * y * y + 0.1 * x * y + 0.2 * x.abs().sqrt();
    ret += (20.0 * (6.0 * x * PI).sin() + 20.0 * (2.0 * x * PI).sin()) * 2.0 / 3.0;
    ret += (20.0 * (y * PI).sin() + 40.0 * (y / 3.0 * PI).sin()) * 2.0 / 3.0;
    ret += (160.0 * (y / 12.0 * PI).sin() + 320.0 * (y * PI / 30.0).sin()) * 2.0 / 3.0;
    ret
}

/// GCJ-02 offset `(dlon, dlat)` at the given point.
fn gcj_offset(lon: f64, lat: f64) -> (f64, f64) {
    let dlat = transform_lat(lon - 105.0, lat - 35.0);
    let dlon = transform_lon(lon - 105.0, lat - 35.0);

    let rad_lat = lat / 180.0 * PI;
    let magic = rad_lat.sin();
    let magic = 1.0 - KRASOVSKY_EE * magic * magic;
    let sqrt_magic = magic.sqrt();

    let dlat = (dlat * 180.0) / ((KRASOVSKY_A * (1.0 - KRASOVSKY_EE)) / (magic * sqrt_magic) * PI);
    let dlon = (dlon * 180.0) / (KRASOVSKY_A / sqrt_magic * rad_lat.cos() * PI);
    (dlon, dlat)
}

fn shift_wgs2gcj(lon: f64, lat: f64) -> (f64, f64) {
    let (dlon, dlat) = gcj_offset(lon, lat);
    (lon + dlon, lat + dlat)
}

fn shift_gcj2wgs(lon: f64, lat: f64) -> (f64, f64) {
    let (dlon, dlat) = gcj_offset(lon, lat);
    (lon - dlon, lat - dlat)
}

fn shift_gcj2bd(lon: f64, lat: f64) -> (f64, f64) {
    let (x, y) = (lon, lat);
    let z = (x * x + y * y).sqrt() + 0.00002 * (y * X_PI).sin();
    let theta = y.atan2(x) + 0.000003 * (x * X_PI).cos();
    (z * theta.cos() + BD_LON_OFFSET, z * theta.sin() + BD_LAT_OFFSET)
}

fn shift_bd2gcj(lon: f64, lat: f64) -> (f64, f64) {
    let (x, y) = (lon - BD_LON_OFFSET, lat - BD_LAT_OFFSET);
    let z = (x * x + y * y).sqrt() - 0.00002 * (y * X_PI).sin();
    let theta = y.atan2(x) - 0.000003 * (x * X_PI).cos();
    (z * theta.cos(), z * theta.sin())
}
