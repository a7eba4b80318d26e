//! Great-circle helpers on a sphere of radius [`EARTH_RADIUS_KM`].
//!
//! Inputs are `(lon, lat)` degrees, distances are kilometres and bearings are
//! degrees clockwise from north.

use crate::core::constants::EARTH_RADIUS_KM;
use crate::util::coord::Coordinate;
use std::f64::consts::PI;

/// Great-circle distance by the spherical law of cosines.
pub fn distance<C: Coordinate>(from: &C, to: &C) -> f64 {
    let (lat1, lat2) = (from.y().to_radians(), to.y().to_radians());
    let theta = (to.x() - from.x()).to_radians();
    let cos_angle = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * theta.cos();
    // Rounding can push identical points just past 1.0.
    EARTH_RADIUS_KM * cos_angle.clamp(-1.0, 1.0).acos()
}

/// Great-circle distance by the haversine formula, better conditioned for short hops.
pub fn distance_haversine<C: Coordinate>(from: &C, to: &C) -> f64 {
    let (lat1, lat2) = (from.y().to_radians(), to.y().to_radians());
    let dlat = lat2 - lat1;
    let dlon = (to.x() - from.x()).to_radians();
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Initial bearing from `from` towards `to`, normalized to `[0, 360)`.
pub fn azimuth<C: Coordinate>(from: &C, to: &C) -> f64 {
    let (lat1, lat2) = (from.y().to_radians(), to.y().to_radians());
    let dlon = (to.x() - from.x()).to_radians();
    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

/// Point halfway along the great circle between two points, as `(lon, lat)`.
pub fn mid_point<C: Coordinate>(from: &C, to: &C) -> (f64, f64) {
    let (lat1, lat2) = (from.y().to_radians(), to.y().to_radians());
    let lon1 = from.x().to_radians();
    let dlon = (to.x() - from.x()).to_radians();

    let bx = lat2.cos() * dlon.cos();
    let by = lat2.cos() * dlon.sin();
    let lat = (lat1.sin() + lat2.sin()).atan2(((lat1.cos() + bx).powi(2) + by * by).sqrt());
    let lon = lon1 + by.atan2(lat1.cos() + bx);
    (lon.to_degrees(), lat.to_degrees())
}

/// Point reached after travelling `distance_km` from `from` on initial `bearing` degrees.
///
/// The longitude is reduced to `[0, 2π)` before conversion, so the result lies
/// in `[0, 360)` degrees rather than `[-180, 180]`: a destination at 10°W is
/// reported as 350.
pub fn destination_point<C: Coordinate>(from: &C, bearing: f64, distance_km: f64) -> (f64, f64) {
    let delta = distance_km / EARTH_RADIUS_KM;
    let theta = bearing.to_radians();
    let lat1 = from.y().to_radians();
    let lon1 = from.x().to_radians();

    let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
    let lon2 = lon1
        + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());
    (lon2.rem_euclid(2.0 * PI).to_degrees(), lat2.to_degrees())
}
