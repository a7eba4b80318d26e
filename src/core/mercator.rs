use crate::core::constants::{LL_BAND, LL_TO_MC, MC_BAND, MC_TO_LL};
use crate::util::coord::Coordinate;
use std::f64::consts::PI;

/// Returns the slippy-map tile column containing `lon` at `zoom`.
///
/// Returns `None` when the projected column is not finite.
pub fn lon2tile(lon: f64, zoom: u8) -> Option<i64> {
    let x = (lon + 180.0) / 360.0 * tiles_per_axis(zoom);
    x.is_finite().then(|| x.floor() as i64)
}

/// Returns the slippy-map tile row containing `lat` at `zoom`.
///
/// Returns `None` when the projected row is not finite, e.g. for a NaN latitude.
pub fn lat2tile(lat: f64, zoom: u8) -> Option<i64> {
    let rad = lat.to_radians();
    let y = (1.0 - (rad.tan() + 1.0 / rad.cos()).ln() / PI) / 2.0 * tiles_per_axis(zoom);
    y.is_finite().then(|| y.floor() as i64)
}

/// Returns the longitude of the west edge of tile column `x` at `zoom`.
pub fn tile2lon(x: i64, zoom: u8) -> f64 {
    x as f64 / tiles_per_axis(zoom) * 360.0 - 180.0
}

/// Returns the latitude of the north edge of tile row `y` at `zoom`.
pub fn tile2lat(y: i64, zoom: u8) -> f64 {
    let n = PI - 2.0 * PI * y as f64 / tiles_per_axis(zoom);
    n.sinh().atan().to_degrees()
}

/// Returns the `(column, row)` tile containing a lon/lat coordinate.
pub fn lonlat_to_tile<C: Coordinate>(coord: &C, zoom: u8) -> Option<(i64, i64)> {
    Some((lon2tile(coord.x(), zoom)?, lat2tile(coord.y(), zoom)?))
}

fn tiles_per_axis(zoom: u8) -> f64 {
    2f64.powi(zoom as i32)
}

/// Converts Baidu Mercator metres to BD-09 `(lon, lat)`.
///
/// The coefficient row is the first band whose lower bound `|y|` reaches.
/// A non-finite `y` matches no band and yields `(NaN, NaN)`.
pub fn mercator_to_bd09(x: f64, y: f64) -> (f64, f64) {
    let abs_y = y.abs();
    match MC_BAND.iter().position(|&band| abs_y >= band) {
        Some(i) => convert(x, y, &MC_TO_LL[i]),
        None => (f64::NAN, f64::NAN),
    }
}

/// Converts BD-09 `(lon, lat)` to Baidu Mercator metres.
///
/// Northern latitudes take the first band (scanning from 75° down) whose
/// lower bound they reach. Southern latitudes match none of those, and then
/// scan the negated bounds from the equator outwards, which means every
/// southern latitude lands on the equatorial row. Latitude is not clamped,
/// a non-finite input yields `(NaN, NaN)`.
pub fn bd09_to_mercator(lon: f64, lat: f64) -> (f64, f64) {
    let band = LL_BAND
        .iter()
        .position(|&band| lat >= band)
        .or_else(|| LL_BAND.iter().rposition(|&band| lat <= -band));
    match band {
        Some(i) => convert(lon, lat, &LL_TO_MC[i]),
        None => (f64::NAN, f64::NAN),
    }
}

fn convert(x: f64, y: f64, c: &[f64; 10]) -> (f64, f64) {
    let mut xt = c[0] + c[1] * x.abs();
    let cc = y.abs() / c[9];
    let mut yt = c[2]
        + c[3] * cc
        + c[4] * cc.powi(2)
        + c[5] * cc.powi(3)
        + c[6] * cc.powi(4)
        + c[7] * cc.powi(5)
        + c[8] * cc.powi(6);
    if x < 0.0 {
        xt = -xt;
    }
    if y < 0.0 {
        yt = -yt;
    }
    (xt, yt)
}
