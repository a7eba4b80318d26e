//! # geoshift
//!
//! Vector geometries with WKT and GeoJSON codecs, and the conversions between
//! the WGS-84, GCJ-02 and BD-09 coordinate systems used by maps in China.
//!
//! There are currently three main entry points.
//!
//! ### 1. Point transforms
//!
//! ```
//! use geoshift::{gcj2bd, wgs2gcj};
//!
//! let (lon, lat) = wgs2gcj(121.5012091398, 31.2355502882);
//! assert_eq!((lon, lat), (121.5056364, 31.2335302));
//!
//! let (bd_lon, bd_lat) = gcj2bd(lon, lat);
//! println!("{} {}", bd_lon, bd_lat);
//! ```
//!
//! ### 2. `Geometry` - WKT and GeoJSON
//!
//! ```
//! use geoshift::Geometry;
//!
//! # fn main() -> Result<(), geoshift::GeoshiftError> {
//! let mut poly = Geometry::from_wkt("POLYGON ((0 0, 0 2, 2 2, 2 0, 0 0))")?;
//! let rect = poly.bbox()?;
//! assert_eq!(rect.width(), 2.0);
//!
//! poly.reverse_lnglat();
//! println!("{}", poly.to_geojson());
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `Reprojection` - Configured Geometry Transforms
//!
//! ```
//! use geoshift::{Datum, Precision, Reprojection, parse_geometry};
//!
//! # fn main() -> Result<(), geoshift::GeoshiftError> {
//! let config = Reprojection::new(Datum::Wgs84, Datum::Bd09)
//!     .precision(Precision::LngLat)
//!     .parallel(true);
//!
//! let mut line = parse_geometry(r#"{"type":"LineString","coordinates":[[116.3,39.9],[116.4,39.95]]}"#)?;
//! line.reproject(&config);
//! println!("{}", line);
//! # Ok(())
//! # }
//! ```
//!

pub mod api;
pub mod core;
pub mod geom;
pub mod util;

pub use api::{Datum, Reprojection};
pub use core::{
    EARTH_RADIUS_KM, KRASOVSKY_A, KRASOVSKY_EE, LL_BAND, MC_BAND, Transform, X_PI, azimuth,
    bd09_to_mercator, bd2gcj, bd2wgs, destination_point, distance, distance_haversine, gcj2bd,
    gcj2wgs, gcj2wgs_exact, lat2tile, lon2tile, lonlat_to_tile, mercator_to_bd09, mid_point,
    tile2lat, tile2lon, wgs2bd, wgs2gcj,
};
pub use geom::{Coords, Geometry, GeometryType, Position, Ring, Rings, is_clockwise, parse_geometry};
pub use util::{
    Coordinate, GeoshiftError, LNGLAT_DIGITS, MAX_DIGITS, POINT_DIGITS, Precision,
    ROUNDING_EPSILON, format_g, round_half_up,
};

pub use geo_types;
pub use geojson;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use geo_types::point;

    #[test]
    fn test_end_to_end_shanghai_tower() -> Result<(), GeoshiftError> {
        let mut geom = parse_geometry("POINT (121.5012091398 31.2355502882)")?;
        geom.wgs2gcj();
        assert_eq!(geom.to_wkt(), "POINT (121.50563645 31.23353016)");

        geom.gcj2bd();
        let [lon, lat] = geom.coords[0][0][0];
        assert_abs_diff_eq!(lon, 121.512245, epsilon = 1e-6);
        assert_abs_diff_eq!(lat, 31.239186, epsilon = 1e-6);

        let back = Geometry::from_geojson(&geom.to_geojson())?;
        assert_eq!(back, geom);
        Ok(())
    }

    #[test]
    fn test_wkt_to_geojson_and_back() -> Result<(), GeoshiftError> {
        let wkt = "MULTILINESTRING ((10 10, 20 20, 10 40), (40 40, 30 30, 40 20, 30 10))";
        let from_wkt = Geometry::from_wkt(wkt)?;
        let from_json = Geometry::from_geojson(&from_wkt.to_geojson())?;
        assert_eq!(from_json.to_wkt(), from_wkt.to_wkt());
        Ok(())
    }

    #[test]
    fn test_point_and_tuple_apis_agree() {
        let pt = point! { x: 116.404, y: 39.915 };
        let from_point = Transform::Wgs2Gcj.apply_point(&pt);
        let (lon, lat) = wgs2gcj(116.404, 39.915);
        assert_eq!((lon, lat), (116.4102445, 39.9164043));
        assert_abs_diff_eq!(from_point.x(), lon, epsilon = 1e-7);
        assert_abs_diff_eq!(from_point.y(), lat, epsilon = 1e-7);
    }

    #[test]
    fn test_baidu_path_to_wgs84() -> Result<(), GeoshiftError> {
        let geo = "4|13534914.0122,3645387.5227;13535422.4951,3645834.93158|1-13534914.0122,3645542.22157,13535163.1497,3645713.32995;";
        let mut line = Geometry::from_baidu_path(geo)?;
        line.reproject(&Reprojection::new(Datum::Bd09, Datum::Wgs84));

        assert_eq!(line.num_points(), 2);
        let rect = line.bbox()?;
        assert!(rect.min().x > 121.5 && rect.max().x < 121.6);
        assert!(rect.min().y > 31.2 && rect.max().y < 31.3);
        Ok(())
    }

    #[test]
    fn test_tile_of_transformed_point() {
        let (lon, lat) = wgs2gcj(121.5012091398, 31.2355502882);
        let tile = lonlat_to_tile(&(lon, lat), 12);
        assert_eq!(tile.map(|(col, _)| col), Some(3430));
    }

    #[test]
    fn test_distance_of_datum_offset() {
        let wgs = (116.404, 39.915);
        let gcj = wgs2gcj(wgs.0, wgs.1);
        let km = distance_haversine(&wgs, &gcj);
        // The GCJ-02 shift is a few hundred metres around Beijing.
        assert!(km > 0.1 && km < 1.0, "offset was {} km", km);
    }
}
