pub mod constants;
pub mod datum;
pub mod mercator;
pub mod sphere;

pub use constants::{EARTH_RADIUS_KM, KRASOVSKY_A, KRASOVSKY_EE, LL_BAND, MC_BAND, X_PI};
pub use datum::{Transform, bd2gcj, bd2wgs, gcj2bd, gcj2wgs, gcj2wgs_exact, wgs2bd, wgs2gcj};
pub use mercator::{
    bd09_to_mercator, lat2tile, lon2tile, lonlat_to_tile, mercator_to_bd09, tile2lat, tile2lon,
};
pub use sphere::{azimuth, destination_point, distance, distance_haversine, mid_point};
