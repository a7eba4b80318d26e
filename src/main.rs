use geoshift::{Datum, Geometry, GeoshiftError, Reprojection, distance, wgs2bd, wgs2gcj};

fn main() -> Result<(), GeoshiftError> {
    let lon = 121.5012091398;
    let lat = 31.2355502882;

    let (gcj_lon, gcj_lat) = wgs2gcj(lon, lat);
    let (bd_lon, bd_lat) = wgs2bd(lon, lat);

    println!("WGS-84: ({}, {})", lon, lat);
    println!("GCJ-02: ({}, {})", gcj_lon, gcj_lat);
    println!("BD-09:  ({}, {})", bd_lon, bd_lat);
    println!(
        "Offset: {:.1} m",
        distance(&(lon, lat), &(gcj_lon, gcj_lat)) * 1000.0
    );

    let mut line = Geometry::from_wkt("LINESTRING (121.4997 31.2397, 121.5012091398 31.2355502882)")?;
    line.reproject(&Reprojection::new(Datum::Wgs84, Datum::Gcj02));
    println!("WKT: {}", line);
    println!("GeoJSON: {}", line.to_geojson());

    Ok(())
}
