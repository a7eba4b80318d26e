use crate::core::mercator::mercator_to_bd09;
use crate::geom::geometry::{Geometry, Ring};
use crate::util::error::GeoshiftError;
use log::debug;

/// Type code of a Baidu `geo` string that carries a polyline.
const BAIDU_LINE_CODE: &str = "4";
/// Prefix of the polyline segment within the third field.
const BAIDU_PATH_PREFIX: &str = "1-";

/// Parses a geometry string, auto-detecting WKT or GeoJSON format.
///
/// GeoJSON is detected by a leading `{`, everything else is tried as WKT.
///
/// ```
/// use geoshift::{GeometryType, parse_geometry};
///
/// # fn main() -> Result<(), geoshift::GeoshiftError> {
/// let a = parse_geometry(r#"{"type":"Point","coordinates":[121.5,31.2]}"#)?;
/// let b = parse_geometry("POINT (121.5 31.2)")?;
/// assert_eq!(a, b);
/// assert_eq!(a.geometry_type, GeometryType::Point);
/// # Ok(())
/// # }
/// ```
pub fn parse_geometry(s: &str) -> Result<Geometry, GeoshiftError> {
    let trimmed = s.trim();
    if trimmed.starts_with('{') {
        Geometry::from_geojson(trimmed)
    } else {
        Geometry::from_wkt(trimmed)
    }
}

impl Geometry {
    /// Decodes the `geo` field of a Baidu place-search result into a BD-09
    /// `LineString`.
    ///
    /// The string looks like `4|x1,y1;x2,y2|1-x,y,x,y,...;`. The first field
    /// is the type code, the second the extent, and the third holds
    /// `;`-separated segments of which the one prefixed `1-` is the polyline in
    /// Baidu Mercator metres.
    pub fn from_baidu_path(path: &str) -> Result<Self, GeoshiftError> {
        let fields: Vec<&str> = path.trim().split('|').collect();
        if fields.len() < 3 {
            return Err(malformed(format!(
                "expected 3 '|' separated fields, found {}",
                fields.len()
            )));
        }
        if fields[0] != BAIDU_LINE_CODE {
            return Err(malformed(format!("unsupported type code '{}'", fields[0])));
        }

        let segment = fields[2]
            .split(';')
            .filter_map(|s| s.strip_prefix(BAIDU_PATH_PREFIX))
            .next_back()
            .ok_or_else(|| malformed("no '1-' polyline segment".to_string()))?;

        let values = segment
            .split(',')
            .map(|v| {
                v.trim()
                    .parse::<f64>()
                    .map_err(|_| malformed(format!("non-numeric value '{}'", v)))
            })
            .collect::<Result<Vec<f64>, _>>()?;
        if values.len() % 2 != 0 {
            return Err(malformed(format!("odd number of values ({})", values.len())));
        }

        let positions: Ring = values
            .chunks_exact(2)
            .map(|xy| {
                let (lon, lat) = mercator_to_bd09(xy[0], xy[1]);
                [lon, lat]
            })
            .collect();
        Geometry::line_string(positions)
    }
}

fn malformed(msg: String) -> GeoshiftError {
    debug!("rejecting Baidu path: {}", msg);
    GeoshiftError::MalformedBaiduPath(msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::geometry::GeometryType;
    use approx::assert_abs_diff_eq;

    const SEARCH_GEO: &str = "4|13534914.0122,3645387.5227;13535422.4951,3645834.93158|1-13534914.0122,3645542.22157,13534919.2537,3645555.85957,13535111.9804,3645672.21552,13535163.1497,3645713.32995;";

    #[test]
    fn test_parse_geojson_point() -> Result<(), GeoshiftError> {
        let geom = parse_geometry(r#"  {"type":"Point","coordinates":[-0.1,51.5]}"#)?;
        assert_eq!(geom.geometry_type, GeometryType::Point);
        assert_eq!(geom.coords[0][0][0], [-0.1, 51.5]);
        Ok(())
    }

    #[test]
    fn test_parse_geojson_multilinestring() -> Result<(), GeoshiftError> {
        let json = r#"{"type":"MultiLineString","coordinates":[[[-0.1,51.5],[-0.2,51.6]],[[-0.3,51.7],[-0.4,51.8]]]}"#;
        let geom = parse_geometry(json)?;
        assert_eq!(geom.geometry_type, GeometryType::MultiLineString);
        assert_eq!(geom.coords[0].len(), 2);
        Ok(())
    }

    #[test]
    fn test_parse_wkt_linestring() -> Result<(), GeoshiftError> {
        let geom = parse_geometry("LINESTRING(-0.1 51.5, -0.2 51.6)\n")?;
        assert_eq!(geom.geometry_type, GeometryType::LineString);
        assert_eq!(geom.num_points(), 2);
        Ok(())
    }

    #[test]
    fn test_parse_errors_keep_their_format() {
        assert!(matches!(
            parse_geometry("{\"type\":"),
            Err(GeoshiftError::MalformedGeoJson(_))
        ));
        assert!(matches!(
            parse_geometry("POINT (a b)"),
            Err(GeoshiftError::MalformedWkt(_))
        ));
    }

    #[test]
    fn test_baidu_path() -> Result<(), GeoshiftError> {
        let line = Geometry::from_baidu_path(SEARCH_GEO)?;
        assert_eq!(line.geometry_type, GeometryType::LineString);
        assert_eq!(line.num_points(), 4);

        let first = line.coords[0][0][0];
        let (lon, lat) = mercator_to_bd09(13534914.0122, 3645542.22157);
        assert_eq!(first, [lon, lat]);
        assert_abs_diff_eq!(first[0], 121.5848783, epsilon = 1e-6);
        assert!(first[1] > 31.2 && first[1] < 31.3);
        Ok(())
    }

    #[test]
    fn test_baidu_path_rejections() {
        let cases = [
            "",
            "4|1,2;3,4",
            "2|1,2;3,4|1-1,2,3,4;",
            "4|1,2;3,4|2-1,2,3,4;",
            "4|1,2;3,4|1-1,2,3;",
            "4|1,2;3,4|1-1,x,3,4;",
        ];
        for case in cases {
            assert!(
                matches!(
                    Geometry::from_baidu_path(case),
                    Err(GeoshiftError::MalformedBaiduPath(_))
                ),
                "accepted {:?}",
                case
            );
        }
    }
}
