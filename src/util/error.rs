/// Error type for geoshift operations.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoshiftError {
    /// WKT text could not be tokenized or its bracket structure is invalid.
    MalformedWkt(String),
    /// GeoJSON text is not a geometry document or its coordinates do not match its type.
    MalformedGeoJson(String),
    /// The geometry type keyword is not one of the six supported types.
    UnknownGeometryType(String),
    /// A geometry was constructed with a coordinate shape its type does not allow.
    InvalidGeometry(String),
    /// The operation is not defined for this geometry (e.g. bounding box of an empty geometry).
    UnsupportedGeometryOperation(String),
    /// A Baidu Mercator path string could not be decoded.
    MalformedBaiduPath(String),
    /// A datum name is not one of WGS-84, GCJ-02 or BD-09.
    UnknownDatum(String),
    /// A rounding precision asks for more digits than an `f64` carries.
    InvalidPrecision(String),
}

impl std::fmt::Display for GeoshiftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoshiftError::MalformedWkt(msg) => write!(f, "Malformed WKT: {}", msg),
            GeoshiftError::MalformedGeoJson(msg) => write!(f, "Malformed GeoJSON: {}", msg),
            GeoshiftError::UnknownGeometryType(t) => write!(f, "Unknown geometry type: {}", t),
            GeoshiftError::InvalidGeometry(msg) => write!(f, "Invalid geometry: {}", msg),
            GeoshiftError::UnsupportedGeometryOperation(msg) => {
                write!(f, "Unsupported geometry operation: {}", msg)
            }
            GeoshiftError::MalformedBaiduPath(msg) => write!(f, "Malformed Baidu path: {}", msg),
            GeoshiftError::UnknownDatum(name) => write!(f, "Unknown datum: {}", name),
            GeoshiftError::InvalidPrecision(msg) => write!(f, "Invalid precision: {}", msg),
        }
    }
}

impl std::error::Error for GeoshiftError {}
