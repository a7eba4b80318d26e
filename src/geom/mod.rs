pub mod convert;
pub mod geojson_codec;
pub mod geometry;
pub mod ops;
pub mod parse;
pub mod wkt_codec;

pub use geometry::{Coords, Geometry, GeometryType, Position, Ring, Rings};
pub use ops::is_clockwise;
pub use parse::parse_geometry;
