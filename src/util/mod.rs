pub mod coord;
pub mod error;
pub mod format;
pub mod precision;

pub use coord::Coordinate;
pub use error::GeoshiftError;
pub use format::format_g;
pub use precision::{
    LNGLAT_DIGITS, MAX_DIGITS, POINT_DIGITS, Precision, ROUNDING_EPSILON, round_half_up,
};
