use crate::util::error::GeoshiftError;
use serde::{Deserialize, Serialize};

/// Nudge added before rounding so values stored as `x.xxx4999999` round as `x.xxx5`.
pub const ROUNDING_EPSILON: f64 = 1e-10;

/// Decimal digits kept by the `(lon, lat)` tuple transforms.
pub const LNGLAT_DIGITS: u8 = 7;

/// Decimal digits kept by the point and geometry-level transforms.
pub const POINT_DIGITS: u8 = 8;

/// Most decimal digits an `f64` ordinate carries meaningfully.
pub const MAX_DIGITS: u8 = 15;

/// Rounds half-up to `digits` decimal places after adding [`ROUNDING_EPSILON`].
///
/// The output of every datum transform passes through this function, so the
/// epsilon and the floor-at-half step are part of the numeric contract:
/// changing either breaks comparability with existing reference data.
/// Non-finite input is returned unchanged, and so is any value when `digits`
/// exceeds [`MAX_DIGITS`], since there is nothing left to round.
pub fn round_half_up(value: f64, digits: u8) -> f64 {
    if digits > MAX_DIGITS {
        return value;
    }
    let scale = 10f64.powi(i32::from(digits));
    ((value + ROUNDING_EPSILON) * scale + 0.5).floor() / scale
}

/// How many decimal digits a transform keeps.
///
/// Loading from configuration rejects `digits` above [`MAX_DIGITS`] with
/// [`GeoshiftError::InvalidPrecision`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "PrecisionConfig")]
pub enum Precision {
    /// Seven digits, as the tuple API.
    LngLat,
    /// Eight digits, as the point API.
    #[default]
    Point,
    /// An explicit number of digits, at most [`MAX_DIGITS`].
    Digits(u8),
    /// No rounding at all.
    Full,
}

/// Unchecked mirror of [`Precision`] as it appears in configuration.
#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum PrecisionConfig {
    LngLat,
    Point,
    Digits(u8),
    Full,
}

impl TryFrom<PrecisionConfig> for Precision {
    type Error = GeoshiftError;

    fn try_from(config: PrecisionConfig) -> Result<Self, Self::Error> {
        match config {
            PrecisionConfig::LngLat => Ok(Precision::LngLat),
            PrecisionConfig::Point => Ok(Precision::Point),
            PrecisionConfig::Digits(d) => Precision::digits(d),
            PrecisionConfig::Full => Ok(Precision::Full),
        }
    }
}

impl Precision {
    /// Checked constructor for [`Precision::Digits`].
    pub fn digits(digits: u8) -> Result<Self, GeoshiftError> {
        if digits > MAX_DIGITS {
            return Err(GeoshiftError::InvalidPrecision(format!(
                "{} digits requested, at most {} are supported",
                digits, MAX_DIGITS
            )));
        }
        Ok(Precision::Digits(digits))
    }

    /// Applies this precision to a single ordinate.
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Precision::LngLat => round_half_up(value, LNGLAT_DIGITS),
            Precision::Point => round_half_up(value, POINT_DIGITS),
            Precision::Digits(d) => round_half_up(value, d),
            Precision::Full => value,
        }
    }

    /// Applies this precision to a `(lon, lat)` pair.
    pub fn apply_pair(self, (lon, lat): (f64, f64)) -> (f64, f64) {
        (self.apply(lon), self.apply(lat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up_basic() {
        assert_eq!(round_half_up(1.23456785, 7), 1.2345679);
        assert_eq!(round_half_up(1.23456784, 7), 1.2345678);
        assert_eq!(round_half_up(2.5, 0), 3.0);
    }

    #[test]
    fn test_epsilon_rescues_binary_artifacts() {
        // 0.285 is stored as 0.28499999999999998
        assert_eq!(round_half_up(0.285, 2), 0.29);
        assert_eq!(round_half_up(1.005, 2), 1.01);
    }

    #[test]
    fn test_half_rounds_towards_positive_infinity() {
        assert_eq!(round_half_up(-2.5, 0), -2.0);
        assert_eq!(round_half_up(-2.6, 0), -3.0);
    }

    #[test]
    fn test_non_finite_passes_through() {
        assert!(round_half_up(f64::NAN, 7).is_nan());
        assert_eq!(round_half_up(f64::INFINITY, 7), f64::INFINITY);
    }

    #[test]
    fn test_digits_beyond_f64_are_rejected() {
        assert_eq!(Precision::digits(15), Ok(Precision::Digits(15)));
        assert!(matches!(
            Precision::digits(16),
            Err(GeoshiftError::InvalidPrecision(_))
        ));
        assert_eq!(round_half_up(121.5, 200), 121.5);
        assert_eq!(Precision::Digits(255).apply(121.5), 121.5);
    }

    #[test]
    fn test_precision_from_config() -> Result<(), serde_json::Error> {
        let p: Precision = serde_json::from_str(r#"{"digits":6}"#)?;
        assert_eq!(p, Precision::Digits(6));
        let p: Precision = serde_json::from_str(r#""lng_lat""#)?;
        assert_eq!(p, Precision::LngLat);

        let err = serde_json::from_str::<Precision>(r#"{"digits":20}"#);
        assert!(err.is_err_and(|e| e.to_string().contains("at most 15")));
        assert!(serde_json::from_str::<Precision>(r#"{"digits":400}"#).is_err());
        Ok(())
    }

    #[test]
    fn test_precision_variants() {
        let v = 121.505636445915;
        assert_eq!(Precision::LngLat.apply(v), 121.5056364);
        assert_eq!(Precision::Point.apply(v), 121.50563645);
        assert_eq!(Precision::Digits(3).apply(v), 121.506);
        assert_eq!(Precision::Full.apply(v), v);
    }
}
