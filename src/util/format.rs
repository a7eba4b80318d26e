/// Formats a float the way Go's `%g` verb does with no explicit precision.
///
/// The digits are the shortest string that round-trips to the same `f64`.
/// Exponent notation is used when the decimal exponent is below -4 or at
/// least 6, with a signed exponent of at least two digits (`1.5e+07`,
/// `1e-05`). Trailing zeros are never printed.
pub fn format_g(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let (digits, exp) = shortest_digits(value.abs());
    let mut out = String::with_capacity(digits.len() + 8);
    if value < 0.0 {
        out.push('-');
    }

    if !(-4..6).contains(&exp) {
        out.push_str(&digits[..1]);
        if digits.len() > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        out.push('e');
        out.push(if exp < 0 { '-' } else { '+' });
        let abs = exp.unsigned_abs();
        if abs < 10 {
            out.push('0');
        }
        out.push_str(&abs.to_string());
        return out;
    }

    let nd = digits.len() as i32;
    let dp = exp + 1;
    if dp > 0 {
        for i in 0..dp {
            out.push(digit_at(&digits, i));
        }
    } else {
        out.push('0');
    }
    let frac = (nd - dp).max(0);
    if frac > 0 {
        out.push('.');
        for i in 0..frac {
            out.push(digit_at(&digits, dp + i));
        }
    }
    out
}

/// Splits a positive finite value into its shortest significant digits and decimal exponent.
fn shortest_digits(value: f64) -> (String, i32) {
    // `{:e}` is the shortest round-trip form, e.g. "1.2345e3" or "5e-7".
    let sci = format!("{:e}", value);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.trim_end_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };
    (digits.to_string(), exp.parse().unwrap_or(0))
}

fn digit_at(digits: &str, i: i32) -> char {
    if i >= 0 {
        digits.as_bytes().get(i as usize).map_or('0', |&b| b as char)
    } else {
        '0'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_and_plain_decimals() {
        assert_eq!(format_g(1.0), "1");
        assert_eq!(format_g(2.0), "2");
        assert_eq!(format_g(-0.5), "-0.5");
        assert_eq!(format_g(121.5012091398), "121.5012091398");
        assert_eq!(format_g(100000.0), "100000");
        assert_eq!(format_g(0.0001), "0.0001");
    }

    #[test]
    fn test_exponent_switch() {
        assert_eq!(format_g(1000000.0), "1e+06");
        assert_eq!(format_g(1234567.0), "1.234567e+06");
        assert_eq!(format_g(13534914.0122), "1.35349140122e+07");
        assert_eq!(format_g(0.00001), "1e-05");
        assert_eq!(format_g(-0.000012), "-1.2e-05");
        assert_eq!(format_g(1e300), "1e+300");
    }

    #[test]
    fn test_special_values() {
        assert_eq!(format_g(0.0), "0");
        assert_eq!(format_g(-0.0), "-0");
        assert_eq!(format_g(f64::NAN), "NaN");
        assert_eq!(format_g(f64::INFINITY), "+Inf");
        assert_eq!(format_g(f64::NEG_INFINITY), "-Inf");
    }

    #[test]
    fn test_output_round_trips() {
        for v in [31.2355502882, 0.1 + 0.2, 1.0 / 3.0, 123456.789, 4.9e-324] {
            let s = format_g(v);
            assert_eq!(s.parse::<f64>().unwrap(), v, "{}", s);
        }
    }
}
