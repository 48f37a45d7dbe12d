//! Human-readable formatting of durations and byte sizes

use crate::error::{AuditError, Result};

const BYTE_UNITS: [&str; 9] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];
const KIB: f64 = 1024.0;

/// Default number of decimal places for [`format_bytes`]
pub const DEFAULT_DECIMALS: usize = 2;

/// Format a duration given in milliseconds.
///
/// Below one second renders whole milliseconds (`950ms`), otherwise seconds
/// with one decimal (`2.9s`). Negative and non-finite input is rejected.
pub fn format_duration(ms: f64) -> Result<String> {
    if !ms.is_finite() || ms < 0.0 {
        return Err(AuditError::InvalidInput(format!(
            "duration must be a non-negative number of milliseconds, got {}",
            ms
        )));
    }
    let rounded = ms.round();
    if rounded < 1000.0 {
        Ok(format!("{}ms", rounded as u64))
    } else {
        Ok(format!("{:.1}s", ms / 1000.0))
    }
}

/// Format a byte count using the largest unit whose scaled value stays below 1024.
///
/// Trailing zeros are trimmed, so `1536` renders as `1.5 KB` and `1024` as `1 KB`.
pub fn format_bytes(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= KIB && unit < BYTE_UNITS.len() - 1 {
        value /= KIB;
        unit += 1;
    }

    let mut text = format!("{:.*}", decimals, value);
    // rounding can carry the value up to the next unit (1023.996 KB -> 1 MB)
    if unit < BYTE_UNITS.len() - 1 && text.parse::<f64>().is_ok_and(|v| v >= KIB) {
        value /= KIB;
        unit += 1;
        text = format!("{:.*}", decimals, value);
    }

    format!("{} {}", trim_decimal(&text), BYTE_UNITS[unit])
}

fn trim_decimal(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Parse output of [`format_bytes`] back into a byte count
pub fn parse_bytes(text: &str) -> Result<f64> {
    let invalid = || AuditError::InvalidInput(format!("not a byte size: {:?}", text));

    let mut parts = text.split_whitespace();
    let number = parts.next().ok_or_else(invalid)?;
    let unit = parts.next().ok_or_else(invalid)?;
    if parts.next().is_some() {
        return Err(invalid());
    }

    let value: f64 = number.parse().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    let exponent = BYTE_UNITS
        .iter()
        .position(|u| u.eq_ignore_ascii_case(unit))
        .ok_or_else(invalid)?;

    Ok(value * KIB.powi(exponent as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_milliseconds() {
        assert_eq!(format_duration(950.0).unwrap(), "950ms");
        assert_eq!(format_duration(0.0).unwrap(), "0ms");
        assert_eq!(format_duration(999.0).unwrap(), "999ms");
        assert_eq!(format_duration(999.4).unwrap(), "999ms");
    }

    #[test]
    fn test_duration_rounding_up_switches_to_seconds() {
        assert_eq!(format_duration(999.6).unwrap(), "1.0s");
        assert_eq!(format_duration(999.5).unwrap(), "1.0s");
    }

    #[test]
    fn test_duration_seconds() {
        assert_eq!(format_duration(2860.0).unwrap(), "2.9s");
        assert_eq!(format_duration(1000.0).unwrap(), "1.0s");
        assert_eq!(format_duration(1200.0).unwrap(), "1.2s");
    }

    #[test]
    fn test_duration_rejects_negative() {
        assert!(matches!(
            format_duration(-1.0),
            Err(AuditError::InvalidInput(_))
        ));
        assert!(format_duration(f64::NAN).is_err());
        assert!(format_duration(f64::INFINITY).is_err());
    }

    #[test]
    fn test_bytes_zero() {
        assert_eq!(format_bytes(0, DEFAULT_DECIMALS), "0 Bytes");
    }

    #[test]
    fn test_bytes_units() {
        assert_eq!(format_bytes(1536, DEFAULT_DECIMALS), "1.5 KB");
        assert_eq!(format_bytes(1024, DEFAULT_DECIMALS), "1 KB");
        assert_eq!(format_bytes(500, DEFAULT_DECIMALS), "500 Bytes");
        assert_eq!(format_bytes(1_048_576, DEFAULT_DECIMALS), "1 MB");
        assert_eq!(format_bytes(1_234_567, DEFAULT_DECIMALS), "1.18 MB");
        assert_eq!(format_bytes(1_234_567, 0), "1 MB");
    }

    #[test]
    fn test_bytes_rounding_carries_into_next_unit() {
        assert_eq!(format_bytes(1_048_575, DEFAULT_DECIMALS), "1 MB");
        assert_eq!(format_bytes(1_048_572, 0), "1 MB");
        assert_eq!(format_bytes(1_023, 0), "1023 Bytes");
    }

    #[test]
    fn test_bytes_largest_unit_caps_at_exabytes_for_u64() {
        assert_eq!(format_bytes(u64::MAX, 0), "16 EB");
    }

    #[test]
    fn test_parse_bytes() {
        assert_eq!(parse_bytes("1.5 KB").unwrap(), 1536.0);
        assert_eq!(parse_bytes("0 Bytes").unwrap(), 0.0);
        assert_eq!(parse_bytes("2 mb").unwrap(), 2.0 * 1024.0 * 1024.0);
    }

    #[test]
    fn test_parse_bytes_rejects_garbage() {
        assert!(parse_bytes("").is_err());
        assert!(parse_bytes("12").is_err());
        assert!(parse_bytes("x KB").is_err());
        assert!(parse_bytes("1 QB").is_err());
        assert!(parse_bytes("-1 KB").is_err());
        assert!(parse_bytes("1 KB extra").is_err());
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn format_then_parse_recovers_magnitude(bytes in 1u64..=1_000_000_000_000_000, decimals in 0usize..=4) {
            let formatted = format_bytes(bytes, decimals);
            let parsed = parse_bytes(&formatted).unwrap();
            let relative = (parsed - bytes as f64).abs() / bytes as f64;
            prop_assert!(relative <= 10f64.powi(-(decimals as i32)), "{} -> {} -> {}", bytes, formatted, parsed);
        }

        #[test]
        fn scaled_value_stays_below_unit_boundary(bytes in 1u64..u64::MAX) {
            let formatted = format_bytes(bytes, 2);
            let number: f64 = formatted.split_whitespace().next().unwrap().parse().unwrap();
            prop_assert!(number < 1024.0, "{}", formatted);
        }

        #[test]
        fn duration_suffix_matches_range(ms in 0f64..100_000.0) {
            let formatted = format_duration(ms).unwrap();
            if ms.round() < 1000.0 {
                prop_assert!(formatted.ends_with("ms"));
            } else {
                prop_assert!(formatted.ends_with('s') && !formatted.ends_with("ms"));
            }
        }
    }
}
