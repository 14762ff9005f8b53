//! Display formatting for statistics and counts.

/// Glyph shown for a missing statistic or an empty group (U+2205).
pub const EMPTY_SET: &str = "\u{2205}";

/// Significant digits used for p-value and log-rank display.
pub const STAT_PRECISION: usize = 4;

/// Format a p-value or log-rank statistic.
///
/// `None` and non-finite values render as [`EMPTY_SET`].
pub fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => to_precision(v, STAT_PRECISION),
        _ => EMPTY_SET.to_string(),
    }
}

/// Fractional digits at which `{:e}` prints any `f64` exactly.
const EXACT_DIGITS: usize = 800;

/// Format `value` with `digits` significant digits (clamped to 1..=100).
///
/// Fixed notation is used while the decimal exponent lies in
/// `[-6, digits)`, exponential notation otherwise (`1.235e-7`, `1.235e+21`).
/// Exact ties round up (`0.015625` -> `0.01563`) and negative zero prints
/// as zero.
pub fn to_precision(value: f64, digits: usize) -> String {
    let digits = digits.clamp(1, 100);
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return match digits {
            1 => "0".to_string(),
            _ => format!("0.{}", "0".repeat(digits - 1)),
        };
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let (significand, exponent) = round_significand(value.abs(), digits);
    let body = if exponent < -6 || exponent >= digits as i32 {
        let (lead, rest) = significand.split_at(1);
        let mantissa = if rest.is_empty() {
            lead.to_string()
        } else {
            format!("{}.{}", lead, rest)
        };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{}", mantissa, exp_sign, exponent.abs())
    } else if exponent >= 0 {
        let (int, frac) = significand.split_at(exponent as usize + 1);
        if frac.is_empty() {
            int.to_string()
        } else {
            format!("{}.{}", int, frac)
        }
    } else {
        format!("0.{}{}", "0".repeat((-exponent - 1) as usize), significand)
    };
    format!("{}{}", sign, body)
}

/// First `digits` significant digits of a positive finite `value`, rounded
/// half up, and the decimal exponent of the leading digit.
///
/// Rounding is done on the exact decimal expansion, read after rounding so
/// 9.99995 becomes `1000` with exponent 1.
fn round_significand(value: f64, digits: usize) -> (String, i32) {
    let exact = format!("{:.*e}", EXACT_DIGITS, value);
    let (mantissa, exp) = exact.split_once('e').unwrap_or((exact.as_str(), "0"));
    let mut exponent: i32 = exp.parse().unwrap_or(0);
    let all: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();

    let mut head = all[..digits].to_vec();
    if all[digits] >= b'5' {
        let mut i = digits;
        loop {
            if i == 0 {
                // 9.99.. carried past the leading digit
                head.insert(0, b'1');
                head.pop();
                exponent += 1;
                break;
            }
            i -= 1;
            if head[i] == b'9' {
                head[i] = b'0';
            } else {
                head[i] += 1;
                break;
            }
        }
    }
    (String::from_utf8(head).unwrap_or_default(), exponent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values_use_empty_set() {
        assert_eq!(format_stat(None), "\u{2205}");
        assert_eq!(format_stat(Some(f64::NAN)), EMPTY_SET);
        assert_eq!(format_stat(Some(f64::INFINITY)), EMPTY_SET);
    }

    #[test]
    fn test_four_significant_digits() {
        assert_eq!(format_stat(Some(0.000123456)), "0.0001235");
        assert_eq!(format_stat(Some(0.05)), "0.05000");
        assert_eq!(format_stat(Some(12.3456)), "12.35");
        assert_eq!(format_stat(Some(1234.5678)), "1235");
        assert_eq!(format_stat(Some(0.0)), "0.000");
        assert_eq!(format_stat(Some(-3.14159)), "-3.142");
    }

    #[test]
    fn test_exponential_notation() {
        assert_eq!(format_stat(Some(12346.0)), "1.235e+4");
        assert_eq!(format_stat(Some(1.23456e-7)), "1.235e-7");
        assert_eq!(format_stat(Some(6.02e23)), "6.020e+23");
    }

    #[test]
    fn test_rounding_carries_into_exponent() {
        assert_eq!(to_precision(9.99995, 4), "10.00");
        assert_eq!(to_precision(9999.6, 4), "1.000e+4");
    }

    #[test]
    fn test_exact_ties_round_up() {
        assert_eq!(to_precision(0.015625, 4), "0.01563");
        assert_eq!(to_precision(2.5, 1), "3");
        assert_eq!(to_precision(-0.015625, 4), "-0.01563");
        assert_eq!(to_precision(1e-6, 4), "0.000001000");
    }

    #[test]
    fn test_negative_zero_prints_as_zero() {
        assert_eq!(format_stat(Some(-0.0)), "0.000");
        assert_eq!(to_precision(-0.0, 1), "0");
    }

    #[test]
    fn test_reformatting_is_stable() {
        for v in [0.000123456, 0.04999, 3.0e-9, 17.77777, 98765.4321, 0.5] {
            let shown = format_stat(Some(v));
            let reparsed: f64 = shown.parse().unwrap();
            assert_eq!(format_stat(Some(reparsed)), shown);
        }
    }
}
