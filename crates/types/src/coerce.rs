//! Permissive text-to-scalar coercion.
//!
//! Source documents are frequently incomplete, so numeric parsing never fails:
//! it reads the longest numeric prefix and falls back to zero.

use crate::kind::ScalarKind;
use crate::value::Value;

/// Parses a leading decimal integer the way C's `atoi` does: leading whitespace,
/// an optional sign, then digits up to the first non-digit. No digits yields 0.
/// Out-of-range values saturate.
pub fn parse_leading_int(text: &str) -> i64 {
    let s = text.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut acc: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        let d = i64::from(b - b'0');
        acc = if negative {
            acc.saturating_mul(10).saturating_sub(d)
        } else {
            acc.saturating_mul(10).saturating_add(d)
        };
    }
    acc
}

/// Parses a leading decimal floating point number the way C's `atof` does.
/// Accepts an optional sign, digits, a fractional part and an exponent. No number yields 0.0.
pub fn parse_leading_float(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return 0.0;
    }

    // An exponent only counts when at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'-' | b'+')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(0.0)
}

/// Converts a node's text content to a value of the given scalar kind.
/// Absent text content becomes [`Value::Null`] regardless of the kind.
pub fn coerce_scalar(kind: ScalarKind, text: Option<&str>) -> Value {
    let Some(text) = text else {
        return Value::Null;
    };
    match kind {
        ScalarKind::String => Value::String(text.to_string()),
        ScalarKind::Integer => Value::Integer(parse_leading_int(text)),
        ScalarKind::Float => Value::Float(parse_leading_float(text)),
        ScalarKind::Boolean => Value::Boolean(parse_leading_int(text) == 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_int() {
        assert_eq!(parse_leading_int("42"), 42);
        assert_eq!(parse_leading_int("  -17 kB"), -17);
        assert_eq!(parse_leading_int("+8"), 8);
        assert_eq!(parse_leading_int("2048 MB"), 2048);
        assert_eq!(parse_leading_int("notanumber"), 0);
        assert_eq!(parse_leading_int(""), 0);
        assert_eq!(parse_leading_int("0x1F"), 0);
        assert_eq!(parse_leading_int("99999999999999999999999"), i64::MAX);
        assert_eq!(parse_leading_int("-99999999999999999999999"), i64::MIN);
    }

    #[test]
    fn test_leading_float() {
        assert_eq!(parse_leading_float("3.5"), 3.5);
        assert_eq!(parse_leading_float(" -0.25V"), -0.25);
        assert_eq!(parse_leading_float("1e3"), 1000.0);
        assert_eq!(parse_leading_float("2.5e"), 2.5);
        assert_eq!(parse_leading_float(".5"), 0.5);
        assert_eq!(parse_leading_float("7."), 7.0);
        assert_eq!(parse_leading_float("abc"), 0.0);
        assert_eq!(parse_leading_float("-"), 0.0);
    }

    #[test]
    fn test_coerce_scalar() {
        assert_eq!(
            coerce_scalar(ScalarKind::String, Some(" raw ")),
            Value::String(" raw ".into())
        );
        assert_eq!(coerce_scalar(ScalarKind::Integer, Some("12abc")), Value::Integer(12));
        assert_eq!(coerce_scalar(ScalarKind::Float, Some("1.25")), Value::Float(1.25));
        assert_eq!(coerce_scalar(ScalarKind::Boolean, Some("1")), Value::Boolean(true));
        assert_eq!(coerce_scalar(ScalarKind::Boolean, Some("2")), Value::Boolean(false));
        assert_eq!(coerce_scalar(ScalarKind::Boolean, Some("yes")), Value::Boolean(false));
        assert_eq!(coerce_scalar(ScalarKind::Integer, None), Value::Null);
        assert_eq!(coerce_scalar(ScalarKind::String, None), Value::Null);
    }
}
