//! Cell value coercions shared by filtering, sorting, and display.
//!
//! Records are opaque, so every accessor yields a loosely typed
//! [`serde_json::Value`]. An accessor that produces nothing at all (no
//! getter, no field, or a missing key) is represented as `None`, which is
//! distinct from an explicit JSON `null`: the two display the same but
//! coerce differently (`null` is the number 0, absence is not a number).

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

// =============================================================================
// String form
// =============================================================================

/// Loose string form of a raw value.
///
/// Absent values render as `"undefined"`, `null` as `"null"`, arrays join
/// their elements with commas, and objects collapse to `"[object Object]"`.
/// Used wherever a value is compared or matched as text.
pub fn to_js_string(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(value) => value_to_string(value),
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                format_number(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => value_to_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Format a float without a trailing `.0` for integral values.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.fract() == 0.0 {
        format!("{n:.0}")
    } else {
        format!("{n}")
    }
}

/// Display form of a raw value: empty for absent or `null`, otherwise the
/// loose string form.
pub fn display_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(value) => value_to_string(value),
    }
}

// =============================================================================
// Number coercion
// =============================================================================

/// Coerce a raw value to a number. Non-numeric input yields NaN.
pub fn to_number(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => parse_number(s),
        Some(array @ Value::Array(_)) => parse_number(&value_to_string(array)),
        Some(Value::Object(_)) => f64::NAN,
    }
}

/// Parse a numeric string. Whitespace is trimmed and the empty string is 0.
pub fn parse_number(input: &str) -> f64 {
    let s = input.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&s[2..], radix)
            .map(|n| n as f64)
            .unwrap_or(f64::NAN);
    }

    // Rust's float grammar also accepts "inf" and "nan", which are not numbers here.
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

// =============================================================================
// Dates
// =============================================================================

/// Whether a raw value counts as present for date parsing.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// Parse a raw cell value as a timestamp in epoch milliseconds.
///
/// Empty, `null`, `false`, and zero values never parse.
pub fn date_millis(value: Option<&Value>) -> Option<i64> {
    if !is_truthy(value) {
        return None;
    }
    parse_date_millis(&to_js_string(value))
}

/// Parse a date string in epoch milliseconds.
///
/// Accepts RFC 3339, RFC 2822, bare `YYYY-MM-DD`, `YYYY/MM/DD`, `MM/DD/YYYY`
/// and ISO-like local date-times. Strings without an offset are read as UTC.
pub fn parse_date_millis(input: &str) -> Option<i64> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.timestamp_millis());
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    for format in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc().timestamp_millis());
        }
    }
    None
}

// =============================================================================
// Comparison
// =============================================================================

/// Locale-style string ordering: case-insensitive first, lowercase before
/// uppercase on ties.
pub fn locale_compare(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| right.cmp(left))
}

/// Strict equality of two raw values.
pub fn strict_equals(left: Option<&Value>, right: Option<&Value>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(l), Some(r)) => l == r,
        _ => false,
    }
}

/// Default cell ordering.
///
/// Equal values tie; values that both coerce to finite numbers compare
/// numerically; anything else compares by string form.
pub fn default_compare(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    if strict_equals(left, right) {
        return Ordering::Equal;
    }
    let l = to_number(left);
    let r = to_number(right);
    if l.is_finite() && r.is_finite() {
        return l.partial_cmp(&r).unwrap_or(Ordering::Equal);
    }
    locale_compare(&to_js_string(left), &to_js_string(right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_number_coercions() {
        assert!(to_number(None).is_nan());
        assert_eq!(to_number(Some(&Value::Null)), 0.0);
        assert_eq!(to_number(Some(&json!(true))), 1.0);
        assert_eq!(to_number(Some(&json!(" 42 "))), 42.0);
        assert_eq!(to_number(Some(&json!(""))), 0.0);
        assert_eq!(to_number(Some(&json!("0x1F"))), 31.0);
        assert!(to_number(Some(&json!("inf"))).is_nan());
        assert!(to_number(Some(&json!("12abc"))).is_nan());
        assert_eq!(to_number(Some(&json!([7]))), 7.0);
        assert!(to_number(Some(&json!({"a": 1}))).is_nan());
    }

    #[test]
    fn test_string_forms() {
        assert_eq!(to_js_string(None), "undefined");
        assert_eq!(to_js_string(Some(&Value::Null)), "null");
        assert_eq!(to_js_string(Some(&json!(3.0))), "3");
        assert_eq!(to_js_string(Some(&json!(2.5))), "2.5");
        assert_eq!(to_js_string(Some(&json!([1, null, "a"]))), "1,,a");
        assert_eq!(display_string(None), "");
        assert_eq!(display_string(Some(&Value::Null)), "");
        assert_eq!(display_string(Some(&json!(false))), "false");
    }

    #[test]
    fn test_dates() {
        assert_eq!(parse_date_millis("1970-01-02"), Some(86_400_000));
        assert_eq!(
            parse_date_millis("1970-01-01T00:00:01Z"),
            Some(1_000)
        );
        assert_eq!(parse_date_millis("not a date"), None);
        assert_eq!(date_millis(Some(&json!(""))), None);
        assert_eq!(date_millis(Some(&Value::Null)), None);
    }

    #[test]
    fn test_default_compare() {
        assert_eq!(
            default_compare(Some(&json!(2)), Some(&json!(10))),
            Ordering::Less
        );
        assert_eq!(
            default_compare(Some(&json!("10")), Some(&json!(9))),
            Ordering::Greater
        );
        assert_eq!(
            default_compare(Some(&json!("b")), Some(&json!("A"))),
            Ordering::Greater
        );
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(default_compare(None, None), Ordering::Equal);
    }
}
