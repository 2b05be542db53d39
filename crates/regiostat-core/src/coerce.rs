//! Lenient numeric coercion for loosely-typed feed values.
//!
//! Upstream feeds are hand-maintained spreadsheets exported to JSON: counts
//! arrive as numbers, numeric strings, placeholder strings like `"н/д"`, empty
//! strings, or nulls. Every consumer downstream assumes a plain integer, so
//! anything malformed becomes `0` here and is never surfaced as an error.

use serde_json::Value;

/// Coerce a raw JSON value into an integer count.
///
/// - Integer numbers are returned unchanged.
/// - Fractional numbers are truncated toward zero.
/// - Strings are parsed base-10 with `parseInt` semantics: leading whitespace
///   is skipped, an optional sign is accepted, and the longest run of ASCII
///   digits is taken (`"12 чел."` → 12). No digits → 0.
/// - Everything else (null, bool, array, object) → 0.
///
/// Values outside the `i64` range coerce to 0.
pub fn safe_parse_int(value: &Value) -> i64 {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => i,
            None => n.as_f64().map(truncate_float).unwrap_or(0),
        },
        Value::String(s) => parse_int_prefix(s),
        _ => 0,
    }
}

/// Same as [`safe_parse_int`] for an optional value; a missing value is 0.
pub fn safe_parse_opt(value: Option<&Value>) -> i64 {
    value.map(safe_parse_int).unwrap_or(0)
}

fn truncate_float(f: f64) -> i64 {
    if !f.is_finite() || f.abs() >= i64::MAX as f64 {
        return 0;
    }
    f.trunc() as i64
}

fn parse_int_prefix(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return 0;
    }

    let mut acc: i64 = 0;
    for b in digits[..end].bytes() {
        let digit = (b - b'0') as i64;
        acc = match acc.checked_mul(10).and_then(|v| v.checked_add(digit)) {
            Some(v) => v,
            None => return 0,
        };
    }

    if negative { -acc } else { acc }
}
