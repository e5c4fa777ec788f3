//! Scalar casting primitives.
//!
//! Pure, deterministic conversions between scalar representations. They back
//! both the [coercion bridge](crate::coerce) used by writes and the typed
//! accessors on [`Tree`](crate::Tree).
//!
//! | from \ to | int            | float     | bool              | text             |
//! |-----------|----------------|-----------|-------------------|------------------|
//! | bool      | 0 / 1          | 0.0 / 1.0 | itself            | `true` / `false` |
//! | int, uint | if in range    | widened   | `!= 0`            | decimal          |
//! | float     | truncated      | itself    | `!= 0`            | shortest repr    |
//! | text      | int, else float truncated | parsed | `true`/`false`, else numeric `!= 0` | itself |
//!
//! Null and containers never cast to a scalar.

use std::collections::BTreeMap;

use crate::value::Value;

// 2^63 is exactly representable; i64::MAX is not.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
const U64_BOUND: f64 = 18_446_744_073_709_551_616.0;

fn float_to_int(f: f64) -> Option<i64> {
    if !f.is_finite() {
        return None;
    }
    let t = f.trunc();
    (t >= -I64_BOUND && t < I64_BOUND).then_some(t as i64)
}

fn float_to_uint(f: f64) -> Option<u64> {
    if !f.is_finite() {
        return None;
    }
    let t = f.trunc();
    (t >= 0.0 && t < U64_BOUND).then_some(t as u64)
}

/// Casts to a signed integer.
///
/// ```
/// # use treepath::{cast::cast_int, value::Value};
/// assert_eq!(cast_int(&Value::from("1.5")), Some(1));
/// assert_eq!(cast_int(&Value::Float(-2.9)), Some(-2));
/// assert_eq!(cast_int(&Value::from("aaa")), None);
/// ```
pub fn cast_int(value: &Value) -> Option<i64> {
    match value {
        Value::Int(n) => Some(*n),
        Value::Uint(n) => i64::try_from(*n).ok(),
        Value::Float(f) => float_to_int(*f),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Text(s) => s
            .parse::<i64>()
            .ok()
            .or_else(|| s.parse::<f64>().ok().and_then(float_to_int)),
        _ => None,
    }
}

/// Casts to an unsigned integer; negative numbers do not cast.
pub fn cast_uint(value: &Value) -> Option<u64> {
    match value {
        Value::Uint(n) => Some(*n),
        Value::Int(n) => u64::try_from(*n).ok(),
        Value::Float(f) => float_to_uint(*f),
        Value::Bool(b) => Some(u64::from(*b)),
        Value::Text(s) => s
            .parse::<u64>()
            .ok()
            .or_else(|| s.parse::<f64>().ok().and_then(float_to_uint)),
        _ => None,
    }
}

/// Casts to a float.
pub fn cast_float(value: &Value) -> Option<f64> {
    match value {
        Value::Float(f) => Some(*f),
        Value::Int(n) => Some(*n as f64),
        Value::Uint(n) => Some(*n as f64),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Text(s) => s.parse::<f64>().ok(),
        _ => None,
    }
}

/// Casts to a boolean using the truthiness table in the module docs.
///
/// ```
/// # use treepath::{cast::cast_bool, value::Value};
/// assert_eq!(cast_bool(&Value::from("TRUE")), Some(true));
/// assert_eq!(cast_bool(&Value::from("0.0")), Some(false));
/// assert_eq!(cast_bool(&Value::Int(12)), Some(true));
/// assert_eq!(cast_bool(&Value::from("yes")), None);
/// ```
pub fn cast_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Int(n) => Some(*n != 0),
        Value::Uint(n) => Some(*n != 0),
        Value::Float(f) => Some(*f != 0.0),
        Value::Text(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::Text(s) if s.eq_ignore_ascii_case("false") => Some(false),
        Value::Text(s) => s
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f != 0.0),
        _ => None,
    }
}

/// Casts to text.
pub fn cast_text(value: &Value) -> Option<String> {
    match value {
        Value::Text(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Int(n) => Some(n.to_string()),
        Value::Uint(n) => Some(n.to_string()),
        Value::Float(f) => Some(f.to_string()),
        _ => None,
    }
}

/// Casts every element of a list with `cast`; fails as a whole if any element fails.
///
/// Non-list values do not cast.
pub fn cast_list_with<T>(value: &Value, cast: impl Fn(&Value) -> Option<T>) -> Option<Vec<T>> {
    let list = value.as_list()?;
    list.with_items(|items| items.iter().map(&cast).collect())
}

/// Casts a map into text keys and `cast` values; fails as a whole if any entry fails.
///
/// Non-map values do not cast.
pub fn cast_map_with<T>(
    value: &Value,
    cast: impl Fn(&Value) -> Option<T>,
) -> Option<BTreeMap<String, T>> {
    let map = value.as_map()?;
    map.with_entries(|entries| {
        entries
            .iter()
            .map(|(key, value)| Some((cast_text(&key.clone().into_value())?, cast(value)?)))
            .collect()
    })
}
