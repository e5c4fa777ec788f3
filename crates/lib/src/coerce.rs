//! Coercion bridge.
//!
//! Decides whether a value fits a declared slot kind and, when asked to,
//! converts it with the [`cast`](crate::cast) table. Nothing here mutates.

use crate::cast::{cast_bool, cast_float, cast_int, cast_text, cast_uint};
use crate::value::{Kind, Value};

/// Why a value could not be fitted into a slot. Carries the rejected value back.
#[derive(Debug, Clone, PartialEq)]
pub enum Unfit {
    /// The kinds differ and coercion was not allowed.
    Mismatch(Value),
    /// The kinds differ and no conversion exists.
    NotCoercible(Value),
}

/// Returns true if `value` can be stored as-is in a slot declared as `target`.
pub fn fits(value: &Value, target: Kind) -> bool {
    target == Kind::Any || value.kind() == target
}

/// Attempts to convert `value` into `target`.
///
/// Values that already fit are returned unchanged. Scalar targets go through
/// the cast table; null and container targets never convert.
///
/// ```
/// # use treepath::{coerce::attempt, value::{Kind, Value}};
/// assert_eq!(attempt(&Value::from("123"), Kind::Int), Some(Value::Int(123)));
/// assert_eq!(attempt(&Value::Bool(true), Kind::Text), Some(Value::from("true")));
/// assert_eq!(attempt(&Value::from("x"), Kind::Float), None);
/// ```
pub fn attempt(value: &Value, target: Kind) -> Option<Value> {
    if fits(value, target) {
        return Some(value.clone());
    }
    match target {
        Kind::Int => cast_int(value).map(Value::Int),
        Kind::Uint => cast_uint(value).map(Value::Uint),
        Kind::Float => cast_float(value).map(Value::Float),
        Kind::Bool => cast_bool(value).map(Value::Bool),
        Kind::Text => cast_text(value).map(Value::Text),
        Kind::Any | Kind::Null | Kind::List | Kind::Map => None,
    }
}

/// Fits `value` into a slot declared as `target`, converting only if `allow`.
pub fn fit(value: Value, target: Kind, allow: bool) -> Result<Value, Unfit> {
    if fits(&value, target) {
        return Ok(value);
    }
    if !allow {
        return Err(Unfit::Mismatch(value));
    }
    attempt(&value, target).ok_or(Unfit::NotCoercible(value))
}
