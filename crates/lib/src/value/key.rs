//! Keys of associative containers.

use std::fmt;

use super::{Kind, Value};

/// A map key.
///
/// Only scalar kinds with total equality can be keys, so floats, null and
/// containers are excluded. Keys of different kinds never compare equal:
/// `Key::Int(1)` and `Key::Text("1")` are distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Text(String),
}

impl Key {
    /// Converts a value into a key, or `None` if its kind cannot be a key.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Key::Bool(*b)),
            Value::Int(n) => Some(Key::Int(*n)),
            Value::Uint(n) => Some(Key::Uint(*n)),
            Value::Text(s) => Some(Key::Text(s.clone())),
            _ => None,
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Key::Bool(_) => Kind::Bool,
            Key::Int(_) => Kind::Int,
            Key::Uint(_) => Kind::Uint,
            Key::Text(_) => Kind::Text,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Key::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Key::Bool(b) => Value::Bool(b),
            Key::Int(n) => Value::Int(n),
            Key::Uint(n) => Value::Uint(n),
            Key::Text(s) => Value::Text(s),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Bool(b) => write!(f, "{b}"),
            Key::Int(n) => write!(f, "{n}"),
            Key::Uint(n) => write!(f, "{n}"),
            Key::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Text(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Text(value)
    }
}

impl From<bool> for Key {
    fn from(value: bool) -> Self {
        Key::Bool(value)
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Int(i64::from(value))
    }
}

impl From<u64> for Key {
    fn from(value: u64) -> Self {
        Key::Uint(value)
    }
}

impl From<u32> for Key {
    fn from(value: u32) -> Self {
        Key::Uint(u64::from(value))
    }
}
