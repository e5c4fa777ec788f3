//! Conversions between [`Value`] and `serde_json::Value`.
//!
//! JSON objects become maps of text keys to any element, arrays become lists of
//! any element. Integers keep their signedness where they fit an `i64`.

use serde_json::{Map as JsonMap, Number};

use super::{Kind, List, Map, Value};

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => from_number(&n),
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect::<List>())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect::<Map>(),
            ),
        }
    }
}

fn from_number(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Int(i)
    } else if let Some(u) = n.as_u64() {
        Value::Uint(u)
    } else {
        n.as_f64().map_or(Value::Null, Value::Float)
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        value.to_json()
    }
}

impl Value {
    /// Converts to a `serde_json::Value`.
    ///
    /// Map keys are rendered as strings and non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(n) => serde_json::Value::Number((*n).into()),
            Value::Uint(n) => serde_json::Value::Number((*n).into()),
            Value::Float(n) => {
                Number::from_f64(*n).map_or(serde_json::Value::Null, serde_json::Value::Number)
            }
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::List(list) => {
                list.with_items(|items| items.iter().map(Value::to_json).collect())
            }
            Value::Map(map) => map.with_entries(|entries| {
                serde_json::Value::Object(
                    entries
                        .iter()
                        .map(|(key, value)| (key.to_string(), value.to_json()))
                        .collect::<JsonMap<_, _>>(),
                )
            }),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

impl Kind {
    /// The kind a JSON value converts into.
    pub fn of_json(value: &serde_json::Value) -> Kind {
        match value {
            serde_json::Value::Null => Kind::Null,
            serde_json::Value::Bool(_) => Kind::Bool,
            serde_json::Value::Number(n) => from_number(n).kind(),
            serde_json::Value::String(_) => Kind::Text,
            serde_json::Value::Array(_) => Kind::List,
            serde_json::Value::Object(_) => Kind::Map,
        }
    }
}
