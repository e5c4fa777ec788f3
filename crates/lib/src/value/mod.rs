//! The dynamically typed value model walked by a [`Tree`](crate::Tree).
//!
//! Every value is exactly one of three shapes:
//!
//! - a **scalar** leaf ([`Value::Null`], [`Value::Bool`], [`Value::Int`],
//!   [`Value::Uint`], [`Value::Float`], [`Value::Text`]),
//! - an **ordered** container ([`Value::List`]),
//! - an **associative** container ([`Value::Map`]).
//!
//! Containers carry the [`Kind`] they declare for their elements (and keys, for
//! maps). A declared kind of [`Kind::Any`] accepts every value; any other kind
//! only accepts values of exactly that kind unless a write asks for coercion.
//!
//! Containers are backed either by value or by reference, see [`Ownership`].
//!
//! # Examples
//!
//! ```
//! use treepath::value::{Kind, List, Value};
//!
//! let ints = Value::from(vec![1i64, 2, 3]);
//! assert!(ints.is_list());
//! assert_eq!(ints.as_list().map(List::elem_kind), Some(Kind::Int));
//!
//! let text = Value::from("hello");
//! assert_eq!(text.kind(), Kind::Text);
//! assert!(text == "hello");
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

mod handle;
#[cfg(feature = "json")]
mod json;
pub mod key;
pub mod list;
pub mod map;

pub use handle::Ownership;
pub use key::Key;
pub use list::List;
pub use map::Map;

/// The runtime kind of a value, or the declared kind of a container slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Declared-only: the slot accepts values of every kind.
    Any,
    Null,
    Bool,
    Int,
    Uint,
    Float,
    Text,
    List,
    Map,
}

impl Kind {
    /// Returns true if this kind names a container.
    pub fn is_container(self) -> bool {
        matches!(self, Kind::List | Kind::Map)
    }

    /// Returns true if a map may declare this kind for its keys.
    pub fn is_key_kind(self) -> bool {
        matches!(
            self,
            Kind::Any | Kind::Bool | Kind::Int | Kind::Uint | Kind::Text
        )
    }

    /// Returns the lowercase name of the kind
    pub fn name(self) -> &'static str {
        match self {
            Kind::Any => "any",
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::Text => "text",
            Kind::List => "list",
            Kind::Map => "map",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A dynamically typed value.
///
/// Equality compares contents and declared kinds; whether a container is held
/// by value or by reference does not take part in the comparison.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    // Scalars
    /// Null/absent value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Signed 64-bit integer
    Int(i64),
    /// Unsigned 64-bit integer
    Uint(u64),
    /// 64-bit float
    Float(f64),
    /// UTF-8 text
    Text(String),

    // Containers
    /// Ordered container
    List(List),
    /// Associative container
    Map(Map),
}

impl Value {
    /// Classifies the value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Uint(_) => Kind::Uint,
            Value::Float(_) => Kind::Float,
            Value::Text(_) => Kind::Text,
            Value::List(_) => Kind::List,
            Value::Map(_) => Kind::Map,
        }
    }

    /// Returns true for leaf values
    pub fn is_scalar(&self) -> bool {
        !self.is_container()
    }

    /// Returns true for lists and maps
    pub fn is_container(&self) -> bool {
        matches!(self, Value::List(_) | Value::Map(_))
    }

    /// Returns true if this is an ordered container
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Returns true if this is an associative container
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Returns true if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns how the container's backing store is held, or `None` for scalars.
    pub fn ownership(&self) -> Option<Ownership> {
        match self {
            Value::List(list) => Some(list.ownership()),
            Value::Map(map) => Some(map.ownership()),
            _ => None,
        }
    }

    /// Returns true if this is a container backed by reference.
    pub fn is_shared(&self) -> bool {
        self.ownership() == Some(Ownership::ByReference)
    }

    /// Converts a by-value container into a by-reference one.
    ///
    /// Scalars and already shared containers are returned unchanged. Clones of the
    /// returned value alias the same backing store.
    pub fn into_shared(mut self) -> Self {
        self.share();
        self
    }

    /// In-place variant of [`Value::into_shared`].
    pub(crate) fn share(&mut self) {
        match self {
            Value::List(list) => list.share(),
            Value::Map(map) => map.share(),
            _ => {}
        }
    }

    /// Turns a by-reference container back into a by-value one.
    ///
    /// The backing store is moved out when this is the only holder, copied otherwise.
    pub(crate) fn unshare(&mut self) {
        match self {
            Value::List(list) => list.unshare(),
            Value::Map(map) => map.unshare(),
            _ => {}
        }
    }

    /// Identity of the backing store of a shared container.
    pub(crate) fn store_id(&self) -> Option<usize> {
        match self {
            Value::List(list) => list.store_id(),
            Value::Map(map) => map.store_id(),
            _ => None,
        }
    }

    /// Collects the identities of every shared store reachable from this value.
    ///
    /// Each store is entered once, so a cyclic structure terminates.
    pub(crate) fn collect_stores(&self, stores: &mut HashSet<usize>) {
        if let Some(id) = self.store_id() {
            if !stores.insert(id) {
                return;
            }
        }
        match self {
            Value::List(list) => list.with_items(|items| {
                items.iter().for_each(|item| item.collect_stores(stores));
            }),
            Value::Map(map) => map.with_entries(|entries| {
                entries.values().for_each(|value| value.collect_stores(stores));
            }),
            _ => {}
        }
    }

    /// Attempts to convert to a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to convert to a signed integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to convert to an unsigned integer
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Value::Uint(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to convert to a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to convert to a string slice
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to convert to a list reference
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Attempts to convert to a mutable list reference
    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Attempts to convert to a map reference
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Attempts to convert to a mutable map reference
    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Converts to a compact JSON-like string for display and debugging.
    ///
    /// Map keys are always rendered as strings. Non-finite floats render as `null`.
    ///
    /// ```
    /// # use treepath::value::Value;
    /// let value = Value::from(vec!["a", "b"]);
    /// assert_eq!(value.to_json_string(), r#"["a","b"]"#);
    /// ```
    pub fn to_json_string(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Uint(n) => n.to_string(),
            Value::Float(n) if n.is_finite() => n.to_string(),
            Value::Float(_) => "null".to_string(),
            Value::Text(s) => quote(s),
            Value::List(list) => list.with_items(|items| {
                let mut result = String::with_capacity(items.len() * 8);
                result.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        result.push(',');
                    }
                    result.push_str(&item.to_json_string());
                }
                result.push(']');
                result
            }),
            Value::Map(map) => map.with_entries(|entries| {
                let mut result = String::with_capacity(entries.len() * 16);
                result.push('{');
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        result.push(',');
                    }
                    result.push_str(&quote(&key.to_string()));
                    result.push(':');
                    result.push_str(&value.to_json_string());
                }
                result.push('}');
                result
            }),
        }
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Uint(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::List(list) => write!(f, "{list}"),
            Value::Map(map) => write!(f, "{map}"),
        }
    }
}

impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Uint(n) => serializer.serialize_u64(*n),
            Value::Float(n) if n.is_finite() => serializer.serialize_f64(*n),
            Value::Float(_) => serializer.serialize_unit(),
            Value::Text(s) => serializer.serialize_str(s),
            Value::List(list) => serde::Serialize::serialize(list, serializer),
            Value::Map(map) => serde::Serialize::serialize(map, serializer),
        }
    }
}

/// Rust types whose values always map onto a single [`Kind`].
///
/// Used to give containers built from native collections a precise declared
/// element kind, so `Vec<i64>` becomes a list of [`Kind::Int`] while
/// `Vec<Value>` stays a list of [`Kind::Any`].
pub trait Element: Into<Value> {
    /// Kind every value of this type converts into.
    const KIND: Kind;
}

macro_rules! numeric_element {
    ($($ty:ty => $kind:ident($wide:ty);)*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$kind(<$wide>::from(value))
                }
            }

            impl Element for $ty {
                const KIND: Kind = Kind::$kind;
            }
        )*
    };
}

numeric_element! {
    i64 => Int(i64);
    i32 => Int(i64);
    i16 => Int(i64);
    i8 => Int(i64);
    u64 => Uint(u64);
    u32 => Uint(u64);
    u16 => Uint(u64);
    u8 => Uint(u64);
    f64 => Float(f64);
    f32 => Float(f64);
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl Element for bool {
    const KIND: Kind = Kind::Bool;
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl Element for String {
    const KIND: Kind = Kind::Text;
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl Element for &str {
    const KIND: Kind = Kind::Text;
}

impl From<List> for Value {
    fn from(value: List) -> Self {
        Value::List(value)
    }
}

impl Element for List {
    const KIND: Kind = Kind::List;
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Map(value)
    }
}

impl Element for Map {
    const KIND: Kind = Kind::Map;
}

impl Element for Value {
    const KIND: Kind = Kind::Any;
}

impl<T: Element> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(List::from(items))
    }
}

impl<T: Element> From<BTreeMap<String, T>> for Value {
    fn from(entries: BTreeMap<String, T>) -> Self {
        Value::Map(Map::from(entries))
    }
}

impl<T: Element> From<HashMap<String, T>> for Value {
    fn from(entries: HashMap<String, T>) -> Self {
        Value::Map(Map::from(entries))
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        key.into_value()
    }
}

// PartialEq implementations for comparing Value with primitives
impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Value::Text(s) if s == other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        self == other.as_str()
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Value::Int(n) if n == other)
    }
}

impl PartialEq<u64> for Value {
    fn eq(&self, other: &u64) -> bool {
        matches!(self, Value::Uint(n) if n == other)
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, Value::Float(n) if n == other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        matches!(self, Value::Bool(b) if b == other)
    }
}

// Reverse implementations for symmetry
impl PartialEq<Value> for &str {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for String {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for i64 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for bool {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}
