//! Associative containers.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::handle::{Handle, Ownership};
use super::{Element, Key, Kind, Value};
use crate::container::{ContainerError, fit_element, fit_key};

/// A key/value container with declared key and element kinds.
///
/// Entries are kept in key order, so iteration and display are deterministic.
///
/// # Examples
///
/// ```
/// use treepath::value::{Key, Kind, Map, Value};
///
/// let mut map = Map::of(Kind::Text, Kind::Int);
/// map.insert("a", 1i64)?;
/// assert!(map.insert(7i64, 1i64).is_err());
/// assert_eq!(map.get(&Key::from("a")), Some(Value::Int(1)));
/// # Ok::<(), treepath::container::ContainerError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Map {
    key: Kind,
    elem: Kind,
    entries: Handle<BTreeMap<Key, Value>>,
}

impl Map {
    /// Creates an empty, by-value map accepting any key and element.
    pub fn new() -> Self {
        Self::of(Kind::Any, Kind::Any)
    }

    /// Creates an empty, by-value map with declared key and element kinds.
    ///
    /// A key kind that can never be a [`Key`] (e.g. [`Kind::Float`]) is
    /// treated as [`Kind::Any`].
    pub fn of(key: Kind, elem: Kind) -> Self {
        Self::from_parts(key, elem, BTreeMap::new())
    }

    pub(crate) fn from_parts(key: Kind, elem: Kind, entries: BTreeMap<Key, Value>) -> Self {
        let key = if key.is_key_kind() { key } else { Kind::Any };
        Self {
            key,
            elem,
            entries: Handle::Owned(entries),
        }
    }

    pub fn key_kind(&self) -> Kind {
        self.key
    }

    pub fn elem_kind(&self) -> Kind {
        self.elem
    }

    pub fn ownership(&self) -> Ownership {
        self.entries.ownership()
    }

    pub fn is_shared(&self) -> bool {
        self.ownership() == Ownership::ByReference
    }

    /// Moves the entries behind a shared handle; clones then alias one store.
    pub fn into_shared(mut self) -> Self {
        self.share();
        self
    }

    pub(crate) fn share(&mut self) {
        self.entries.share();
    }

    pub(crate) fn unshare(&mut self) {
        self.entries.unshare();
    }

    pub(crate) fn store_id(&self) -> Option<usize> {
        self.entries.store_id()
    }

    pub fn len(&self) -> usize {
        self.entries.read(BTreeMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of the value stored under `key`.
    pub fn get(&self, key: &Key) -> Option<Value> {
        self.entries.read(|entries| entries.get(key).cloned())
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.entries.read(|entries| entries.contains_key(key))
    }

    /// Returns the keys in order.
    pub fn keys(&self) -> Vec<Key> {
        self.entries.read(|entries| entries.keys().cloned().collect())
    }

    /// Returns a snapshot of all entries.
    pub fn to_btree(&self) -> BTreeMap<Key, Value> {
        self.entries.read(BTreeMap::clone)
    }

    /// Runs `f` over the entries without copying them.
    pub fn with_entries<R>(&self, f: impl FnOnce(&BTreeMap<Key, Value>) -> R) -> R {
        self.entries.read(f)
    }

    pub(crate) fn with_entries_mut<R>(
        &mut self,
        f: impl FnOnce(&mut BTreeMap<Key, Value>) -> R,
    ) -> R {
        self.entries.write(f)
    }

    /// Inserts an entry whose key and value already match the declared kinds.
    ///
    /// Returns the previous value stored under the key.
    pub fn insert(
        &mut self,
        key: impl Into<Key>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, ContainerError> {
        let key = fit_key(key.into().into_value(), self.key, false)?;
        let value = fit_element(value.into(), self.elem, false)?;
        Ok(self.entries.write(|entries| entries.insert(key, value)))
    }
}

impl Default for Map {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_entries(|entries| {
            write!(f, "{{")?;
            for (i, (key, value)) in entries.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}: {value}")?;
            }
            write!(f, "}}")
        })
    }
}

impl serde::Serialize for Map {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.with_entries(|entries| {
            serializer.collect_map(entries.iter().map(|(key, value)| (key.to_string(), value)))
        })
    }
}

impl<T: Element> From<BTreeMap<String, T>> for Map {
    fn from(entries: BTreeMap<String, T>) -> Self {
        Self::from_parts(
            Kind::Text,
            T::KIND,
            entries
                .into_iter()
                .map(|(key, value)| (Key::Text(key), value.into()))
                .collect(),
        )
    }
}

impl<T: Element> From<HashMap<String, T>> for Map {
    fn from(entries: HashMap<String, T>) -> Self {
        Self::from_parts(
            Kind::Text,
            T::KIND,
            entries
                .into_iter()
                .map(|(key, value)| (Key::Text(key), value.into()))
                .collect(),
        )
    }
}

impl FromIterator<(String, Value)> for Map {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self::from_parts(
            Kind::Text,
            Kind::Any,
            iter.into_iter()
                .map(|(key, value)| (Key::Text(key), value))
                .collect(),
        )
    }
}

impl FromIterator<(Key, Value)> for Map {
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
        Self::from_parts(Kind::Any, Kind::Any, iter.into_iter().collect())
    }
}
