//! Ordered containers.

use std::fmt;

use super::handle::{Handle, Ownership};
use super::{Element, Kind, Value};
use crate::container::{ContainerError, fit_element};

/// An ordered, indexable container with a declared element kind.
///
/// # Examples
///
/// ```
/// use treepath::value::{Kind, List, Value};
///
/// let mut list = List::of(Kind::Int);
/// list.push(1i64)?;
/// assert!(list.push("two").is_err());
/// assert_eq!(list.get(0), Some(Value::Int(1)));
/// # Ok::<(), treepath::container::ContainerError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    elem: Kind,
    items: Handle<Vec<Value>>,
}

impl List {
    /// Creates an empty, by-value list accepting any element.
    pub fn new() -> Self {
        Self::of(Kind::Any)
    }

    /// Creates an empty, by-value list declaring `elem` as its element kind.
    pub fn of(elem: Kind) -> Self {
        Self::from_parts(elem, Vec::new())
    }

    /// Creates a list from `values`, all of which must already be of kind `elem`.
    pub fn from_values(
        elem: Kind,
        values: impl IntoIterator<Item = Value>,
    ) -> Result<Self, ContainerError> {
        let items = values
            .into_iter()
            .map(|value| fit_element(value, elem, false))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_parts(elem, items))
    }

    pub(crate) fn from_parts(elem: Kind, items: Vec<Value>) -> Self {
        Self {
            elem,
            items: Handle::Owned(items),
        }
    }

    /// Returns the declared element kind
    pub fn elem_kind(&self) -> Kind {
        self.elem
    }

    pub fn ownership(&self) -> Ownership {
        self.items.ownership()
    }

    pub fn is_shared(&self) -> bool {
        self.ownership() == Ownership::ByReference
    }

    /// Moves the elements behind a shared handle; clones then alias one store.
    pub fn into_shared(mut self) -> Self {
        self.share();
        self
    }

    pub(crate) fn share(&mut self) {
        self.items.share();
    }

    pub(crate) fn unshare(&mut self) {
        self.items.unshare();
    }

    pub(crate) fn store_id(&self) -> Option<usize> {
        self.items.store_id()
    }

    pub fn len(&self) -> usize {
        self.items.read(Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of the element at `index`.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.items.read(|items| items.get(index).cloned())
    }

    /// Returns a snapshot of all elements.
    pub fn to_vec(&self) -> Vec<Value> {
        self.items.read(Vec::clone)
    }

    /// Runs `f` over the elements without copying them.
    pub fn with_items<R>(&self, f: impl FnOnce(&[Value]) -> R) -> R {
        self.items.read(|items| f(items))
    }

    pub(crate) fn with_items_mut<R>(&mut self, f: impl FnOnce(&mut Vec<Value>) -> R) -> R {
        self.items.write(f)
    }

    /// Appends `value`, which must already be of the declared element kind.
    pub fn push(&mut self, value: impl Into<Value>) -> Result<(), ContainerError> {
        let value = fit_element(value.into(), self.elem, false)?;
        self.items.write(|items| items.push(value));
        Ok(())
    }
}

impl Default for List {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_items(|items| {
            write!(f, "[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{item}")?;
            }
            write!(f, "]")
        })
    }
}

impl serde::Serialize for List {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.with_items(|items| serializer.collect_seq(items))
    }
}

impl<T: Element> From<Vec<T>> for List {
    fn from(items: Vec<T>) -> Self {
        Self::from_parts(T::KIND, items.into_iter().map(Into::into).collect())
    }
}

impl FromIterator<Value> for List {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from_parts(Kind::Any, iter.into_iter().collect())
    }
}
