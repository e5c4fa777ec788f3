//! Read and write primitives for lists and maps.
//!
//! Two symmetric pairs: by key for maps, by index for lists. Writes check the
//! declared kinds (converting through the [coercion bridge](crate::coerce)
//! when allowed) before touching the container, so a failed write leaves it
//! exactly as it was.
//!
//! Reads never convert. A map declaring [`Kind::Int`] keys cannot be read with
//! a text key, even `"1"`.

use crate::coerce::{self, Unfit};
use crate::value::{Key, Kind, Value};

pub mod errors;

pub use errors::ContainerError;

/// Borrows the value stored under `key` in a map and runs `f` on it.
///
/// Returns `None` if `container` is not a map, if the key's kind differs from
/// a non-`Any` declared key kind, or if the key is absent.
pub fn visit_map_key<R>(container: &Value, key: &Value, f: impl FnOnce(&Value) -> R) -> Option<R> {
    let map = container.as_map()?;
    if map.key_kind() != Kind::Any && map.key_kind() != key.kind() {
        return None;
    }
    let key = Key::from_value(key)?;
    map.with_entries(|entries| entries.get(&key).map(f))
}

/// Mutable counterpart of [`visit_map_key`].
pub(crate) fn visit_map_key_mut<R>(
    container: &mut Value,
    key: &Value,
    f: impl FnOnce(&mut Value) -> R,
) -> Option<R> {
    let map = container.as_map_mut()?;
    if map.key_kind() != Kind::Any && map.key_kind() != key.kind() {
        return None;
    }
    let key = Key::from_value(key)?;
    map.with_entries_mut(|entries| entries.get_mut(&key).map(f))
}

/// Returns a copy of the value stored under `key` in a map.
pub fn map_key(container: &Value, key: &Value) -> Option<Value> {
    visit_map_key(container, key, Value::clone)
}

/// Writes `container[key] = value`, converting key and value if `allow`.
///
/// Returns the value as stored, i.e. after conversion.
pub fn map_key_set(
    container: &mut Value,
    key: &Value,
    value: Value,
    allow: bool,
) -> Result<Value, ContainerError> {
    let found = container.kind();
    let map = container
        .as_map_mut()
        .ok_or(ContainerError::NotAContainer { found })?;
    let key = fit_key(key.clone(), map.key_kind(), allow)?;
    let value = fit_element(value, map.elem_kind(), allow)?;
    map.with_entries_mut(|entries| entries.insert(key, value.clone()));
    Ok(value)
}

/// Borrows the element at `index` in a list and runs `f` on it.
///
/// Returns `None` if `container` is not a list or `index` is outside `0..len`.
pub fn visit_list_index<R>(
    container: &Value,
    index: i64,
    f: impl FnOnce(&Value) -> R,
) -> Option<R> {
    let list = container.as_list()?;
    let index = usize::try_from(index).ok()?;
    list.with_items(|items| items.get(index).map(f))
}

/// Mutable counterpart of [`visit_list_index`].
pub(crate) fn visit_list_index_mut<R>(
    container: &mut Value,
    index: i64,
    f: impl FnOnce(&mut Value) -> R,
) -> Option<R> {
    let list = container.as_list_mut()?;
    let index = usize::try_from(index).ok()?;
    list.with_items_mut(|items| items.get_mut(index).map(f))
}

/// Returns a copy of the element at `index` in a list.
pub fn list_index(container: &Value, index: i64) -> Option<Value> {
    visit_list_index(container, index, Value::clone)
}

/// Writes `value` at `index` in a shared list, converting it if `allow`.
///
/// `index` must lie in `-1..=len`; both `-1` and `len` append. By-value lists
/// are rejected with [`ContainerError::RequiresReference`] since the write
/// could not be observed by any other holder.
///
/// Returns the value as stored, i.e. after conversion.
///
/// ```
/// use treepath::container::list_index_set;
/// use treepath::value::{List, Value};
///
/// let mut list = Value::List(List::from(vec![1i64, 2]).into_shared());
/// list_index_set(&mut list, -1, Value::from("3"), true)?;
/// assert_eq!(list, Value::from(vec![1i64, 2, 3]));
/// # Ok::<(), treepath::container::ContainerError>(())
/// ```
pub fn list_index_set(
    container: &mut Value,
    index: i64,
    value: Value,
    allow: bool,
) -> Result<Value, ContainerError> {
    let found = container.kind();
    let list = container
        .as_list_mut()
        .ok_or(ContainerError::NotAContainer { found })?;
    if !list.is_shared() {
        return Err(ContainerError::RequiresReference);
    }
    let value = fit_element(value, list.elem_kind(), allow)?;
    list.with_items_mut(|items| {
        let len = items.len();
        match index {
            -1 => items.push(value.clone()),
            i => match usize::try_from(i) {
                Ok(i) if i == len => items.push(value.clone()),
                Ok(i) if i < len => items[i] = value.clone(),
                _ => return Err(ContainerError::IndexOutOfBounds { index, len }),
            },
        }
        Ok(value)
    })
}

/// Fits a value into a slot declared as `declared`.
pub fn fit_element(value: Value, declared: Kind, allow: bool) -> Result<Value, ContainerError> {
    coerce::fit(value, declared, allow).map_err(|unfit| match unfit {
        Unfit::Mismatch(value) => ContainerError::ValueKindMismatch {
            expected: declared,
            found: value.kind(),
        },
        Unfit::NotCoercible(value) => ContainerError::ValueNotCoercible {
            value: describe(&value),
            expected: declared,
        },
    })
}

/// Fits a value into a map key declared as `declared`.
///
/// Under [`Kind::Any`] the value must already be a valid key kind.
pub fn fit_key(value: Value, declared: Kind, allow: bool) -> Result<Key, ContainerError> {
    let fitted = coerce::fit(value, declared, allow).map_err(|unfit| match unfit {
        Unfit::Mismatch(key) => ContainerError::KeyKindMismatch {
            key: describe(&key),
            expected: declared,
            found: key.kind(),
        },
        Unfit::NotCoercible(key) => ContainerError::KeyNotCoercible {
            key: describe(&key),
            expected: declared,
        },
    })?;
    Key::from_value(&fitted).ok_or_else(|| ContainerError::KeyNotCoercible {
        key: describe(&fitted),
        expected: declared,
    })
}

/// Renders a rejected value for an error message.
///
/// Containers are named by kind and never read, since the caller may hold
/// locks on them.
fn describe(value: &Value) -> String {
    match value {
        Value::List(_) | Value::Map(_) => value.kind().to_string(),
        scalar => scalar.to_json_string(),
    }
}
