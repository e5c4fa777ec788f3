//! Typed convenience reads.
//!
//! Each accessor is a [`Tree::get`] followed by a [`cast`](crate::cast). They
//! never write, and a value that does not cast reads the same as a missing one.

use std::collections::BTreeMap;

use super::Tree;
use crate::cast::{
    cast_bool, cast_float, cast_int, cast_list_with, cast_map_with, cast_text, cast_uint,
};
use crate::value::{Key, Value};

impl Tree {
    fn cast_at<T>(&self, path: &str, cast: impl Fn(&Value) -> Option<T>) -> Option<T> {
        self.get(path).and_then(|value| cast(&value))
    }

    /// Casts every element of the list at `path`. With `convert_single`, a
    /// castable scalar is returned as a one-element list.
    fn cast_list_at<T>(
        &self,
        path: &str,
        convert_single: bool,
        cast: impl Fn(&Value) -> Option<T>,
    ) -> Option<Vec<T>> {
        let value = self.get(path)?;
        if value.is_list() {
            return cast_list_with(&value, cast);
        }
        if convert_single {
            return cast(&value).map(|single| vec![single]);
        }
        None
    }

    /// Reads `path` as text.
    ///
    /// ```
    /// # use treepath::{Tree, Value};
    /// let tree = Tree::new(Value::from(serde_json::json!({"n": 12.5})));
    /// assert_eq!(tree.get_text("n").as_deref(), Some("12.5"));
    /// assert_eq!(tree.get_text_or("missing", "none"), "none");
    /// ```
    pub fn get_text(&self, path: &str) -> Option<String> {
        self.cast_at(path, cast_text)
    }

    pub fn get_text_or(&self, path: &str, fallback: &str) -> String {
        self.get_text(path).unwrap_or_else(|| fallback.to_string())
    }

    pub fn get_int(&self, path: &str) -> Option<i64> {
        self.cast_at(path, cast_int)
    }

    pub fn get_int_or(&self, path: &str, fallback: i64) -> i64 {
        self.get_int(path).unwrap_or(fallback)
    }

    pub fn get_uint(&self, path: &str) -> Option<u64> {
        self.cast_at(path, cast_uint)
    }

    pub fn get_uint_or(&self, path: &str, fallback: u64) -> u64 {
        self.get_uint(path).unwrap_or(fallback)
    }

    pub fn get_float(&self, path: &str) -> Option<f64> {
        self.cast_at(path, cast_float)
    }

    pub fn get_float_or(&self, path: &str, fallback: f64) -> f64 {
        self.get_float(path).unwrap_or(fallback)
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.cast_at(path, cast_bool)
    }

    pub fn get_bool_or(&self, path: &str, fallback: bool) -> bool {
        self.get_bool(path).unwrap_or(fallback)
    }

    /// Returns true if `path` resolves to something castable to text.
    pub fn is_text(&self, path: &str) -> bool {
        self.get_text(path).is_some()
    }

    pub fn is_int(&self, path: &str) -> bool {
        self.get_int(path).is_some()
    }

    pub fn is_float(&self, path: &str) -> bool {
        self.get_float(path).is_some()
    }

    pub fn is_bool(&self, path: &str) -> bool {
        self.get_bool(path).is_some()
    }

    pub fn get_texts(&self, path: &str, convert_single: bool) -> Option<Vec<String>> {
        self.cast_list_at(path, convert_single, cast_text)
    }

    /// Reads `path` as a list of integers.
    ///
    /// ```
    /// # use treepath::{Tree, Value};
    /// let tree = Tree::new(Value::from(serde_json::json!({"l": ["1", 2.5], "s": "3"})));
    /// assert_eq!(tree.get_ints("l", false), Some(vec![1, 2]));
    /// assert_eq!(tree.get_ints("s", false), None);
    /// assert_eq!(tree.get_ints("s", true), Some(vec![3]));
    /// ```
    pub fn get_ints(&self, path: &str, convert_single: bool) -> Option<Vec<i64>> {
        self.cast_list_at(path, convert_single, cast_int)
    }

    pub fn get_floats(&self, path: &str, convert_single: bool) -> Option<Vec<f64>> {
        self.cast_list_at(path, convert_single, cast_float)
    }

    pub fn get_bools(&self, path: &str, convert_single: bool) -> Option<Vec<bool>> {
        self.cast_list_at(path, convert_single, cast_bool)
    }

    /// Snapshot of the map at `path` with its keys as stored.
    pub fn get_map(&self, path: &str) -> Option<BTreeMap<Key, Value>> {
        self.get(path)?.as_map().map(|map| map.to_btree())
    }

    /// The map at `path` with every key cast to text.
    pub fn get_map_text(&self, path: &str) -> Option<BTreeMap<String, Value>> {
        self.cast_at(path, |value| cast_map_with(value, |v| Some(v.clone())))
    }

    pub fn get_map_text_text(&self, path: &str) -> Option<BTreeMap<String, String>> {
        self.cast_at(path, |value| cast_map_with(value, cast_text))
    }

    pub fn get_map_text_int(&self, path: &str) -> Option<BTreeMap<String, i64>> {
        self.cast_at(path, |value| cast_map_with(value, cast_int))
    }

    pub fn get_map_text_float(&self, path: &str) -> Option<BTreeMap<String, f64>> {
        self.cast_at(path, |value| cast_map_with(value, cast_float))
    }
}
