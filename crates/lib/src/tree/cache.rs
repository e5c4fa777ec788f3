//! Resolution cache.
//!
//! Memoizes full path → resolved value, including negative results. One
//! `RwLock` guards the map; it is taken for a single access or prefix scan and
//! never held while a path is being walked.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::value::Value;

/// Path → lookup outcome. `None` records a path known not to resolve.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: RwLock<HashMap<String, Option<Value>>>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the memoized outcome for `path`: `None` if nothing is cached,
    /// `Some(None)` for a cached miss.
    pub fn get(&self, path: &str) -> Option<Option<Value>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }

    pub fn insert(&self, path: impl Into<String>, outcome: Option<Value>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), outcome);
    }

    pub fn remove(&self, path: &str) -> bool {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path)
            .is_some()
    }

    /// Removes every entry whose path starts with `prefix`.
    ///
    /// Returns the number of removed entries.
    pub fn clear_prefix(&self, prefix: &str) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|path, _| !path.starts_with(prefix));
        before - entries.len()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
