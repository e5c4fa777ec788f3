//! The path engine.
//!
//! A [`Tree`] wraps one root [`Value`] and reads or writes anywhere below it
//! with dot-delimited paths such as `"a.b.2.c"`. Each segment is interpreted
//! against the container it meets: a digit run is an index into a list, and
//! anything else (or any segment against a map) is a text key.
//!
//! Every read outcome, found or not, is memoized per full path in a
//! [`ResolutionCache`]. Writes keep it coherent: the written path is re-cached
//! and everything below it is dropped.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use treepath::{Tree, Value};
//!
//! let mut tree = Tree::new(Value::from(json!({"a": {"b": [1, 2, 3]}})));
//! assert_eq!(tree.get("a.b.1"), Some(Value::Int(2)));
//!
//! tree.set("a.b.1", 99)?;
//! tree.set("a.b.-1", 4)?;
//! assert_eq!(tree.get("a.b").unwrap().to_json_string(), "[1,99,3,4]");
//!
//! assert!(tree.set("a.c.d", 1).unwrap_err().is_not_found());
//! # Ok::<(), treepath::Error>(())
//! ```

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::Result;
use crate::container::{self, ContainerError};
use crate::value::{Kind, Value};

mod accessors;
pub mod cache;
pub mod errors;
pub mod path;

pub use cache::ResolutionCache;
pub use errors::TreeError;

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeOptions {
    /// Convert written keys and values to the declared kinds of their container.
    pub coerce: bool,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self { coerce: true }
    }
}

impl TreeOptions {
    /// Sets whether writes convert keys and values to the declared kinds.
    pub fn coerce(mut self, coerce: bool) -> Self {
        self.coerce = coerce;
        self
    }
}

/// Counters describing how reads were served.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Reads that had to walk the structure.
    pub walks: usize,
    /// Reads answered from the resolution cache.
    pub cache_hits: usize,
    /// Paths currently memoized, negative results included.
    pub cached_paths: usize,
}

/// Path-addressed access to a nested structure of lists, maps and scalars.
///
/// Reads take `&self` and may be issued from several threads at once; writes
/// take `&mut self`. Two trees wrapping aliases of the same shared container
/// do not coordinate with each other.
#[derive(Debug)]
pub struct Tree {
    root: Value,
    options: TreeOptions,
    cache: ResolutionCache,
    walks: AtomicUsize,
    cache_hits: AtomicUsize,
}

impl Tree {
    /// Creates a tree over `root` with default options and an empty cache.
    pub fn new(root: impl Into<Value>) -> Self {
        Self::with_options(root, TreeOptions::default())
    }

    /// Creates a tree over `root` with the given options.
    pub fn with_options(root: impl Into<Value>, options: TreeOptions) -> Self {
        Self {
            root: root.into(),
            options,
            cache: ResolutionCache::new(),
            walks: AtomicUsize::new(0),
            cache_hits: AtomicUsize::new(0),
        }
    }

    /// Returns the root value.
    ///
    /// Shared containers inside it may be changed through aliases held
    /// elsewhere, which the cache does not observe.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Consumes the tree, returning the root value.
    pub fn into_inner(self) -> Value {
        self.root
    }

    /// Returns the options this tree was built with.
    pub fn options(&self) -> TreeOptions {
        self.options
    }

    /// Returns a snapshot of the read counters and the cache size.
    ///
    /// Counters are updated with relaxed ordering; under concurrent reads the
    /// snapshot is not taken atomically.
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            walks: self.walks.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cached_paths: self.cache.len(),
        }
    }

    /// Returns true if an outcome for `path` is memoized.
    pub fn is_cached(&self, path: &str) -> bool {
        self.cache.contains(path)
    }

    /// Drops every memoized outcome.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Returns true if `path` resolves, even to [`Value::Null`].
    pub fn has(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Resolves `path`, serving from the cache when possible.
    ///
    /// Shared containers come back as aliases of the stored ones; by-value
    /// containers come back as copies.
    pub fn get(&self, path: &str) -> Option<Value> {
        if let Some(outcome) = self.cache.get(path) {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
            trace!(path, found = outcome.is_some(), "Cache hit");
            return outcome;
        }

        self.walks.fetch_add(1, Ordering::Relaxed);
        let outcome = resolve(&self.root, &path::split_path(path));
        trace!(path, found = outcome.is_some(), "Walked path");
        self.cache.insert(path, outcome.clone());
        outcome
    }

    /// Resolves `path` into a `(value, found)` pair, with [`Value::Null`]
    /// standing in for a missing value.
    pub fn lookup(&self, path: &str) -> (Value, bool) {
        match self.get(path) {
            Some(value) => (value, true),
            None => (Value::Null, false),
        }
    }

    /// Returns true if `path` resolves to a list.
    pub fn is_list(&self, path: &str) -> bool {
        self.get(path).is_some_and(|value| value.is_list())
    }

    /// Alias of [`Tree::is_list`].
    pub fn is_slice(&self, path: &str) -> bool {
        self.is_list(path)
    }

    /// Returns true if `path` resolves to a map.
    pub fn is_map(&self, path: &str) -> bool {
        self.get(path).is_some_and(|value| value.is_map())
    }

    /// Returns a tree rooted at the container found at `path`.
    ///
    /// The child's root is always shared. If the container already was, the
    /// child aliases it and writes through either tree are visible in both;
    /// a by-value container is detached into a copy first.
    ///
    /// Returns `None` for scalars and unresolved paths.
    pub fn get_child(&self, path: &str) -> Option<Tree> {
        let value = self.get(path).filter(Value::is_container)?;
        Some(Tree::with_options(value.into_shared(), self.options))
    }

    /// Writes `value` at `path`.
    ///
    /// The parent of the target must already exist. A list parent takes
    /// either an index in `0..=len` or `-1`, the last two both appending. With
    /// [`TreeOptions::coerce`] set, keys and values are converted to the kinds
    /// the parent declares.
    ///
    /// By-value containers between the root and the parent are written in
    /// place. A list root held by value cannot be written into, directly or
    /// through a chain of by-value lists, and fails with
    /// [`TreeError::UnaddressableRoot`]. A value holding a shared container
    /// that already encloses the target fails with [`TreeError::CyclicWrite`].
    ///
    /// On failure the structure and the cache are left unchanged.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let allow = self.options.coerce;
        let mut stores = HashSet::new();
        value.collect_stores(&mut stores);

        let Some((parent_path, key)) = path::parent_and_key(path) else {
            if self.root.store_id().is_some_and(|id| stores.contains(&id)) {
                return Err(TreeError::CyclicWrite {
                    path: path.to_string(),
                }
                .into());
            }
            let stored = self.write_root(path, value, allow)?;
            let scope = if self.root.is_list() {
                String::new()
            } else {
                below(path)
            };
            self.settle(path, stored, &[], &scope);
            return Ok(());
        };

        let segments = path::split_path(parent_path);
        let parent = inspect(&self.root, &segments, Vec::new()).ok_or_else(|| {
            TreeError::ParentNotFound {
                path: path.to_string(),
                parent: parent_path.to_string(),
            }
        })?;
        if !parent.kind.is_container() {
            return Err(ContainerError::NotAContainer { found: parent.kind }.into());
        }
        if parent.ancestors.iter().any(|id| stores.contains(id)) {
            return Err(TreeError::CyclicWrite {
                path: path.to_string(),
            }
            .into());
        }
        // Writing into a list can create an index a cached miss still covers.
        let scope = if parent.kind == Kind::List {
            below(parent_path)
        } else {
            below(path)
        };

        if let Some(mut alias) = parent.alias {
            let stored = write_child(&mut alias, path, key, value, allow)?;
            self.settle(path, stored, &[], &scope);
            return Ok(());
        }

        let mut lineage = Lineage {
            detached: Vec::with_capacity(segments.len() + 1),
            list_run: true,
        };
        let write = |parent: &mut Value, lineage: &Lineage| -> Result<(Value, Vec<usize>)> {
            if lineage.list_run {
                return Err(TreeError::UnaddressableRoot {
                    path: path.to_string(),
                }
                .into());
            }
            let stored = write_child(parent, path, key, value, allow)?;
            Ok((stored, lineage.detached.clone()))
        };
        let written = descend_mut(&mut self.root, &segments, 0, &mut lineage, write);
        let (stored, detached) = written.ok_or_else(|| TreeError::ParentNotFound {
            path: path.to_string(),
            parent: parent_path.to_string(),
        })??;

        let stale: Vec<String> = detached
            .into_iter()
            .filter(|depth| *depth > 0)
            .map(|depth| path::join(&segments[..depth]))
            .collect();
        debug!(path, ancestors = stale.len(), "Wrote through by-value ancestors");
        self.settle(path, stored, &stale, &scope);
        Ok(())
    }

    fn write_root(&mut self, path: &str, value: Value, allow: bool) -> Result<Value> {
        match &mut self.root {
            Value::List(list) if !list.is_shared() => Err(TreeError::UnaddressableRoot {
                path: path.to_string(),
            }
            .into()),
            root => write_child(root, path, path, value, allow),
        }
    }

    /// Brings the cache in line with a successful write at `path`.
    ///
    /// `stale` lists ancestors whose memoized copies predate the write, and
    /// every entry starting with `scope` is dropped.
    fn settle(&self, path: &str, stored: Value, stale: &[String], scope: &str) {
        for ancestor in stale {
            self.cache.remove(ancestor);
        }
        let cleared = self.cache.clear_prefix(scope);
        self.cache.insert(path, Some(stored));
        debug!(path, cleared, "Value written");
    }
}

fn below(path: &str) -> String {
    format!("{path}{}", path::DELIMITER)
}

/// Walks `segments` down from `current`, copying out the value at the end.
fn resolve(current: &Value, segments: &[&str]) -> Option<Value> {
    let Some((head, rest)) = segments.split_first() else {
        return Some(current.clone());
    };
    let next = |child: &Value| resolve(child, rest);
    if current.is_list() && path::is_index(head) {
        container::visit_list_index(current, head.parse().ok()?, next).flatten()
    } else {
        container::visit_map_key(current, &Value::from(*head), next).flatten()
    }
}

/// What a borrowing walk learned about the parent of a write target.
struct Parent {
    kind: Kind,
    /// Alias of the parent, when it is shared.
    alias: Option<Value>,
    /// Stores of the shared containers from the root down to the parent.
    ancestors: Vec<usize>,
}

/// Classifies the value at the end of `segments` without copying it.
fn inspect(current: &Value, segments: &[&str], mut ancestors: Vec<usize>) -> Option<Parent> {
    ancestors.extend(current.store_id());
    let Some((head, rest)) = segments.split_first() else {
        return Some(Parent {
            kind: current.kind(),
            alias: current.is_shared().then(|| current.clone()),
            ancestors,
        });
    };
    let next = |child: &Value| inspect(child, rest, ancestors);
    if current.is_list() && path::is_index(head) {
        container::visit_list_index(current, head.parse().ok()?, next).flatten()
    } else {
        container::visit_map_key(current, &Value::from(*head), next).flatten()
    }
}

/// What a mutable descent learned about the containers above the target.
struct Lineage {
    /// Depths of by-value containers below the deepest shared one. Their
    /// memoized copies go stale once something beneath them is written.
    detached: Vec<usize>,
    /// Every container from the root down is a by-value list.
    list_run: bool,
}

/// Mutable counterpart of [`resolve`]: runs `f` on the value at the end of
/// `segments`, with write locks held on every shared container on the way.
fn descend_mut<R>(
    current: &mut Value,
    segments: &[&str],
    depth: usize,
    lineage: &mut Lineage,
    f: impl FnOnce(&mut Value, &Lineage) -> R,
) -> Option<R> {
    if current.is_shared() {
        lineage.detached.clear();
    } else {
        lineage.detached.push(depth);
    }
    lineage.list_run &= current.is_list() && !current.is_shared();

    let Some((head, rest)) = segments.split_first() else {
        return Some(f(current, lineage));
    };
    let next = |child: &mut Value| descend_mut(child, rest, depth + 1, lineage, f);
    if current.is_list() && path::is_index(head) {
        container::visit_list_index_mut(current, head.parse().ok()?, next).flatten()
    } else {
        container::visit_map_key_mut(current, &Value::from(*head), next).flatten()
    }
}

/// Writes `value` under `key` in `parent`, returning the stored value.
fn write_child(
    parent: &mut Value,
    path: &str,
    key: &str,
    value: Value,
    allow: bool,
) -> Result<Value> {
    if !parent.is_list() {
        return Ok(container::map_key_set(
            parent,
            &Value::from(key),
            value,
            allow,
        )?);
    }

    let index = path::parse_write_index(key).ok_or_else(|| TreeError::InvalidIndexKey {
        key: key.to_string(),
        path: path.to_string(),
    })?;
    if parent.is_shared() {
        return Ok(container::list_index_set(parent, index, value, allow)?);
    }

    // Reached through `&mut`, so it can be lent out as addressable.
    parent.share();
    let written = container::list_index_set(parent, index, value, allow);
    parent.unshare();
    Ok(written?)
}
