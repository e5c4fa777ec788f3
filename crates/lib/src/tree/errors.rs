//! Error types for path engine writes.

use thiserror::Error;

/// Failures of [`Tree::set`](crate::Tree::set) that are about the path rather
/// than the container being written.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The path minus its last segment does not resolve
    #[error("parent {parent} of {path} not found")]
    ParentNotFound { path: String, parent: String },

    /// The root is a by-value list, which cannot be written into
    #[error("cannot write {path}: root list is not addressable")]
    UnaddressableRoot { path: String },

    /// A list parent was given a key that is neither an index nor "-1"
    #[error("invalid list index {key} in {path}")]
    InvalidIndexKey { key: String, path: String },

    /// The written value holds a shared container on the path to its own slot
    #[error("cannot write {path}: value contains one of its own ancestors")]
    CyclicWrite { path: String },
}

impl TreeError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, TreeError::ParentNotFound { .. })
    }

    /// Get the path the failed write targeted
    pub fn path(&self) -> &str {
        match self {
            TreeError::ParentNotFound { path, .. }
            | TreeError::UnaddressableRoot { path }
            | TreeError::InvalidIndexKey { path, .. }
            | TreeError::CyclicWrite { path } => path,
        }
    }
}

impl From<TreeError> for crate::Error {
    fn from(err: TreeError) -> Self {
        crate::Error::Tree(err)
    }
}
