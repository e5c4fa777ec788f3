//!
//! Treepath: read and write deep inside dynamically typed nested data with dot-delimited paths.
//! This library provides a path engine over an already-decoded structure of lists, maps and scalars.
//!
//! ## Core Concepts
//!
//! * **Values (`value::Value`)**: A closed variant type. Every value is a scalar, a list or a map, and containers declare the kind of element (and key) they hold, or `Any`.
//! * **Ownership (`value::Ownership`)**: Containers are held by value (clones are detached copies) or by reference (clones alias one store).
//! * **Trees (`tree::Tree`)**: The path engine. Wraps one root value and offers `get`/`set`/`has` plus typed accessors over paths like `"a.b.2.c"`.
//! * **Resolution cache (`tree::ResolutionCache`)**: Memoizes every read outcome per full path, including misses, and is kept coherent by writes.
//! * **Container primitives (`container`)**: Read and write by key or index, checking declared kinds.
//! * **Coercion (`coerce`, `cast`)**: Best-effort conversion between scalar kinds, used by writes when enabled and by the typed accessors.

pub mod cast;
pub mod coerce;
pub mod container;
pub mod tree;
pub mod value;

/// Re-export the core types for easier access.
pub use tree::{Tree, TreeOptions, TreeStats};
pub use value::{Key, Kind, List, Map, Value};

/// Result type used throughout the Treepath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Treepath library.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Structured path errors from the tree module
    #[error(transparent)]
    Tree(tree::TreeError),

    /// Structured container errors from the container module
    #[error(transparent)]
    Container(container::ContainerError),
}

/// Flat classification of every failure a write can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ParentNotFound,
    UnaddressableRoot,
    InvalidIndexKey,
    CyclicWrite,
    KeyKindMismatch,
    KeyNotCoercible,
    ValueKindMismatch,
    ValueNotCoercible,
    IndexOutOfBounds,
    RequiresReference,
    NotAContainer,
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Tree(_) => "tree",
            Error::Container(_) => "container",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        use container::ContainerError as C;
        use tree::TreeError as T;

        match self {
            Error::Tree(T::ParentNotFound { .. }) => ErrorKind::ParentNotFound,
            Error::Tree(T::UnaddressableRoot { .. }) => ErrorKind::UnaddressableRoot,
            Error::Tree(T::InvalidIndexKey { .. }) => ErrorKind::InvalidIndexKey,
            Error::Tree(T::CyclicWrite { .. }) => ErrorKind::CyclicWrite,
            Error::Container(C::NotAContainer { .. }) => ErrorKind::NotAContainer,
            Error::Container(C::KeyKindMismatch { .. }) => ErrorKind::KeyKindMismatch,
            Error::Container(C::KeyNotCoercible { .. }) => ErrorKind::KeyNotCoercible,
            Error::Container(C::ValueKindMismatch { .. }) => ErrorKind::ValueKindMismatch,
            Error::Container(C::ValueNotCoercible { .. }) => ErrorKind::ValueNotCoercible,
            Error::Container(C::IndexOutOfBounds { .. }) => ErrorKind::IndexOutOfBounds,
            Error::Container(C::RequiresReference) => ErrorKind::RequiresReference,
        }
    }

    /// Check if this error indicates the write target's parent was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Tree(tree_err) => tree_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error is a kind mismatch or a failed conversion.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Container(container_err) => container_err.is_type_error(),
            _ => false,
        }
    }

    /// Check if this error is about the path rather than the data.
    pub fn is_path_error(&self) -> bool {
        matches!(self, Error::Tree(_))
    }

    /// Check if this error indicates a list index outside `-1..=len`.
    pub fn is_out_of_bounds(&self) -> bool {
        match self {
            Error::Container(container_err) => container_err.is_out_of_bounds(),
            _ => false,
        }
    }
}
