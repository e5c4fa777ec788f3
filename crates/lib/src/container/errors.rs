//! Error types for container primitives.

use thiserror::Error;

use crate::value::Kind;

/// Failures of the read/write primitives on lists and maps.
///
/// Every primitive checks and converts before it mutates, so returning one of
/// these means the container was left untouched.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContainerError {
    /// A primitive was applied to a value of the wrong shape
    #[error("not a container: found {found}")]
    NotAContainer { found: Kind },

    /// Map key kind differs from the declared key kind and coercion is disabled
    #[error("key {key} has kind {found}, map expects {expected}")]
    KeyKindMismatch {
        key: String,
        expected: Kind,
        found: Kind,
    },

    /// Map key cannot be converted to the declared key kind
    #[error("key {key} cannot be converted to {expected}")]
    KeyNotCoercible { key: String, expected: Kind },

    /// Value kind differs from the declared element kind and coercion is disabled
    #[error("value has kind {found}, container expects {expected}")]
    ValueKindMismatch { expected: Kind, found: Kind },

    /// Value cannot be converted to the declared element kind
    #[error("value {value} cannot be converted to {expected}")]
    ValueNotCoercible { value: String, expected: Kind },

    /// List write index outside `-1..=len`
    #[error("index {index} out of bounds for list of length {len}")]
    IndexOutOfBounds { index: i64, len: usize },

    /// List write attempted against a detached copy
    #[error("list write requires an addressable list")]
    RequiresReference,
}

impl ContainerError {
    /// Check if this error is a kind mismatch or failed conversion
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            ContainerError::KeyKindMismatch { .. }
                | ContainerError::KeyNotCoercible { .. }
                | ContainerError::ValueKindMismatch { .. }
                | ContainerError::ValueNotCoercible { .. }
        )
    }

    /// Check if the error would have been avoided by enabling coercion
    pub fn is_mismatch(&self) -> bool {
        matches!(
            self,
            ContainerError::KeyKindMismatch { .. } | ContainerError::ValueKindMismatch { .. }
        )
    }

    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, ContainerError::IndexOutOfBounds { .. })
    }
}

impl From<ContainerError> for crate::Error {
    fn from(err: ContainerError) -> Self {
        crate::Error::Container(err)
    }
}
