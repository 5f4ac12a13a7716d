//! Error types for path operations.
//!
//! Path errors fall into two groups: invalid arguments (an empty path, or a
//! container that has no key access at all) and structural write failures, where
//! a `set` cannot descend through the data that is already there.

use thiserror::Error;

/// Structured error types for path traversal and nested writes.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The path string was empty
    #[error("Path must be a non-empty string")]
    EmptyPath,

    /// The container passed to a path operation has no key access
    #[error("Cannot access paths on a value of type {type_name}")]
    NotAccessible { type_name: String },

    /// An intermediate value exists but cannot hold nested data
    #[error("Cannot set '{path}': '{key}' holds a {type_name}, not a container")]
    NotAContainer {
        path: String,
        key: String,
        type_name: String,
    },

    /// An intermediate object only returns copies of its nested values
    #[error(
        "Cannot set '{path}': {type_name} returns a copy of '{key}', so nested values cannot be modified in place"
    )]
    DetachedRead {
        path: String,
        key: String,
        type_name: String,
    },

    /// The write reached a read-only bag
    #[error("Cannot modify '{path}': {type_name} is read-only")]
    ReadOnly { path: String, type_name: String },

    /// A `[]` write found the container's next natural index already taken
    #[error("Cannot append at '{path}': {type_name} has no free integer index")]
    NoFreeIndex { path: String, type_name: String },

    /// An object handle was already borrowed for writing, usually a cycle in the data
    #[error("Object of type {type_name} is already borrowed")]
    Busy { type_name: String },
}

impl PathError {
    /// Check if the caller passed a value outside the accepted input contract
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            PathError::EmptyPath | PathError::NotAccessible { .. }
        )
    }

    /// Check if a write could not descend through the existing structure
    pub fn is_structural_write(&self) -> bool {
        matches!(
            self,
            PathError::NotAContainer { .. }
                | PathError::DetachedRead { .. }
                | PathError::ReadOnly { .. }
                | PathError::NoFreeIndex { .. }
                | PathError::Busy { .. }
        )
    }

    /// Get the path involved, if the error names one
    pub fn path(&self) -> Option<&str> {
        match self {
            PathError::NotAContainer { path, .. }
            | PathError::DetachedRead { path, .. }
            | PathError::ReadOnly { path, .. }
            | PathError::NoFreeIndex { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Get the offending sub-key, if the error names one
    pub fn key(&self) -> Option<&str> {
        match self {
            PathError::NotAContainer { key, .. } | PathError::DetachedRead { key, .. } => {
                Some(key)
            }
            _ => None,
        }
    }
}

// Conversion from PathError to the main Error type
impl From<PathError> for crate::Error {
    fn from(err: PathError) -> Self {
        crate::Error::Path(err)
    }
}
