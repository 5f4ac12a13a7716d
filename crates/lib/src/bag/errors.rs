//! Error types for bag operations.
//!
//! Invalid arguments cover inputs outside an operation's contract, such as a
//! scalar passed to `from_value` or a sample size larger than the bag. Logic
//! errors cover data whose shape the operation cannot handle.

use thiserror::Error;

/// Structured error types for bag construction and operations.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BagError {
    /// The source cannot be turned into a bag
    #[error("Expected a map, bag, null or iterable object, got {type_name}")]
    NotIterable { type_name: String },

    /// `combine` was given sequences of different lengths
    #[error("Cannot combine {keys} keys with {values} values")]
    LengthMismatch { keys: usize, values: usize },

    /// A value cannot be used as a key
    #[error("A {type_name} cannot be used as a key")]
    InvalidKey { type_name: String },

    /// The operation needs at least one entry
    #[error("Cannot {operation} from an empty bag")]
    EmptyBag { operation: &'static str },

    /// A random sample size outside `1..=count`
    #[error("Sample size {requested} is out of range for a bag of {available} entries")]
    SampleSize { requested: usize, available: usize },

    /// `chunk` was given a size of zero
    #[error("Chunk size must be at least 1")]
    InvalidChunkSize,

    /// `pad` was asked for more entries than a single call may add
    #[error("Cannot pad to {requested} entries, the limit is {limit}")]
    PadTooLarge { requested: u64, limit: usize },

    /// The bag's next natural index is already taken
    #[error("Cannot add to a bag whose integer index {index} is already in use")]
    NoFreeIndex { index: i64 },

    /// An unrecognized sort direction or mode
    #[error("Unknown sort option '{option}'")]
    UnknownSortOption { option: String },

    /// The operation only works on integer or text values
    #[error("Can only {operation} integer and text values, found {type_name}")]
    NonScalarValue {
        operation: &'static str,
        type_name: String,
    },
}

impl BagError {
    /// Check if the caller passed a value outside the accepted input contract
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            BagError::NotIterable { .. }
                | BagError::LengthMismatch { .. }
                | BagError::InvalidKey { .. }
                | BagError::EmptyBag { .. }
                | BagError::SampleSize { .. }
                | BagError::InvalidChunkSize
                | BagError::PadTooLarge { .. }
                | BagError::UnknownSortOption { .. }
        )
    }

    /// Check if the data had a shape the operation cannot handle
    pub fn is_logic_error(&self) -> bool {
        matches!(
            self,
            BagError::NonScalarValue { .. } | BagError::NoFreeIndex { .. }
        )
    }
}

// Conversion from BagError to the main Error type
impl From<BagError> for crate::Error {
    fn from(err: BagError) -> Self {
        crate::Error::Bag(err)
    }
}
