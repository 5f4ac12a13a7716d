//!
//! Satchel: ordered bags with a fluent API and path-based nested access.
//! This library wraps insertion-ordered maps in chainable collection types.
//!
//! ## Core Concepts
//!
//! Satchel is built around a handful of key concepts:
//!
//! * **Values (`value::Value`)**: Dynamically typed elements. Scalars, native ordered maps,
//!   nested bags, and user-defined accessor objects all live behind one enum.
//! * **Maps (`value::Map`)**: The native insertion-ordered map. A map whose keys are exactly
//!   `0..n-1` doubles as a list ("indexed"); anything else is "associative".
//! * **Bags (`bag::Bag`, `bag::MutableBag`)**: Wrappers around a single `Map`. Every derive
//!   operation (`map`, `filter`, `slice`, `sort`, `diff`, ...) returns a new bag of the same
//!   variant. Only `MutableBag` can be changed in place.
//! * **Paths (`path`)**: `/`-delimited keys such as `"user/profile/name"` that reach into
//!   nested containers without failing on missing intermediate keys. The segment `[]`
//!   appends at the container's next natural index.
//! * **Objects (`value::Object`)**: Shared handles to user types implementing
//!   [`value::KeyAccess`]. Types that can lend out live references to their nested values
//!   also implement [`value::KeyAccessMut`], which is what nested path writes require.
//!
//! ## Example
//!
//! ```
//! use satchel::prelude::*;
//!
//! let mut bag = MutableBag::new();
//! bag.set("name", "satchel");
//! bag.set_path("colors/[]", "red")?;
//! bag.set_path("colors/[]", "blue")?;
//!
//! let colors = bag.get_path("colors")?.unwrap();
//! assert_eq!(colors, Value::from(vec!["red", "blue"]));
//!
//! let sorted = Bag::from_values([4, 3, 1, 2]).sort(SortOptions::new());
//! assert_eq!(sorted.to_map(), satchel::list![1, 2, 3, 4]);
//! # Ok::<(), satchel::Error>(())
//! ```

pub mod bag;
pub mod compare;
pub mod path;
pub mod value;

/// Re-export the bag types for easier access.
pub use bag::{Bag, MutableBag};
pub use value::{Key, Map, Object, Value};

/// Everything needed to call the bag API: both concrete types, the extension traits that
/// carry the query/derive/sort operations, and the core value types.
pub mod prelude {
    pub use crate::bag::{Bag, BagCore, Derive, Diff, MutableBag, Query, Random, Sort};
    pub use crate::compare::{Order, SortMode, SortOptions};
    pub use crate::value::{Key, KeyAccess, KeyAccessMut, Map, Object, Value};
}

/// Result type used throughout the Satchel library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Satchel library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[cfg(feature = "json")]
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured path errors from the path module
    #[error(transparent)]
    Path(path::PathError),

    /// Structured bag errors from the bag module
    #[error(transparent)]
    Bag(bag::BagError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            #[cfg(feature = "json")]
            Error::Serialize(_) => "serialize",
            Error::Path(_) => "path",
            Error::Bag(_) => "bag",
        }
    }

    /// Check if the caller passed a value outside the accepted input contract.
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            Error::Path(path_err) => path_err.is_invalid_argument(),
            Error::Bag(bag_err) => bag_err.is_invalid_argument(),
            #[cfg(feature = "json")]
            Error::Serialize(_) => false,
        }
    }

    /// Check if a write could not descend through the existing structure.
    pub fn is_structural_write(&self) -> bool {
        match self {
            Error::Path(path_err) => path_err.is_structural_write(),
            _ => false,
        }
    }

    /// Check if the data had a shape the operation cannot handle.
    pub fn is_logic_error(&self) -> bool {
        match self {
            Error::Bag(bag_err) => bag_err.is_logic_error(),
            _ => false,
        }
    }

    /// Check if this error is path-related.
    pub fn is_path_error(&self) -> bool {
        matches!(self, Error::Path(_))
    }

    /// Check if this error came from (de)serialization.
    pub fn is_serialization_error(&self) -> bool {
        #[cfg(feature = "json")]
        {
            matches!(self, Error::Serialize(_))
        }
        #[cfg(not(feature = "json"))]
        {
            false
        }
    }
}
