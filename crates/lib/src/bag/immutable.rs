//! The read-only bag.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{BagCore, MutableBag};
use crate::value::{Key, Map, Value};

/// An ordered bag with no mutating methods.
///
/// Every operation returns a new `Bag` and leaves the receiver as it was. A `Bag`
/// nested inside another container is read-only to the path functions too: a
/// write that reaches it fails with [`PathError::ReadOnly`](crate::path::PathError::ReadOnly).
///
/// # Examples
///
/// ```
/// use satchel::{map, prelude::*};
///
/// let config = Bag::from(map! { "debug" => false, "level" => "info" });
/// let louder = config.replace(map! { "level" => "trace" });
///
/// assert_eq!(config.get("level"), Some(&Value::from("info")));
/// assert_eq!(louder.get("level"), Some(&Value::from("trace")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bag {
    items: Map,
}

impl Bag {
    /// Creates an empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrows the entries
    pub fn as_map(&self) -> &Map {
        &self.items
    }

    /// Copies the entries into a [`MutableBag`]
    pub fn mutable(&self) -> MutableBag {
        MutableBag::from(self.items.clone())
    }
}

impl BagCore for Bag {
    fn items(&self) -> &Map {
        &self.items
    }

    fn from_items(items: Map) -> Self {
        Self { items }
    }

    fn into_items(self) -> Map {
        self.items
    }

    fn into_value(self) -> Value {
        Value::Bag(self)
    }
}

impl From<Map> for Bag {
    fn from(items: Map) -> Self {
        Self { items }
    }
}

impl From<MutableBag> for Bag {
    fn from(bag: MutableBag) -> Self {
        Self {
            items: bag.into_items(),
        }
    }
}

impl FromIterator<Value> for Bag {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<(Key, Value)> for Bag {
    fn from_iter<T: IntoIterator<Item = (Key, Value)>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Bag {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Bag {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl AsRef<Map> for Bag {
    fn as_ref(&self) -> &Map {
        &self.items
    }
}

impl fmt::Display for Bag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bag{}", self.items)
    }
}
