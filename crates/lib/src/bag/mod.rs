//! Ordered bags: chainable collections over a single [`Map`].
//!
//! There are two concrete bags. [`Bag`] has no mutating methods; [`MutableBag`]
//! adds in-place mutation through `&mut self`. Both implement [`BagCore`], and
//! every other operation lives on an extension trait with a blanket
//! implementation for all `BagCore` types:
//!
//! - [`Query`] answers questions without building a new bag
//! - [`Derive`] builds a new bag from the entries
//! - [`Diff`] compares against another map or bag
//! - [`Sort`] orders values or keys
//! - [`Random`] samples and shuffles
//!
//! Operations that build a bag return the receiver's own type, so a chain that
//! starts from a `MutableBag` stays a `MutableBag`. The receiver is never modified.
//!
//! ```
//! use satchel::prelude::*;
//!
//! let scores = MutableBag::from(satchel::map! { "ann" => 7, "bob" => 0, "cid" => 12 });
//! let passed: MutableBag = scores.clean().filter(|_, score| *score != 7);
//! assert_eq!(passed.keys().to_map(), satchel::list!["cid"]);
//! assert_eq!(scores.count(), 3);
//! ```

use crate::value::{Key, Map, Value};

mod derive;
mod diff;
mod errors;
mod immutable;
mod mutable;
mod query;
mod random;
mod search;
mod sort;

pub use derive::{Derive, MAX_PAD};
pub use diff::Diff;
pub use errors::BagError;
pub use immutable::Bag;
pub use mutable::MutableBag;
pub use query::Query;
pub use random::Random;
pub use sort::Sort;

/// The contract shared by [`Bag`] and [`MutableBag`].
///
/// Implementors only provide access to the wrapped [`Map`]; construction,
/// conversion and every extension trait build on these four methods.
pub trait BagCore: Sized + Clone {
    /// Borrows the entries
    fn items(&self) -> &Map;

    /// Builds a bag of this type around `items`
    fn from_items(items: Map) -> Self;

    /// Unwraps the entries
    fn into_items(self) -> Map;

    /// Wraps this bag in the matching [`Value`] variant
    fn into_value(self) -> Value;

    /// Builds an indexed bag from a sequence of values
    fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::from_items(Map::from_values(values))
    }

    /// Normalizes a value into a bag.
    ///
    /// Null gives an empty bag, maps and bags give their entries, and objects give
    /// their [`entries`](crate::value::KeyAccess::entries). Scalars and objects that
    /// cannot be iterated are rejected.
    ///
    /// ```
    /// use satchel::prelude::*;
    ///
    /// assert!(Bag::from_value(Value::Null)?.is_empty());
    /// assert_eq!(Bag::from_value(satchel::list![1, 2])?.count(), 2);
    /// assert!(Bag::from_value(42).is_err());
    /// # Ok::<(), satchel::Error>(())
    /// ```
    fn from_value(source: impl Into<Value>) -> Result<Self, BagError> {
        let source = source.into();
        let items = match source {
            Value::Null => Map::new(),
            Value::Map(map) => map,
            Value::Bag(bag) => bag.into_items(),
            Value::MutableBag(bag) => bag.into_items(),
            Value::Object(ref object) => object.entries().ok_or_else(|| BagError::NotIterable {
                type_name: object.type_name().to_string(),
            })?,
            other => {
                return Err(BagError::NotIterable {
                    type_name: other.type_name().to_string(),
                });
            }
        };
        Ok(Self::from_items(items))
    }

    /// Like [`from_value`](BagCore::from_value), then wraps every nested map or bag
    /// as this bag type, recursively. Objects are left as they are.
    fn from_recursive(source: impl Into<Value>) -> Result<Self, BagError> {
        let bag = Self::from_value(source)?;
        Ok(Self::from_items(wrap_recursive::<Self>(bag.into_items())))
    }

    /// Zips keys with values.
    ///
    /// ```
    /// use satchel::prelude::*;
    ///
    /// let bag = Bag::combine(["red", "green"], ["bad", "good"])?;
    /// assert_eq!(bag.to_map(), satchel::map! { "red" => "bad", "green" => "good" });
    /// # Ok::<(), satchel::Error>(())
    /// ```
    fn combine<K, V>(keys: K, values: V) -> Result<Self, BagError>
    where
        K: IntoIterator,
        K::Item: Into<Value>,
        V: IntoIterator,
        V::Item: Into<Value>,
    {
        let keys: Vec<Value> = keys.into_iter().map(Into::into).collect();
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if keys.len() != values.len() {
            return Err(BagError::LengthMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }

        let mut items = Map::with_capacity(keys.len());
        for (key, value) in keys.into_iter().zip(values) {
            let key = Key::from_value(&key).ok_or_else(|| BagError::InvalidKey {
                type_name: key.type_name().to_string(),
            })?;
            items.insert(key, value);
        }
        Ok(Self::from_items(items))
    }

    /// Copies the entries into a plain map
    fn to_map(&self) -> Map {
        self.items().clone()
    }

    /// Copies the entries into a plain map, unwrapping nested bags into maps
    fn to_map_recursive(&self) -> Map {
        unwrap_recursive(self.items())
    }

    /// Iterates over the entries in order
    fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.items().iter()
    }

    /// Converts to a `serde_json::Value`
    #[cfg(feature = "json")]
    fn to_json(&self) -> crate::Result<serde_json::Value> {
        Ok(serde_json::to_value(self.items())?)
    }

    /// Serializes to compact JSON text
    #[cfg(feature = "json")]
    fn to_json_string(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self.items())?)
    }

    /// Parses a JSON array or object
    #[cfg(feature = "json")]
    fn from_json_str(json: &str) -> crate::Result<Self> {
        Ok(Self::from_value(Value::from_json_str(json)?)?)
    }

    /// Builds a bag from the fields of any serializable struct or map
    #[cfg(feature = "json")]
    fn from_serialize<T: serde::Serialize + ?Sized>(value: &T) -> crate::Result<Self> {
        Ok(Self::from_value(Value::from_serialize(value)?)?)
    }
}

fn wrap_recursive<B: BagCore>(items: Map) -> Map {
    items
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::Map(map) => B::from_items(wrap_recursive::<B>(map)).into_value(),
                Value::Bag(bag) => B::from_items(wrap_recursive::<B>(bag.into_items())).into_value(),
                Value::MutableBag(bag) => {
                    B::from_items(wrap_recursive::<B>(bag.into_items())).into_value()
                }
                other => other,
            };
            (key, value)
        })
        .collect()
}

fn unwrap_recursive(items: &Map) -> Map {
    items
        .iter()
        .map(|(key, value)| {
            let value = match value.as_map() {
                Some(map) => Value::Map(unwrap_recursive(map)),
                None => value.clone(),
            };
            (key.clone(), value)
        })
        .collect()
}
