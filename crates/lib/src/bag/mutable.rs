//! The bag that can be changed in place.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Bag, BagCore, BagError};
use crate::{
    Result, path,
    value::{Key, KeyAccess, KeyAccessMut, Map, Value},
};

/// An ordered bag with in-place mutation.
///
/// `MutableBag` supports everything [`Bag`] does, and the derive operations still
/// return new bags. The methods defined here change the bag itself and, where
/// there is nothing to return, hand back `&mut Self` for chaining.
///
/// To share one bag between several owners, wrap it in an
/// [`Object::aliasing`](crate::Object::aliasing) handle.
///
/// # Examples
///
/// ```
/// use satchel::prelude::*;
///
/// let mut todo = MutableBag::new();
/// todo.add("write docs").add("fix tests").prepend("coffee");
/// assert_eq!(todo.to_map(), satchel::list!["coffee", "write docs", "fix tests"]);
///
/// todo.remove_item("fix tests");
/// assert_eq!(todo.remove_first(), Some(Value::from("coffee")));
/// assert_eq!(todo.to_map(), satchel::list!["write docs"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MutableBag {
    items: Map,
}

impl MutableBag {
    /// Creates an empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrows the entries
    pub fn as_map(&self) -> &Map {
        &self.items
    }

    /// Mutably borrows the entries
    pub fn as_map_mut(&mut self) -> &mut Map {
        &mut self.items
    }

    /// Copies the entries into a read-only [`Bag`]
    pub fn immutable(&self) -> Bag {
        Bag::from(self.items.clone())
    }

    /// Appends a value at the next natural index.
    ///
    /// If the key `i64::MAX` is already taken there is no next index and the value
    /// is dropped with a warning; [`try_add`](Self::try_add) reports it instead.
    pub fn add(&mut self, value: impl Into<Value>) -> &mut Self {
        self.items.push(value);
        self
    }

    /// Appends a value at the next natural index, failing if that index is taken
    pub fn try_add(&mut self, value: impl Into<Value>) -> Result<&mut Self> {
        let index = self.items.next_index();
        if self.items.try_push(value).is_none() {
            return Err(BagError::NoFreeIndex { index }.into());
        }
        Ok(self)
    }

    /// Inserts a value at the front. Integer keys are re-numbered from 0, string
    /// keys are kept.
    pub fn prepend(&mut self, value: impl Into<Value>) -> &mut Self {
        let mut items = Map::with_capacity(self.items.len() + 1);
        items.push(value);
        for (key, value) in std::mem::take(&mut self.items) {
            items.append_entry(&key, value);
        }
        self.items = items;
        self
    }

    /// Sets the value at `key`. An existing key keeps its position.
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> &mut Self {
        self.items.insert(key, value);
        self
    }

    /// Sets the value at `path`, creating intermediate maps as needed.
    ///
    /// ```
    /// use satchel::prelude::*;
    ///
    /// let mut bag = MutableBag::new();
    /// bag.set_path("server/ports/[]", 80)?
    ///     .set_path("server/ports/[]", 443)?;
    /// assert_eq!(bag.get_path("server/ports/1")?, Some(Value::Int(443)));
    ///
    /// bag.set("frozen", Bag::from(satchel::map! { "x" => 1 }));
    /// assert!(bag.set_path("frozen/x", 2).unwrap_err().is_structural_write());
    /// # Ok::<(), satchel::Error>(())
    /// ```
    pub fn set_path(&mut self, path: &str, value: impl Into<Value>) -> Result<&mut Self> {
        path::set(&mut self.items, path, value)?;
        Ok(self)
    }

    /// Removes every entry
    pub fn clear(&mut self) -> &mut Self {
        self.items.clear();
        self
    }

    /// Removes `key` and returns its value
    pub fn remove(&mut self, key: impl Into<Key>) -> Option<Value> {
        self.items.remove(&key.into())
    }

    /// Removes `key` and returns its value, or `default` if it was absent
    pub fn remove_or(&mut self, key: impl Into<Key>, default: impl Into<Value>) -> Value {
        self.remove(key).unwrap_or_else(|| default.into())
    }

    /// Removes the value at `path` and returns it
    pub fn remove_path(&mut self, path: &str) -> Result<Option<Value>> {
        Ok(path::remove(&mut self.items, path)?)
    }

    /// Removes the value at `path`, or returns `default` if nothing was there
    pub fn remove_path_or(&mut self, path: &str, default: impl Into<Value>) -> Result<Value> {
        Ok(path::remove_or(&mut self.items, path, default)?)
    }

    /// Removes the first value strictly equal to `item`
    pub fn remove_item(&mut self, item: impl Into<Value>) -> &mut Self {
        let item = item.into();
        let found = self
            .items
            .iter()
            .find(|(_, value)| **value == item)
            .map(|(key, _)| key.clone());
        if let Some(key) = found {
            self.items.remove(&key);
        }
        self
    }

    /// Removes and returns the first value. Integer keys are re-numbered from 0.
    pub fn remove_first(&mut self) -> Option<Value> {
        let (_, first) = self.items.shift()?;
        let mut items = Map::with_capacity(self.items.len());
        for (key, value) in std::mem::take(&mut self.items) {
            items.append_entry(&key, value);
        }
        self.items = items;
        Some(first)
    }

    /// Removes and returns the last value
    pub fn remove_last(&mut self) -> Option<Value> {
        self.items.pop().map(|(_, value)| value)
    }

    /// Mutably borrows the value at `key`
    pub fn get_mut(&mut self, key: impl Into<Key>) -> Option<&mut Value> {
        self.items.get_mut(&key.into())
    }
}

impl BagCore for MutableBag {
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
        Value::MutableBag(self)
    }
}

impl KeyAccess for MutableBag {
    fn has_key(&self, key: &Key) -> bool {
        self.items.contains_key(key)
    }

    fn get_key(&self, key: &Key) -> Option<Value> {
        self.items.get(key).cloned()
    }

    fn set_key(&mut self, key: Key, value: Value) {
        self.items.insert(key, value);
    }

    fn remove_key(&mut self, key: &Key) -> Option<Value> {
        self.items.remove(key)
    }

    fn append(&mut self, value: Value) -> Option<Key> {
        self.items.try_push(value)
    }

    fn entries(&self) -> Option<Map> {
        Some(self.items.clone())
    }
}

impl KeyAccessMut for MutableBag {
    fn get_key_ref(&self, key: &Key) -> Option<&Value> {
        self.items.get(key)
    }

    fn get_key_mut(&mut self, key: &Key) -> Option<&mut Value> {
        self.items.get_mut(key)
    }
}

impl From<Map> for MutableBag {
    fn from(items: Map) -> Self {
        Self { items }
    }
}

impl From<Bag> for MutableBag {
    fn from(bag: Bag) -> Self {
        Self {
            items: bag.into_items(),
        }
    }
}

impl FromIterator<Value> for MutableBag {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<(Key, Value)> for MutableBag {
    fn from_iter<T: IntoIterator<Item = (Key, Value)>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl Extend<(Key, Value)> for MutableBag {
    fn extend<T: IntoIterator<Item = (Key, Value)>>(&mut self, iter: T) {
        self.items.extend(iter);
    }
}

impl IntoIterator for MutableBag {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a MutableBag {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl AsRef<Map> for MutableBag {
    fn as_ref(&self) -> &Map {
        &self.items
    }
}

impl fmt::Display for MutableBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MutableBag{}", self.items)
    }
}
