//! The native insertion-ordered map.
//!
//! [`Map`] is the container every bag wraps and the representation of nested
//! maps and lists inside a [`Value`]. A map whose keys are exactly `0..n-1` in
//! order is *indexed* and behaves as a list; any other map is *associative*.

use std::fmt;

use indexmap::IndexMap;
use tracing::warn;

use super::{Key, Value};

/// An insertion-ordered map from [`Key`] to [`Value`].
///
/// Keys are unique. Assigning to an existing key replaces the value in place and
/// keeps its position; new keys are appended.
///
/// # Examples
///
/// ```
/// use satchel::{Key, Map, Value};
///
/// let mut map = Map::new();
/// map.insert("name", "Alice");
/// map.push("first");
/// map.push("second");
///
/// assert_eq!(map.len(), 3);
/// assert_eq!(map.get(&Key::Int(1)), Some(&Value::from("second")));
/// assert!(map.is_associative());
/// ```
#[derive(Clone, Default)]
pub struct Map {
    entries: IndexMap<Key, Value>,
    /// Next natural index for `push`. Never decreases on `remove`; `pop` and `clear` reset it.
    next_free: i64,
}

impl Map {
    /// Creates a new empty map
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            next_free: 0,
        }
    }

    /// Creates an empty map with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
            next_free: 0,
        }
    }

    /// Creates an indexed map (a list) from a sequence of values
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        values.into_iter().map(Into::<Value>::into).collect()
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if the map contains the given key
    pub fn contains_key(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }

    /// Gets a value by key
    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Gets a mutable reference to a value by key
    pub fn get_mut(&mut self, key: &Key) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Gets the entry at a position
    pub fn get_index(&self, index: usize) -> Option<(&Key, &Value)> {
        self.entries.get_index(index)
    }

    /// Returns the position of a key
    pub fn index_of_key(&self, key: &Key) -> Option<usize> {
        self.entries.get_index_of(key)
    }

    /// Returns the first entry
    pub fn first(&self) -> Option<(&Key, &Value)> {
        self.entries.first()
    }

    /// Returns the last entry
    pub fn last(&self) -> Option<(&Key, &Value)> {
        self.entries.last()
    }

    /// Sets a value, returning the previous value if the key was present
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        self.track(&key);
        self.entries.insert(key, value.into())
    }

    fn track(&mut self, key: &Key) {
        if let Key::Int(n) = key {
            if *n >= self.next_free {
                self.next_free = n.saturating_add(1);
            }
        }
    }

    /// Appends a value at the next natural index and returns its key.
    ///
    /// Once the key `i64::MAX` is taken there is no next index, and the value is
    /// dropped. Use [`try_push`](Self::try_push) where that must be reported.
    pub fn push(&mut self, value: impl Into<Value>) -> Key {
        let key = Key::Int(self.next_free);
        if self.try_push(value).is_none() {
            warn!(next_index = self.next_free, "Dropped push into a map with no free index");
        }
        key
    }

    /// Appends a value at the next natural index, or returns `None` without
    /// changing the map if that index is already taken
    pub fn try_push(&mut self, value: impl Into<Value>) -> Option<Key> {
        let key = self.claim_next()?;
        self.entries.insert(key.clone(), value.into());
        Some(key)
    }

    /// Like [`try_push`](Self::try_push), but borrows the new value back
    pub fn try_push_mut(&mut self, value: impl Into<Value>) -> Option<&mut Value> {
        let key = self.claim_next()?;
        Some(self.entries.entry(key).or_insert(value.into()))
    }

    // next_free saturates at i64::MAX, so the slot can only be taken once the
    // index space is used up.
    fn claim_next(&mut self) -> Option<Key> {
        let key = Key::Int(self.next_free);
        if self.entries.contains_key(&key) {
            return None;
        }
        self.next_free = self.next_free.saturating_add(1);
        Some(key)
    }

    /// Gets the value at `key`, inserting one built by `default` if the key is absent
    pub fn get_or_insert_with(&mut self, key: Key, default: impl FnOnce() -> Value) -> &mut Value {
        self.track(&key);
        self.entries.entry(key).or_insert_with(default)
    }

    /// The key `push` would use next.
    ///
    /// This is one past the largest non-negative integer key inserted so far. Removing
    /// an entry does not lower it; `pop` recomputes it from the remaining keys and
    /// `clear` resets it to 0.
    pub fn next_index(&self) -> i64 {
        self.next_free
    }

    fn recompute_next_free(&mut self) {
        self.next_free = self
            .entries
            .keys()
            .filter_map(Key::as_int)
            .filter(|n| *n >= 0)
            .max()
            .map_or(0, |n| n.saturating_add(1));
    }

    /// Removes a key, keeping the order of the remaining entries
    pub fn remove(&mut self, key: &Key) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Removes and returns the first entry
    pub fn shift(&mut self) -> Option<(Key, Value)> {
        self.entries.shift_remove_index(0)
    }

    /// Removes and returns the last entry
    pub fn pop(&mut self) -> Option<(Key, Value)> {
        let popped = self.entries.pop();
        self.recompute_next_free();
        popped
    }

    /// Removes all entries
    pub fn clear(&mut self) {
        self.entries.clear();
        self.next_free = 0;
    }

    /// Returns an iterator over all key-value pairs in order
    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.entries.iter()
    }

    /// Returns a mutable iterator over all key-value pairs in order
    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, Key, Value> {
        self.entries.iter_mut()
    }

    /// Returns an iterator over all keys in order
    pub fn keys(&self) -> indexmap::map::Keys<'_, Key, Value> {
        self.entries.keys()
    }

    /// Returns an iterator over all values in order
    pub fn values(&self) -> indexmap::map::Values<'_, Key, Value> {
        self.entries.values()
    }

    /// Returns a mutable iterator over all values in order
    pub fn values_mut(&mut self) -> indexmap::map::ValuesMut<'_, Key, Value> {
        self.entries.values_mut()
    }

    /// Returns true if the keys are exactly `0..n-1` in order. The empty map is indexed.
    pub fn is_indexed(&self) -> bool {
        self.entries
            .keys()
            .enumerate()
            .all(|(i, key)| key.as_int() == Some(i as i64))
    }

    /// Returns true if the map is not indexed
    pub fn is_associative(&self) -> bool {
        !self.is_indexed()
    }

    /// Appends an entry, re-numbering integer keys and keeping string keys.
    ///
    /// This is the building block for every operation that re-indexes a list
    /// while leaving named entries untouched.
    pub fn append_entry(&mut self, key: &Key, value: Value) {
        match key {
            Key::Int(_) => {
                self.push(value);
            }
            Key::Str(_) => {
                self.entries.insert(key.clone(), value);
            }
        }
    }

    /// Converts to a JSON-like string representation for human-readable output.
    ///
    /// Indexed maps render as arrays, associative maps as objects.
    pub fn to_json_string(&self) -> String {
        let mut result = String::with_capacity(self.entries.len() * 16);
        if self.is_indexed() {
            result.push('[');
            for (i, value) in self.entries.values().enumerate() {
                if i > 0 {
                    result.push(',');
                }
                result.push_str(&value.to_json_string());
            }
            result.push(']');
        } else {
            result.push('{');
            for (i, (key, value)) in self.entries.iter().enumerate() {
                if i > 0 {
                    result.push(',');
                }
                result.push_str(&super::quote_json(&key.to_string()));
                result.push(':');
                result.push_str(&value.to_json_string());
            }
            result.push('}');
        }
        result
    }
}

/// Maps are equal when they hold the same entries in the same order.
impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(other.entries.iter())
                .all(|((ka, va), (kb, vb))| ka == kb && va == vb)
    }
}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for (key, value) in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
            first = false;
        }
        write!(f, "}}")
    }
}

impl FromIterator<(Key, Value)> for Map {
    fn from_iter<T: IntoIterator<Item = (Key, Value)>>(iter: T) -> Self {
        let mut map = Map::new();
        map.extend(iter);
        map
    }
}

impl FromIterator<Value> for Map {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        let mut map = Map::new();
        for value in iter {
            map.push(value);
        }
        map
    }
}

impl Extend<(Key, Value)> for Map {
    fn extend<T: IntoIterator<Item = (Key, Value)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for Map {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl AsRef<Map> for Map {
    fn as_ref(&self) -> &Map {
        self
    }
}

impl<V: Into<Value>> From<Vec<V>> for Map {
    fn from(values: Vec<V>) -> Self {
        Map::from_values(values)
    }
}

// Builder pattern methods
impl Map {
    /// Builder method to set a value and return self
    pub fn with(mut self, key: impl Into<Key>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder method to append a value and return self
    pub fn with_item(mut self, value: impl Into<Value>) -> Self {
        self.push(value);
        self
    }
}

/// Builds a [`Map`] from `key => value` pairs.
///
/// ```
/// use satchel::{map, Key, Value};
///
/// let m = map! { "name" => "Alice", "tags" => map! { "role" => "admin" } };
/// assert_eq!(m.get(&Key::from("name")), Some(&Value::from("Alice")));
/// ```
#[macro_export]
macro_rules! map {
    () => {
        $crate::value::Map::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::value::Map::new();
        $(
            map.insert($key, $value);
        )+
        map
    }};
}

/// Builds an indexed [`Map`] (a list) from values.
///
/// ```
/// use satchel::list;
///
/// let l = list!["a", "b", 3];
/// assert!(l.is_indexed());
/// assert_eq!(l.len(), 3);
/// ```
#[macro_export]
macro_rules! list {
    () => {
        $crate::value::Map::new()
    };
    ($($value:expr),+ $(,)?) => {{
        let mut map = $crate::value::Map::new();
        $(
            map.push($value);
        )+
        map
    }};
}
