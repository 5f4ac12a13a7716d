//! Operations that build a new bag from an existing one.

use super::{BagCore, BagError};
use crate::value::{Key, Map, Object, Value, merge};

/// The most entries a single [`Derive::pad`] call may add
pub const MAX_PAD: usize = 1 << 20;

/// Operations that return a new bag of the receiver's type.
///
/// Implemented for every [`BagCore`] type. The receiver is left untouched and,
/// unless an operation says otherwise, entries keep their relative order.
///
/// Callbacks receive the key first and the value second.
pub trait Derive: BagCore {
    /// The keys, as an indexed bag
    fn keys(&self) -> Self {
        Self::from_items(self.items().keys().map(Key::to_value).collect())
    }

    /// The values, re-indexed from 0
    fn values(&self) -> Self {
        Self::from_items(self.items().values().cloned().collect())
    }

    /// Applies `f` to every entry, keeping the keys.
    ///
    /// ```
    /// use satchel::prelude::*;
    ///
    /// let bag = Bag::from(satchel::map! { "a" => 1, "b" => 2 });
    /// let labelled = bag.map(|key, value| format!("{key}:{value}"));
    /// assert_eq!(labelled.to_map(), satchel::map! { "a" => "a:1", "b" => "b:2" });
    /// ```
    fn map<F, V>(&self, mut f: F) -> Self
    where
        F: FnMut(&Key, &Value) -> V,
        V: Into<Value>,
    {
        Self::from_items(
            self.items()
                .iter()
                .map(|(key, value)| (key.clone(), f(key, value).into()))
                .collect(),
        )
    }

    /// Replaces every key with the result of `f`. Later duplicates overwrite earlier ones.
    fn map_keys<F, K>(&self, mut f: F) -> Self
    where
        F: FnMut(&Key, &Value) -> K,
        K: Into<Key>,
    {
        Self::from_items(
            self.items()
                .iter()
                .map(|(key, value)| (f(key, value).into(), value.clone()))
                .collect(),
        )
    }

    /// Applies `f` to every value that is not a map or bag, descending into nested
    /// maps and bags. Nested containers keep their type.
    fn map_recursive<F, V>(&self, mut f: F) -> Self
    where
        F: FnMut(&Key, &Value) -> V,
        V: Into<Value>,
    {
        fn walk<F, V>(items: &Map, f: &mut F) -> Map
        where
            F: FnMut(&Key, &Value) -> V,
            V: Into<Value>,
        {
            items
                .iter()
                .map(|(key, value)| {
                    let mapped = match value {
                        Value::Map(map) => Value::Map(walk(map, f)),
                        Value::Bag(bag) => Value::Bag(BagCore::from_items(walk(bag.items(), f))),
                        Value::MutableBag(bag) => {
                            Value::MutableBag(BagCore::from_items(walk(bag.items(), f)))
                        }
                        leaf => f(key, leaf).into(),
                    };
                    (key.clone(), mapped)
                })
                .collect()
        }

        Self::from_items(walk(self.items(), &mut f))
    }

    /// Keeps the entries matching `predicate`, with their keys
    fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&Key, &Value) -> bool,
    {
        Self::from_items(
            self.items()
                .iter()
                .filter(|(key, value)| predicate(key, value))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }

    /// Drops the entries matching `predicate`, keeping the keys of the rest
    fn reject<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&Key, &Value) -> bool,
    {
        self.filter(|key, value| !predicate(key, value))
    }

    /// Drops falsy values (see [`Value::is_truthy`])
    fn clean(&self) -> Self {
        self.filter(|_, value| value.is_truthy())
    }

    /// Overlays `other` onto this bag key by key
    fn replace(&self, other: impl AsRef<Map>) -> Self {
        Self::from_items(merge::replace(self.items(), other.as_ref()))
    }

    /// Recursively overlays `other` onto this bag.
    ///
    /// Associative maps on both sides are merged. A null in `other` does not erase
    /// a nested map or list. Everything else, lists included, is replaced.
    ///
    /// ```
    /// use satchel::{list, map, prelude::*};
    ///
    /// let base = Bag::from(map! { "a" => map! { "b" => "foo" }, "l" => list!["x", "y"] });
    /// let merged = base.replace_recursive(map! {
    ///     "a" => map! { "c" => "bar" },
    ///     "l" => list!["z"],
    /// });
    /// assert_eq!(
    ///     merged.to_map(),
    ///     map! { "a" => map! { "b" => "foo", "c" => "bar" }, "l" => list!["z"] }
    /// );
    /// ```
    fn replace_recursive(&self, other: impl AsRef<Map>) -> Self {
        Self::from_items(merge::replace_recursive(self.items(), other.as_ref()))
    }

    /// Fills in keys from `defaults` that this bag does not have
    fn defaults(&self, defaults: impl AsRef<Map>) -> Self {
        Self::from_items(merge::replace(defaults.as_ref(), self.items()))
    }

    /// Like [`replace_recursive`](Derive::replace_recursive) with this bag's values winning
    fn defaults_recursive(&self, defaults: impl AsRef<Map>) -> Self {
        Self::from_items(merge::replace_recursive(defaults.as_ref(), self.items()))
    }

    /// Appends the entries of `other`.
    ///
    /// Integer keys from both sides are re-numbered; string keys are kept, and
    /// `other` wins when both sides have the same string key.
    fn merge(&self, other: impl AsRef<Map>) -> Self {
        Self::from_items(merge::merge([self.items(), other.as_ref()]))
    }

    /// A positional slice.
    ///
    /// A negative `offset` counts from the end. `length` of `None` runs to the end,
    /// and a negative `length` stops that many entries before the end. Integer keys
    /// are re-numbered unless `preserve_keys` is set; string keys are always kept.
    fn slice(&self, offset: i64, length: Option<i64>, preserve_keys: bool) -> Self {
        let len = self.items().len() as i64;
        let start = if offset < 0 {
            (len + offset).max(0)
        } else {
            offset.min(len)
        };
        let end = match length {
            None => len,
            Some(n) if n < 0 => (len + n).max(start),
            Some(n) => start.saturating_add(n).min(len),
        };

        let mut items = Map::new();
        for (key, value) in self
            .items()
            .iter()
            .skip(start as usize)
            .take((end - start) as usize)
        {
            if preserve_keys {
                items.insert(key, value.clone());
            } else {
                items.append_entry(key, value.clone());
            }
        }
        Self::from_items(items)
    }

    /// Splits into the entries matching `predicate` and the rest, keys kept in both
    fn partition<F>(&self, mut predicate: F) -> (Self, Self)
    where
        F: FnMut(&Key, &Value) -> bool,
    {
        let mut matching = Map::new();
        let mut rest = Map::new();
        for (key, value) in self.items() {
            if predicate(key, value) {
                matching.insert(key, value.clone());
            } else {
                rest.insert(key, value.clone());
            }
        }
        (Self::from_items(matching), Self::from_items(rest))
    }

    /// Picks `column` out of every row.
    ///
    /// Rows are nested maps, bags or iterable objects; rows without the column are
    /// skipped. With `index_key`, each result is keyed by that field of its row when
    /// the row has a usable one, and appended otherwise.
    ///
    /// ```
    /// use satchel::{map, prelude::*};
    ///
    /// let rows = Bag::from_values([
    ///     map! { "id" => 3, "name" => "ann" },
    ///     map! { "id" => 5, "name" => "bob" },
    ///     map! { "id" => 8 },
    /// ]);
    /// assert_eq!(rows.column("name", None).to_map(), satchel::list!["ann", "bob"]);
    /// assert_eq!(
    ///     rows.column("name", Some(Key::from("id"))).to_map(),
    ///     map! { 3 => "ann", 5 => "bob" }
    /// );
    /// ```
    fn column(&self, column: impl Into<Key>, index_key: Option<Key>) -> Self {
        let column = column.into();
        let mut items = Map::new();
        for row in self.items().values() {
            let Some(value) = field(row, &column) else {
                continue;
            };
            match index_key
                .as_ref()
                .and_then(|index| field(row, index))
                .and_then(|index| Key::from_value(&index))
            {
                Some(key) => {
                    items.insert(key, value);
                }
                None => {
                    items.push(value);
                }
            }
        }
        Self::from_items(items)
    }

    /// Swaps keys and values. Later duplicates win.
    ///
    /// Fails if a value is not an integer or text.
    fn flip(&self) -> Result<Self, BagError> {
        let mut items = Map::with_capacity(self.items().len());
        for (key, value) in self.items() {
            items.insert(scalar_key(value, "flip")?, key.to_value());
        }
        Ok(Self::from_items(items))
    }

    /// Drops values strictly equal to an earlier value, keeping first occurrences
    /// and their keys
    fn unique(&self) -> Self {
        let mut seen: Vec<&Value> = Vec::new();
        let mut items = Map::new();
        for (key, value) in self.items() {
            if !seen.contains(&value) {
                seen.push(value);
                items.insert(key, value.clone());
            }
        }
        Self::from_items(items)
    }

    /// Splits into bags of `size` entries; the last may be shorter.
    ///
    /// Inner bags have this bag's type and are re-indexed unless `preserve_keys`
    /// is set.
    ///
    /// ```
    /// use satchel::prelude::*;
    ///
    /// let chunks = Bag::from_values(["a", "b", "c", "d", "e"]).chunk(2, false)?;
    /// assert_eq!(chunks.count(), 3);
    /// assert_eq!(chunks.get(2), Some(&Value::Bag(Bag::from_values(["e"]))));
    /// # Ok::<(), satchel::Error>(())
    /// ```
    fn chunk(&self, size: usize, preserve_keys: bool) -> Result<Self, BagError> {
        if size == 0 {
            return Err(BagError::InvalidChunkSize);
        }
        let mut chunks = Map::new();
        let mut current = Map::new();
        for (key, value) in self.items() {
            if preserve_keys {
                current.insert(key, value.clone());
            } else {
                current.push(value.clone());
            }
            if current.len() == size {
                chunks.push(Self::from_items(std::mem::take(&mut current)).into_value());
            }
        }
        if !current.is_empty() {
            chunks.push(Self::from_items(current).into_value());
        }
        Ok(Self::from_items(chunks))
    }

    /// Grows the bag to `|size|` entries with copies of `value`.
    ///
    /// A positive size pads at the end and a negative size at the start. Integer
    /// keys are re-numbered. A bag already at or above the size is returned as a copy.
    ///
    /// Fails if more than [`MAX_PAD`] entries would be added.
    fn pad(&self, size: i64, value: impl Into<Value>) -> Result<Self, BagError> {
        let len = self.items().len();
        let requested = size.unsigned_abs();
        let target = usize::try_from(requested).unwrap_or(usize::MAX);
        if target <= len {
            return Ok(self.clone());
        }
        if target - len > MAX_PAD {
            return Err(BagError::PadTooLarge {
                requested,
                limit: MAX_PAD,
            });
        }

        let value = value.into();
        let padding = std::iter::repeat_n(value, target - len).map(|v| (Key::Int(0), v));
        let entries = self.items().iter().map(|(k, v)| (k.clone(), v.clone()));

        let mut items = Map::with_capacity(target);
        if size > 0 {
            for (key, value) in entries.chain(padding) {
                items.append_entry(&key, value);
            }
        } else {
            for (key, value) in padding.chain(entries) {
                items.append_entry(&key, value);
            }
        }
        Ok(Self::from_items(items))
    }

    /// Counts occurrences of each value.
    ///
    /// Fails if a value is not an integer or text.
    fn count_values(&self) -> Result<Self, BagError> {
        let mut counts = Map::new();
        for value in self.items().values() {
            let key = scalar_key(value, "count")?;
            let count = counts.get(&key).and_then(Value::as_int).unwrap_or(0);
            counts.insert(key, count + 1);
        }
        Ok(Self::from_items(counts))
    }

    /// Flattens nested maps, bags and iterable objects into one list, down to
    /// `depth` levels.
    ///
    /// A depth of 0 only re-indexes the values; use `usize::MAX` to flatten fully.
    /// Scalars and objects without [`entries`](crate::KeyAccess::entries) are kept as they are.
    fn flatten(&self, depth: usize) -> Self {
        fn walk(items: &Map, depth: usize, out: &mut Map) {
            for value in items.values() {
                if depth > 0 {
                    if let Some(nested) = value.as_map() {
                        walk(nested, depth - 1, out);
                        continue;
                    }
                    if let Some(nested) = value.as_object().and_then(Object::entries) {
                        walk(&nested, depth - 1, out);
                        continue;
                    }
                }
                out.push(value.clone());
            }
        }

        let mut items = Map::new();
        walk(self.items(), depth, &mut items);
        Self::from_items(items)
    }

    /// Reverses the order. String keys are kept; integer keys are re-numbered
    /// unless `preserve_keys` is set.
    fn reverse(&self, preserve_keys: bool) -> Self {
        let mut items = Map::with_capacity(self.items().len());
        for (key, value) in self.items().iter().rev() {
            if preserve_keys {
                items.insert(key, value.clone());
            } else {
                items.append_entry(key, value.clone());
            }
        }
        Self::from_items(items)
    }
}

impl<T: BagCore> Derive for T {}

/// Reads `key` from a row that may be a map, a bag or an object
fn field(row: &Value, key: &Key) -> Option<Value> {
    match row {
        Value::Object(object) => object.borrow().ok()?.get_key(key),
        other => other.as_map()?.get(key).cloned(),
    }
}

fn scalar_key(value: &Value, operation: &'static str) -> Result<Key, BagError> {
    match value {
        Value::Int(n) => Ok(Key::Int(*n)),
        Value::Text(s) => Ok(Key::from(s.as_str())),
        other => Err(BagError::NonScalarValue {
            operation,
            type_name: other.type_name().to_string(),
        }),
    }
}
