//! Read-only questions about a bag's entries.

use super::{
    BagCore,
    search::{scan_backward, scan_forward},
};
use crate::{
    Result, path,
    value::{Key, Number, Value},
};

/// Operations that inspect a bag without building a new one.
///
/// Implemented for every [`BagCore`] type.
///
/// # Searching from an offset
///
/// The `*_from` variants start at `from_index`, which is clamped instead of
/// rejected: negative values count back from the last entry and stop at the first,
/// and values past the end start at the last entry.
///
/// ```
/// use satchel::prelude::*;
///
/// let bag = Bag::from_values(["a", "b", "c", "a", "b", "c"]);
/// assert_eq!(bag.index_of_from("a", -2), Some(Key::Int(3)));
/// assert_eq!(bag.index_of_from("a", 5), None);
/// assert_eq!(bag.last_index_of("b"), Some(Key::Int(4)));
/// ```
pub trait Query: BagCore {
    /// Returns true if `key` is present
    fn has(&self, key: impl Into<Key>) -> bool {
        self.items().contains_key(&key.into())
    }

    /// Returns true if every segment of `path` resolves
    fn has_path(&self, path: &str) -> Result<bool> {
        Ok(path::has(self.items(), path)?)
    }

    /// Returns true if some value is strictly equal to `item`
    fn has_item(&self, item: impl Into<Value>) -> bool {
        let item = item.into();
        self.items().values().any(|value| *value == item)
    }

    /// Gets a value by key
    fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.items().get(&key.into())
    }

    /// Gets a copy of the value at `key`, or `default`
    fn get_or(&self, key: impl Into<Key>, default: impl Into<Value>) -> Value {
        self.get(key).cloned().unwrap_or_else(|| default.into())
    }

    /// Gets a copy of the value at `path`
    fn get_path(&self, path: &str) -> Result<Option<Value>> {
        Ok(path::get(self.items(), path)?)
    }

    /// Gets a copy of the value at `path`, or `default`
    fn get_path_or(&self, path: &str, default: impl Into<Value>) -> Result<Value> {
        Ok(path::get_or(self.items(), path, default)?)
    }

    /// Returns the number of entries
    fn count(&self) -> usize {
        self.items().len()
    }

    /// Returns true if there are no entries
    fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Returns the first value
    fn first(&self) -> Option<&Value> {
        self.items().first().map(|(_, value)| value)
    }

    /// Returns the last value
    fn last(&self) -> Option<&Value> {
        self.items().last().map(|(_, value)| value)
    }

    /// Returns true if the keys are exactly `0..n-1` in order
    fn is_indexed(&self) -> bool {
        self.items().is_indexed()
    }

    /// Returns true if the bag is not indexed
    fn is_associative(&self) -> bool {
        self.items().is_associative()
    }

    /// Joins the text form of every value with `separator`
    fn join(&self, separator: &str) -> String {
        self.items()
            .values()
            .map(Value::to_text)
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Adds up all scalar values, coercing text and booleans.
    ///
    /// Containers and objects are skipped. The result is an integer until a float
    /// is involved or the sum overflows.
    ///
    /// ```
    /// use satchel::prelude::*;
    ///
    /// let bag = Bag::from_values([Value::Int(2), Value::from("3"), Value::from("x")]);
    /// assert_eq!(bag.sum(), Value::Int(5));
    /// assert_eq!(Bag::new().product(), Value::Int(1));
    /// ```
    fn sum(&self) -> Value {
        fold_numbers(self, Number::Int(0), i64::checked_add, |a, b| a + b)
    }

    /// Multiplies all scalar values, coercing like [`sum`](Query::sum)
    fn product(&self) -> Value {
        fold_numbers(self, Number::Int(1), i64::checked_mul, |a, b| a * b)
    }

    /// Key of the first value strictly equal to `item`
    fn index_of(&self, item: impl Into<Value>) -> Option<Key> {
        self.index_of_from(item, 0)
    }

    /// Key of the first value strictly equal to `item`, starting at `from_index`
    fn index_of_from(&self, item: impl Into<Value>, from_index: i64) -> Option<Key> {
        let item = item.into();
        scan_forward(self.items(), from_index, |_, value| *value == item).map(|(k, _)| k.clone())
    }

    /// Key of the last value strictly equal to `item`
    fn last_index_of(&self, item: impl Into<Value>) -> Option<Key> {
        let item = item.into();
        scan_backward(self.items(), None, |_, value| *value == item).map(|(k, _)| k.clone())
    }

    /// Key of the last value strictly equal to `item`, scanning back from `from_index`
    fn last_index_of_from(&self, item: impl Into<Value>, from_index: i64) -> Option<Key> {
        let item = item.into();
        scan_backward(self.items(), Some(from_index), |_, value| *value == item)
            .map(|(k, _)| k.clone())
    }

    /// First value matching `predicate`, which receives the key then the value
    fn find<F>(&self, predicate: F) -> Option<&Value>
    where
        F: FnMut(&Key, &Value) -> bool,
    {
        self.find_from(predicate, 0)
    }

    /// First value matching `predicate`, starting at `from_index`
    fn find_from<F>(&self, predicate: F, from_index: i64) -> Option<&Value>
    where
        F: FnMut(&Key, &Value) -> bool,
    {
        scan_forward(self.items(), from_index, predicate).map(|(_, value)| value)
    }

    /// Last value matching `predicate`
    fn find_last<F>(&self, predicate: F) -> Option<&Value>
    where
        F: FnMut(&Key, &Value) -> bool,
    {
        scan_backward(self.items(), None, predicate).map(|(_, value)| value)
    }

    /// Last value matching `predicate`, scanning back from `from_index`
    fn find_last_from<F>(&self, predicate: F, from_index: i64) -> Option<&Value>
    where
        F: FnMut(&Key, &Value) -> bool,
    {
        scan_backward(self.items(), Some(from_index), predicate).map(|(_, value)| value)
    }

    /// Key of the first entry matching `predicate`
    fn find_key<F>(&self, predicate: F) -> Option<Key>
    where
        F: FnMut(&Key, &Value) -> bool,
    {
        self.find_key_from(predicate, 0)
    }

    /// Key of the first entry matching `predicate`, starting at `from_index`
    fn find_key_from<F>(&self, predicate: F, from_index: i64) -> Option<Key>
    where
        F: FnMut(&Key, &Value) -> bool,
    {
        scan_forward(self.items(), from_index, predicate).map(|(key, _)| key.clone())
    }

    /// Key of the last entry matching `predicate`
    fn find_last_key<F>(&self, predicate: F) -> Option<Key>
    where
        F: FnMut(&Key, &Value) -> bool,
    {
        scan_backward(self.items(), None, predicate).map(|(key, _)| key.clone())
    }

    /// Key of the last entry matching `predicate`, scanning back from `from_index`
    fn find_last_key_from<F>(&self, predicate: F, from_index: i64) -> Option<Key>
    where
        F: FnMut(&Key, &Value) -> bool,
    {
        scan_backward(self.items(), Some(from_index), predicate).map(|(key, _)| key.clone())
    }

    /// Folds the entries in order. `f` receives the accumulator, the key and the value.
    fn reduce<A, F>(&self, init: A, mut f: F) -> A
    where
        F: FnMut(A, &Key, &Value) -> A,
    {
        self.items()
            .iter()
            .fold(init, |acc, (key, value)| f(acc, key, value))
    }
}

impl<T: BagCore> Query for T {}

fn fold_numbers<B: BagCore>(
    bag: &B,
    init: Number,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Value {
    bag.items()
        .values()
        .filter(|value| value.is_scalar())
        .map(Value::to_number)
        .fold(init, |acc, n| match (acc, n) {
            (Number::Int(a), Number::Int(b)) => match int_op(a, b) {
                Some(result) => Number::Int(result),
                None => Number::Float(float_op(a as f64, b as f64)),
            },
            (a, b) => Number::Float(float_op(a.as_f64(), b.as_f64())),
        })
        .to_value()
}
