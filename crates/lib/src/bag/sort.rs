//! Stable sorting by value or by key.

use std::cmp::Ordering;

use super::BagCore;
use crate::{
    compare::SortOptions,
    value::{Key, Map, Value},
};

/// Sorting operations.
///
/// All sorts are stable: entries that compare equal keep their relative order.
/// Value sorts re-index the result unless keys are preserved; key sorts always
/// keep the keys.
///
/// ```
/// use satchel::{map, prelude::*};
///
/// let stock = Bag::from(map! { "pear" => 3, "fig" => 10, "apple" => 3 });
///
/// let by_count = stock.sort(SortOptions::new().descending().preserve_keys(true));
/// assert_eq!(by_count.keys().to_map(), satchel::list!["fig", "pear", "apple"]);
///
/// let by_name = stock.sort_keys(SortOptions::new());
/// assert_eq!(by_name.keys().to_map(), satchel::list!["apple", "fig", "pear"]);
/// ```
pub trait Sort: BagCore {
    /// Sorts the values
    fn sort(&self, options: SortOptions) -> Self {
        self.sort_with(|a, b| options.compare(a, b), options.preserve_keys)
    }

    /// Sorts the values by a projection of each value, computed once per entry
    fn sort_by<F, V>(&self, mut project: F, options: SortOptions) -> Self
    where
        F: FnMut(&Value) -> V,
        V: Into<Value>,
    {
        let mut decorated: Vec<(Value, (&Key, &Value))> = self
            .items()
            .iter()
            .map(|entry| (project(entry.1).into(), entry))
            .collect();
        decorated.sort_by(|(a, _), (b, _)| options.compare(a, b));
        Self::from_items(rebuild(
            decorated.into_iter().map(|(_, entry)| entry),
            options.preserve_keys,
        ))
    }

    /// Sorts the values with a three-way comparator
    fn sort_with<F>(&self, mut compare: F, preserve_keys: bool) -> Self
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        let mut entries: Vec<(&Key, &Value)> = self.items().iter().collect();
        entries.sort_by(|(_, a), (_, b)| compare(*a, *b));
        Self::from_items(rebuild(entries.into_iter(), preserve_keys))
    }

    /// Sorts by key. `options.preserve_keys` is ignored.
    fn sort_keys(&self, options: SortOptions) -> Self {
        self.sort_keys_with(|a, b| options.compare_keys(a, b))
    }

    /// Sorts by a projection of each key, computed once per entry
    fn sort_keys_by<F, V>(&self, mut project: F, options: SortOptions) -> Self
    where
        F: FnMut(&Key) -> V,
        V: Into<Value>,
    {
        let mut decorated: Vec<(Value, (&Key, &Value))> = self
            .items()
            .iter()
            .map(|entry| (project(entry.0).into(), entry))
            .collect();
        decorated.sort_by(|(a, _), (b, _)| options.compare(a, b));
        Self::from_items(rebuild(decorated.into_iter().map(|(_, entry)| entry), true))
    }

    /// Sorts by key with a three-way comparator
    fn sort_keys_with<F>(&self, mut compare: F) -> Self
    where
        F: FnMut(&Key, &Key) -> Ordering,
    {
        let mut entries: Vec<(&Key, &Value)> = self.items().iter().collect();
        entries.sort_by(|(a, _), (b, _)| compare(*a, *b));
        Self::from_items(rebuild(entries.into_iter(), true))
    }
}

impl<T: BagCore> Sort for T {}

fn rebuild<'a>(entries: impl Iterator<Item = (&'a Key, &'a Value)>, preserve_keys: bool) -> Map {
    if preserve_keys {
        entries
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    } else {
        entries.map(|(_, value)| value.clone()).collect()
    }
}
