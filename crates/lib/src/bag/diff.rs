//! Set-style comparisons against another map or bag.

use std::{cmp::Ordering, collections::HashSet};

use super::BagCore;
use crate::{
    compare::loose_cmp,
    value::{Key, Map, Value},
};

/// Diff and intersect operations, by value or by key.
///
/// Each family comes in three flavours:
///
/// - the plain form uses strict equality
/// - `*_with` takes a three-way comparator and treats `Ordering::Equal` as a match
/// - `*_by` projects both sides and compares the projections with
///   [`loose_cmp`], so `1` and `"1"` match after projection
///
/// Results keep the receiver's keys and order.
///
/// ```
/// use satchel::{map, prelude::*};
///
/// let users = Bag::from(map! { "a" => "Ann", "b" => "bob", "c" => "Cid" });
/// let banned = Bag::from_values(["ANN", "cid"]);
///
/// let allowed = users.diff_by(&banned, |name| name.to_text().to_lowercase());
/// assert_eq!(allowed.to_map(), map! { "b" => "bob" });
/// ```
pub trait Diff: BagCore {
    /// Entries whose value is not in `other`
    fn diff(&self, other: impl AsRef<Map>) -> Self {
        let other = other.as_ref();
        retain_values(self, |value| !other.values().any(|candidate| candidate == value))
    }

    /// Entries whose value compares unequal to every value in `other`
    fn diff_with<F>(&self, other: impl AsRef<Map>, mut compare: F) -> Self
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        let other = other.as_ref();
        retain_values(self, |value| !contains_with(other.values(), value, &mut compare))
    }

    /// Entries whose projected value matches no projected value in `other`
    fn diff_by<F, V>(&self, other: impl AsRef<Map>, mut project: F) -> Self
    where
        F: FnMut(&Value) -> V,
        V: Into<Value>,
    {
        let projected: Vec<Value> = other.as_ref().values().map(|v| project(v).into()).collect();
        retain_values(self, |value| {
            let value = project(value).into();
            !projected
                .iter()
                .any(|candidate| loose_cmp(&value, candidate) == Ordering::Equal)
        })
    }

    /// Entries whose key is not in `other`
    fn diff_keys(&self, other: impl AsRef<Map>) -> Self {
        let other = other.as_ref();
        retain_keys(self, |key| !other.contains_key(key))
    }

    /// Entries whose key compares unequal to every key in `other`
    fn diff_keys_with<F>(&self, other: impl AsRef<Map>, mut compare: F) -> Self
    where
        F: FnMut(&Key, &Key) -> Ordering,
    {
        let other = other.as_ref();
        retain_keys(self, |key| !contains_with(other.keys(), key, &mut compare))
    }

    /// Entries whose projected key matches no projected key in `other`
    fn diff_keys_by<F, V>(&self, other: impl AsRef<Map>, mut project: F) -> Self
    where
        F: FnMut(&Key) -> V,
        V: Into<Value>,
    {
        let projected: Vec<Value> = other.as_ref().keys().map(|k| project(k).into()).collect();
        retain_keys(self, |key| {
            let key = project(key).into();
            !projected
                .iter()
                .any(|candidate| loose_cmp(&key, candidate) == Ordering::Equal)
        })
    }

    /// Entries whose value is also in `other`
    fn intersect(&self, other: impl AsRef<Map>) -> Self {
        let other = other.as_ref();
        retain_values(self, |value| other.values().any(|candidate| candidate == value))
    }

    /// Entries whose value compares equal to some value in `other`
    fn intersect_with<F>(&self, other: impl AsRef<Map>, mut compare: F) -> Self
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        let other = other.as_ref();
        retain_values(self, |value| contains_with(other.values(), value, &mut compare))
    }

    /// Entries whose projected value matches some projected value in `other`
    fn intersect_by<F, V>(&self, other: impl AsRef<Map>, mut project: F) -> Self
    where
        F: FnMut(&Value) -> V,
        V: Into<Value>,
    {
        let projected: Vec<Value> = other.as_ref().values().map(|v| project(v).into()).collect();
        retain_values(self, |value| {
            let value = project(value).into();
            projected
                .iter()
                .any(|candidate| loose_cmp(&value, candidate) == Ordering::Equal)
        })
    }

    /// Entries whose key is also in `other`
    fn intersect_keys(&self, other: impl AsRef<Map>) -> Self {
        let other = other.as_ref();
        retain_keys(self, |key| other.contains_key(key))
    }

    /// Entries whose key compares equal to some key in `other`
    fn intersect_keys_with<F>(&self, other: impl AsRef<Map>, mut compare: F) -> Self
    where
        F: FnMut(&Key, &Key) -> Ordering,
    {
        let other = other.as_ref();
        retain_keys(self, |key| contains_with(other.keys(), key, &mut compare))
    }

    /// Entries whose projected key matches some projected key in `other`
    fn intersect_keys_by<F, V>(&self, other: impl AsRef<Map>, mut project: F) -> Self
    where
        F: FnMut(&Key) -> V,
        V: Into<Value>,
    {
        let projected: Vec<Value> = other.as_ref().keys().map(|k| project(k).into()).collect();
        retain_keys(self, |key| {
            let key = project(key).into();
            projected
                .iter()
                .any(|candidate| loose_cmp(&key, candidate) == Ordering::Equal)
        })
    }

    /// Keeps only the listed keys, in the bag's own order.
    ///
    /// ```
    /// use satchel::{map, prelude::*};
    ///
    /// let row = Bag::from(map! { "id" => 1, "name" => "ann", "secret" => "x" });
    /// assert_eq!(row.pick(["name", "id"]).to_map(), map! { "id" => 1, "name" => "ann" });
    /// assert_eq!(row.omit(["secret"]).count(), 2);
    /// ```
    fn pick<I>(&self, keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Key>,
    {
        let keys = key_set(keys);
        retain_keys(self, |key| keys.contains(key))
    }

    /// Drops the listed keys
    fn omit<I>(&self, keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Key>,
    {
        let keys = key_set(keys);
        retain_keys(self, |key| !keys.contains(key))
    }
}

impl<T: BagCore> Diff for T {}

fn retain_values<B: BagCore, F>(bag: &B, mut keep: F) -> B
where
    F: FnMut(&Value) -> bool,
{
    B::from_items(
        bag.items()
            .iter()
            .filter(|(_, value)| keep(value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
    )
}

fn retain_keys<B: BagCore, F>(bag: &B, mut keep: F) -> B
where
    F: FnMut(&Key) -> bool,
{
    B::from_items(
        bag.items()
            .iter()
            .filter(|(key, _)| keep(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
    )
}

fn contains_with<'a, T, F>(
    mut candidates: impl Iterator<Item = &'a T>,
    item: &T,
    compare: &mut F,
) -> bool
where
    T: 'a,
    F: FnMut(&T, &T) -> Ordering,
{
    candidates.any(|candidate| compare(item, candidate) == Ordering::Equal)
}

fn key_set<I>(keys: I) -> HashSet<Key>
where
    I: IntoIterator,
    I::Item: Into<Key>,
{
    keys.into_iter().map(Into::into).collect()
}
