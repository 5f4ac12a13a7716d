//! Replace and merge algorithms shared by the bag derive operations.

use super::{Map, Value};
use crate::bag::{Bag, BagCore, MutableBag};

/// Overlays `incoming` onto `base` key by key.
///
/// Existing keys keep their position and take the incoming value; new keys are
/// appended in incoming order.
pub(crate) fn replace(base: &Map, incoming: &Map) -> Map {
    let mut result = base.clone();
    for (key, value) in incoming {
        result.insert(key, value.clone());
    }
    result
}

/// Recursively overlays `incoming` onto `base`.
///
/// For each incoming key:
/// - both sides associative containers: merge them recursively
/// - incoming `Null` over any iterable: keep the existing value
/// - anything else: the incoming value replaces the existing one wholesale
///
/// Lists are therefore replaced, not merged. Recursion keeps the wrapper of the
/// existing value, so a nested `Bag` stays a `Bag`.
pub(crate) fn replace_recursive(base: &Map, incoming: &Map) -> Map {
    let mut result = base.clone();
    for (key, value) in incoming {
        let merged = match result.get(key) {
            Some(existing) => merge_value(existing, value),
            None => value.clone(),
        };
        result.insert(key, merged);
    }
    result
}

fn merge_value(existing: &Value, incoming: &Value) -> Value {
    if existing.is_associative() && incoming.is_associative() {
        if let (Some(left), Some(right)) = (existing.as_map(), incoming.as_map()) {
            return rewrap(existing, replace_recursive(left, right));
        }
    }
    if incoming.is_null() && existing.is_iterable() {
        return existing.clone();
    }
    incoming.clone()
}

/// Wraps `entries` in the same container variant as `like`
fn rewrap(like: &Value, entries: Map) -> Value {
    match like {
        Value::Bag(_) => Value::Bag(Bag::from_items(entries)),
        Value::MutableBag(_) => Value::MutableBag(MutableBag::from_items(entries)),
        _ => Value::Map(entries),
    }
}

/// Concatenates maps positionally.
///
/// Integer keys are re-numbered from 0 across all inputs; string keys are kept,
/// with later values overwriting earlier ones in place.
pub(crate) fn merge<'a>(maps: impl IntoIterator<Item = &'a Map>) -> Map {
    let mut result = Map::new();
    for map in maps {
        for (key, value) in map {
            result.append_entry(key, value.clone());
        }
    }
    result
}
