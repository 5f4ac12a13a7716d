//! Offset-bounded scans used by the `index_of` and `find` families.
//!
//! A starting index is clamped into the bag rather than rejected: a negative
//! index counts back from the last position (stopping at 0) and an index past
//! the end starts at the last position.

use crate::value::{Key, Map, Value};

/// Clamps `from_index` to a valid position, or `None` for an empty map
pub(crate) fn clamp(from_index: i64, len: usize) -> Option<usize> {
    let last = i64::try_from(len).ok()?.checked_sub(1)?;
    if last < 0 {
        return None;
    }
    let index = if from_index < 0 {
        last.saturating_add(from_index).max(0)
    } else {
        from_index.min(last)
    };
    usize::try_from(index).ok()
}

/// Scans forward from the clamped `from_index`
pub(crate) fn scan_forward<'a, F>(
    items: &'a Map,
    from_index: i64,
    mut predicate: F,
) -> Option<(&'a Key, &'a Value)>
where
    F: FnMut(&Key, &Value) -> bool,
{
    let start = clamp(from_index, items.len())?;
    (start..items.len())
        .filter_map(|i| items.get_index(i))
        .find(|(key, value)| predicate(key, value))
}

/// Scans backward from the clamped `from_index`, or from the last entry
pub(crate) fn scan_backward<'a, F>(
    items: &'a Map,
    from_index: Option<i64>,
    mut predicate: F,
) -> Option<(&'a Key, &'a Value)>
where
    F: FnMut(&Key, &Value) -> bool,
{
    let start = match from_index {
        Some(index) => clamp(index, items.len())?,
        None => items.len().checked_sub(1)?,
    };
    (0..=start)
        .rev()
        .filter_map(|i| items.get_index(i))
        .find(|(key, value)| predicate(key, value))
}
