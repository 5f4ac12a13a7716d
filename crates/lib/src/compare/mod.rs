//! Comparison modes and sort configuration.
//!
//! [`SortOptions`] combines a direction ([`Order`]) with a comparison mode
//! ([`SortMode`]). Both enums parse from the short names callers use in
//! configuration, such as `"desc"` or `"natural_ci"`.

use std::{cmp::Ordering, fmt, str::FromStr};

use crate::{
    bag::BagError,
    value::{Key, Number, Value, parse_numeric},
};

mod natural;

pub use natural::natural_cmp;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Order {
    #[default]
    Ascending,
    Descending,
}

impl Order {
    /// Applies the direction to an ascending comparison result
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Order::Ascending => ordering,
            Order::Descending => ordering.reverse(),
        }
    }
}

impl FromStr for Order {
    type Err = BagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Order::Ascending),
            "desc" | "descending" => Ok(Order::Descending),
            _ => Err(BagError::UnknownSortOption {
                option: s.to_string(),
            }),
        }
    }
}

/// How two values are compared when sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortMode {
    /// Loose comparison: numbers and numeric strings compare numerically,
    /// other strings compare as bytes
    #[default]
    Regular,
    /// Both sides coerced to numbers
    Numeric,
    /// Both sides converted to text and compared as bytes
    String,
    /// Like `String`, ignoring case
    StringCaseInsensitive,
    /// Case-folded text comparison, with the exact text breaking ties
    Locale,
    /// Digit runs compare by value
    Natural,
    /// Like `Natural`, ignoring case
    NaturalCaseInsensitive,
}

impl SortMode {
    /// Compares two values in ascending order under this mode
    pub fn compare(self, a: &Value, b: &Value) -> Ordering {
        match self {
            SortMode::Regular => loose_cmp(a, b),
            SortMode::Numeric => number_cmp(a.to_number(), b.to_number()),
            SortMode::String => a.to_text().cmp(&b.to_text()),
            SortMode::StringCaseInsensitive => {
                a.to_text().to_lowercase().cmp(&b.to_text().to_lowercase())
            }
            SortMode::Locale => {
                let (a, b) = (a.to_text(), b.to_text());
                a.to_lowercase()
                    .cmp(&b.to_lowercase())
                    .then_with(|| a.cmp(&b))
            }
            SortMode::Natural => natural_cmp(&a.to_text(), &b.to_text(), false),
            SortMode::NaturalCaseInsensitive => natural_cmp(&a.to_text(), &b.to_text(), true),
        }
    }

    /// Compares two keys in ascending order under this mode
    pub fn compare_keys(self, a: &Key, b: &Key) -> Ordering {
        match (self, a, b) {
            (SortMode::Regular | SortMode::Numeric, Key::Int(x), Key::Int(y)) => x.cmp(y),
            _ => self.compare(&a.to_value(), &b.to_value()),
        }
    }
}

impl FromStr for SortMode {
    type Err = BagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "regular" => Ok(SortMode::Regular),
            "numeric" => Ok(SortMode::Numeric),
            "string" => Ok(SortMode::String),
            "string_ci" => Ok(SortMode::StringCaseInsensitive),
            "locale" => Ok(SortMode::Locale),
            "natural" => Ok(SortMode::Natural),
            "natural_ci" => Ok(SortMode::NaturalCaseInsensitive),
            _ => Err(BagError::UnknownSortOption {
                option: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortMode::Regular => "regular",
            SortMode::Numeric => "numeric",
            SortMode::String => "string",
            SortMode::StringCaseInsensitive => "string_ci",
            SortMode::Locale => "locale",
            SortMode::Natural => "natural",
            SortMode::NaturalCaseInsensitive => "natural_ci",
        };
        f.write_str(name)
    }
}

/// Direction, comparison mode and key handling for the sort operations.
///
/// # Examples
///
/// ```
/// use satchel::prelude::*;
///
/// let options = SortOptions::new()
///     .descending()
///     .with_mode("natural_ci".parse()?)
///     .preserve_keys(true);
///
/// let files = Bag::from_values(["File10", "file9", "FILE11"]);
/// let sorted = files.sort(options);
/// assert_eq!(
///     sorted.values().to_map(),
///     satchel::list!["FILE11", "File10", "file9"]
/// );
/// assert_eq!(sorted.keys().to_map(), satchel::list![2, 0, 1]);
/// # Ok::<(), satchel::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOptions {
    pub order: Order,
    pub mode: SortMode,
    /// Keep the original keys instead of re-indexing the result
    pub preserve_keys: bool,
}

impl SortOptions {
    /// Ascending, regular comparison, re-indexed result
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to sort in ascending order
    pub fn ascending(mut self) -> Self {
        self.order = Order::Ascending;
        self
    }

    /// Builder method to sort in descending order
    pub fn descending(mut self) -> Self {
        self.order = Order::Descending;
        self
    }

    /// Builder method to set the direction
    pub fn with_order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    /// Builder method to set the comparison mode
    pub fn with_mode(mut self, mode: SortMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder method to keep or re-index keys
    pub fn preserve_keys(mut self, preserve: bool) -> Self {
        self.preserve_keys = preserve;
        self
    }

    /// Compares two values with the configured mode and direction
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        self.order.apply(self.mode.compare(a, b))
    }

    /// Compares two keys with the configured mode and direction
    pub fn compare_keys(&self, a: &Key, b: &Key) -> Ordering {
        self.order.apply(self.mode.compare_keys(a, b))
    }
}

/// Compares two coerced numbers. NaN compares equal to everything.
pub fn number_cmp(a: Number, b: Number) -> Ordering {
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => x.cmp(&y),
        (x, y) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
    }
}

/// Loose comparison used by [`SortMode::Regular`] and the projection comparators.
///
/// - Booleans and null compare by truthiness, except null against text, which
///   compares `""` with the text.
/// - Numbers compare numerically, also against numeric text; against other text
///   the number is compared as text.
/// - Two numeric strings compare numerically; other strings compare as bytes.
/// - Maps and bags compare by size, then entry by entry, and are greater than
///   any scalar.
/// - Objects are greater than scalars and compare with each other by text.
///
/// ```
/// use std::cmp::Ordering;
/// use satchel::{compare::loose_cmp, Value};
///
/// assert_eq!(loose_cmp(&Value::from("10"), &Value::from("9")), Ordering::Greater);
/// assert_eq!(loose_cmp(&Value::from("10"), &Value::from("9a")), Ordering::Less);
/// assert_eq!(loose_cmp(&Value::Int(2), &Value::Float(2.0)), Ordering::Equal);
/// ```
pub fn loose_cmp(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Text(s)) => "".cmp(s.as_str()),
        (Value::Text(s), Value::Null) => s.as_str().cmp(""),
        (Value::Bool(_) | Value::Null, _) | (_, Value::Bool(_) | Value::Null) => {
            a.is_truthy().cmp(&b.is_truthy())
        }
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            number_cmp(a.to_number(), b.to_number())
        }
        (Value::Int(_) | Value::Float(_), Value::Text(s)) => match parse_numeric(s) {
            Some((number, true)) => number_cmp(a.to_number(), number),
            _ => a.to_text().as_str().cmp(s.as_str()),
        },
        (Value::Text(s), Value::Int(_) | Value::Float(_)) => match parse_numeric(s) {
            Some((number, true)) => number_cmp(number, b.to_number()),
            _ => s.as_str().cmp(b.to_text().as_str()),
        },
        (Value::Text(x), Value::Text(y)) => match (parse_numeric(x), parse_numeric(y)) {
            (Some((m, true)), Some((n, true))) => number_cmp(m, n),
            _ => x.cmp(y),
        },
        _ => container_cmp(a, b),
    }
}

fn container_cmp(a: &Value, b: &Value) -> Ordering {
    match (a.as_map(), b.as_map()) {
        (Some(x), Some(y)) => x.len().cmp(&y.len()).then_with(|| {
            for (key, left) in x {
                let ordering = match y.get(key) {
                    Some(right) => loose_cmp(left, right),
                    None => Ordering::Greater,
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        }),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => match (a.is_scalar(), b.is_scalar()) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            _ => a.to_text().cmp(&b.to_text()),
        },
    }
}
