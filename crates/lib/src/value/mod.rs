//! Dynamically typed values held by maps and bags.
//!
//! This module provides the [`Value`] enum that represents every element a bag
//! can hold. Values are either scalars (null, booleans, numbers, text), native
//! containers ([`Map`]), nested bags, or [`Object`] handles to user types that
//! expose key-based access.

use std::fmt;

use crate::bag::{Bag, MutableBag};

mod convert;
mod key;
mod map;
pub(crate) mod merge;
mod object;

pub use key::Key;
pub use map::Map;
pub use object::{KeyAccess, KeyAccessMut, Object};

/// Values that can be stored in maps and bags.
///
/// # Value Types
///
/// ## Scalars
/// - [`Value::Null`] - Absent/empty value
/// - [`Value::Bool`] - Boolean values
/// - [`Value::Int`] - 64-bit signed integers
/// - [`Value::Float`] - 64-bit floating point numbers
/// - [`Value::Text`] - UTF-8 text strings
///
/// ## Containers
/// - [`Value::Map`] - Native insertion-ordered map or list
/// - [`Value::Bag`] - Nested read-only bag
/// - [`Value::MutableBag`] - Nested mutable bag
/// - [`Value::Object`] - Shared handle to a user-defined accessor
///
/// # Equality
///
/// `==` is strict: the variants must match and so must the contents. Maps compare
/// entry by entry in order, `Int(1)` is not equal to `Float(1.0)`, and objects are
/// equal only when they are the same handle.
///
/// `Value` also implements `PartialEq` with primitive types:
///
/// ```
/// # use satchel::Value;
/// let text = Value::from("hello");
/// let number = Value::from(42);
///
/// assert!(text == "hello");
/// assert!(42 == number);
///
/// // Type mismatches return false
/// assert!(!(number == "42"));
/// assert!(Value::Int(1) != Value::Float(1.0));
/// ```
#[derive(Clone, Default)]
pub enum Value {
    /// Null/empty value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Text string value
    Text(String),

    /// Native ordered map or list
    Map(Map),
    /// Nested read-only bag
    Bag(Bag),
    /// Nested mutable bag
    MutableBag(MutableBag),
    /// Handle to a user-defined key accessor
    Object(Object),
}

/// A number produced by coercing a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Returns the number as a float
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(f) => f,
        }
    }

    /// Converts back into a value
    pub fn to_value(self) -> Value {
        match self {
            Number::Int(n) => Value::Int(n),
            Number::Float(f) => Value::Float(f),
        }
    }
}

impl Value {
    /// Returns true if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for null, booleans, numbers and text
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Text(_)
        )
    }

    /// Returns true for native maps and bags, the values that hold a [`Map`]
    pub fn is_iterable(&self) -> bool {
        matches!(self, Value::Map(_) | Value::Bag(_) | Value::MutableBag(_))
    }

    /// Returns true for an iterable whose entries are not indexed
    pub fn is_associative(&self) -> bool {
        self.as_map().is_some_and(Map::is_associative)
    }

    /// Returns the type name as a string.
    ///
    /// For objects this is the short name of the wrapped Rust type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Map(_) => "map",
            Value::Bag(_) => "Bag",
            Value::MutableBag(_) => "MutableBag",
            Value::Object(object) => object.type_name(),
        }
    }

    /// Attempts to convert to a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to convert to an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to convert to a float. Integers are widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Attempts to convert to a string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the entries of a native map or bag
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            Value::Bag(bag) => Some(bag.as_map()),
            Value::MutableBag(bag) => Some(bag.as_map()),
            _ => None,
        }
    }

    /// Returns mutable entries of a native map or mutable bag. Read-only bags give `None`.
    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Map(map) => Some(map),
            Value::MutableBag(bag) => Some(bag.as_map_mut()),
            _ => None,
        }
    }

    /// Attempts to get a reference to an object handle
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Truthiness used by `clean`.
    ///
    /// Falsy values are null, `false`, `0`, `0.0`, `""`, `"0"` and the empty map.
    /// Bags and objects are always truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Text(s) => !(s.is_empty() || s == "0"),
            Value::Map(map) => !map.is_empty(),
            Value::Bag(_) | Value::MutableBag(_) | Value::Object(_) => true,
        }
    }

    /// Converts to text the way `join` and the string sort modes see a value.
    ///
    /// ```
    /// # use satchel::{list, Value};
    /// assert_eq!(Value::Null.to_text(), "");
    /// assert_eq!(Value::Bool(true).to_text(), "1");
    /// assert_eq!(Value::Float(2.5).to_text(), "2.5");
    /// assert_eq!(Value::from(list![1, 2]).to_text(), "[1,2]");
    /// ```
    pub fn to_text(&self) -> String {
        match self {
            Value::Null | Value::Bool(false) => String::new(),
            Value::Bool(true) => "1".to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => float_to_text(*f),
            Value::Text(s) => s.clone(),
            Value::Map(_) | Value::Bag(_) | Value::MutableBag(_) => self.to_json_string(),
            Value::Object(object) => match object.entries() {
                Some(entries) => entries.to_json_string(),
                None => format!("[object {}]", object.type_name()),
            },
        }
    }

    /// Coerces to a number.
    ///
    /// Booleans become 0/1, null becomes 0, numeric text becomes its number, text with
    /// a numeric prefix becomes that prefix, and anything else is 0.
    ///
    /// ```
    /// # use satchel::value::{Number, Value};
    /// assert_eq!(Value::from("12abc").to_number(), Number::Int(12));
    /// assert_eq!(Value::from(" 1.5").to_number(), Number::Float(1.5));
    /// assert_eq!(Value::from("abc").to_number(), Number::Int(0));
    /// ```
    pub fn to_number(&self) -> Number {
        match self {
            Value::Int(n) => Number::Int(*n),
            Value::Float(f) => Number::Float(*f),
            Value::Bool(b) => Number::Int(i64::from(*b)),
            Value::Text(s) => parse_numeric(s).map_or(Number::Int(0), |(n, _)| n),
            Value::Map(map) => Number::Int(i64::from(!map.is_empty())),
            Value::Null | Value::Bag(_) | Value::MutableBag(_) | Value::Object(_) => {
                Number::Int(0)
            }
        }
    }

    /// Converts to a JSON-like string representation for human-readable output.
    ///
    /// ```
    /// # use satchel::Value;
    /// assert_eq!(Value::from("hello").to_json_string(), "\"hello\"");
    /// assert_eq!(Value::Float(f64::NAN).to_json_string(), "null");
    /// ```
    pub fn to_json_string(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) if f.is_finite() => float_to_text(*f),
            Value::Float(_) => "null".to_string(),
            Value::Text(s) => quote_json(s),
            Value::Map(map) => map.to_json_string(),
            Value::Bag(bag) => bag.as_map().to_json_string(),
            Value::MutableBag(bag) => bag.as_map().to_json_string(),
            Value::Object(object) => object
                .entries()
                .map_or_else(|| "null".to_string(), |entries| entries.to_json_string()),
        }
    }
}

fn float_to_text(f: f64) -> String {
    if f.is_nan() {
        "NAN".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { "INF" } else { "-INF" }.to_string()
    } else {
        f.to_string()
    }
}

/// Quotes and escapes a string as a JSON string literal
pub(crate) fn quote_json(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Parses the numeric prefix of `s`.
///
/// Leading whitespace is skipped. Returns the number and whether the whole string
/// (allowing trailing whitespace) was numeric, or `None` when there is no numeric
/// prefix at all.
pub(crate) fn parse_numeric(s: &str) -> Option<(Number, bool)> {
    let trimmed = s.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut int_digits = end - int_start;
    let mut is_float = false;

    if bytes.get(end) == Some(&b'.') {
        let mut frac_end = end + 1;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if int_digits > 0 || frac_end > end + 1 {
            int_digits += frac_end - end - 1;
            end = frac_end;
            is_float = true;
        }
    }
    if int_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
            is_float = true;
        }
    }

    let literal = &trimmed[..end];
    let whole = trimmed[end..].trim_end().is_empty();
    let number = if is_float {
        Number::Float(literal.parse().ok()?)
    } else {
        match literal.parse::<i64>() {
            Ok(n) => Number::Int(n),
            Err(_) => Number::Float(literal.parse().ok()?),
        }
    };
    Some((number, whole))
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Bag(a), Value::Bag(b)) => a == b,
            (Value::MutableBag(a), Value::MutableBag(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(x) => write!(f, "Float({x:?})"),
            Value::Text(s) => write!(f, "Text({s:?})"),
            Value::Map(map) => write!(f, "Map({map:?})"),
            Value::Bag(bag) => write!(f, "Bag({:?})", bag.as_map()),
            Value::MutableBag(bag) => write!(f, "MutableBag({:?})", bag.as_map()),
            Value::Object(object) => write!(f, "{object:?}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

// Convenient From implementations for common types
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        // Out-of-range values become floats
        match i64::try_from(value) {
            Ok(n) => Value::Int(n),
            Err(_) => Value::Float(value as f64),
        }
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::from(value as u64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Text(value.clone())
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Int(n) => Value::Int(n),
            Key::Str(s) => Value::Text(s),
        }
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Map(value)
    }
}

impl From<Bag> for Value {
    fn from(value: Bag) -> Self {
        Value::Bag(value)
    }
}

impl From<MutableBag> for Value {
    fn from(value: MutableBag) -> Self {
        Value::MutableBag(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

impl<V: Into<Value>> From<Vec<V>> for Value {
    fn from(values: Vec<V>) -> Self {
        Value::Map(Map::from_values(values))
    }
}

impl<V: Into<Value>> From<Option<V>> for Value {
    fn from(value: Option<V>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

// PartialEq implementations for comparing Value with other types
impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Value::Text(s) if s == other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        matches!(self, Value::Text(s) if s == other)
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Value::Int(n) if n == other)
    }
}

impl PartialEq<i32> for Value {
    fn eq(&self, other: &i32) -> bool {
        matches!(self, Value::Int(n) if *n == i64::from(*other))
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, Value::Float(f) if f == other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        matches!(self, Value::Bool(b) if b == other)
    }
}

impl PartialEq<Map> for Value {
    fn eq(&self, other: &Map) -> bool {
        matches!(self, Value::Map(map) if map == other)
    }
}

// Reverse implementations for symmetry
impl PartialEq<Value> for str {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for &str {
    fn eq(&self, other: &Value) -> bool {
        other == *self
    }
}

impl PartialEq<Value> for String {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for i64 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for i32 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for bool {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}
