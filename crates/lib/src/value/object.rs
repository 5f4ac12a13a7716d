//! User-defined key accessors and the shared [`Object`] handle.
//!
//! Any type can take part in path traversal and bag ingestion by implementing
//! [`KeyAccess`]. Reads through `KeyAccess` return copies, so a nested write cannot
//! reach through such a type. Types that can lend out references to their stored
//! values also implement [`KeyAccessMut`] and are wrapped with [`Object::aliasing`],
//! which lets the path engine descend into them in place.

use std::{
    cell::{Ref, RefCell, RefMut},
    fmt,
    rc::Rc,
};

use super::{Key, Map, Value};
use crate::path::PathError;

/// Key-based access to a user-defined container.
///
/// # Examples
///
/// ```
/// use satchel::prelude::*;
///
/// #[derive(Default)]
/// struct Settings {
///     theme: Option<String>,
/// }
///
/// impl KeyAccess for Settings {
///     fn has_key(&self, key: &Key) -> bool {
///         *key == "theme" && self.theme.is_some()
///     }
///
///     fn get_key(&self, key: &Key) -> Option<Value> {
///         (*key == "theme").then(|| self.theme.clone().into())
///     }
///
///     fn set_key(&mut self, key: Key, value: Value) {
///         if key == "theme" {
///             self.theme = value.as_text().map(str::to_string);
///         }
///     }
///
///     fn remove_key(&mut self, key: &Key) -> Option<Value> {
///         if *key == "theme" { self.theme.take().map(Value::from) } else { None }
///     }
/// }
///
/// let mut settings = Object::new(Settings::default());
/// satchel::path::set(&mut settings, "theme", "dark")?;
/// assert_eq!(satchel::path::get(&settings, "theme")?, Some(Value::from("dark")));
/// # Ok::<(), satchel::path::PathError>(())
/// ```
pub trait KeyAccess {
    /// Returns true if `key` is present, even when its value is null
    fn has_key(&self, key: &Key) -> bool;

    /// Returns a copy of the value stored at `key`
    fn get_key(&self, key: &Key) -> Option<Value>;

    /// Stores `value` at `key`, replacing any previous value
    fn set_key(&mut self, key: Key, value: Value);

    /// Removes `key`, returning its value if it was present
    fn remove_key(&mut self, key: &Key) -> Option<Value>;

    /// Appends `value` at the next natural index and returns the key used, or
    /// `None` if no integer index is free.
    ///
    /// The default stores the value under the first unused non-negative integer key.
    fn append(&mut self, value: Value) -> Option<Key> {
        let mut index: i64 = 0;
        while self.has_key(&Key::Int(index)) {
            index = index.checked_add(1)?;
        }
        let key = Key::Int(index);
        self.set_key(key.clone(), value);
        Some(key)
    }

    /// Returns all entries in order, or `None` if the type cannot be iterated.
    ///
    /// Types that return `Some` can be turned into bags and serialized.
    fn entries(&self) -> Option<Map> {
        None
    }
}

/// Key access that can lend out references to stored values.
///
/// Implementing this declares that nested values live inside the accessor, so a
/// path write like `"settings/colors/[]"` can modify them where they are.
pub trait KeyAccessMut: KeyAccess {
    /// Borrows the value stored at `key`
    fn get_key_ref(&self, key: &Key) -> Option<&Value>;

    /// Mutably borrows the value stored at `key`
    fn get_key_mut(&mut self, key: &Key) -> Option<&mut Value>;
}

impl KeyAccess for Map {
    fn has_key(&self, key: &Key) -> bool {
        self.contains_key(key)
    }

    fn get_key(&self, key: &Key) -> Option<Value> {
        self.get(key).cloned()
    }

    fn set_key(&mut self, key: Key, value: Value) {
        self.insert(key, value);
    }

    fn remove_key(&mut self, key: &Key) -> Option<Value> {
        self.remove(key)
    }

    fn append(&mut self, value: Value) -> Option<Key> {
        self.try_push(value)
    }

    fn entries(&self) -> Option<Map> {
        Some(self.clone())
    }
}

impl KeyAccessMut for Map {
    fn get_key_ref(&self, key: &Key) -> Option<&Value> {
        self.get(key)
    }

    fn get_key_mut(&mut self, key: &Key) -> Option<&mut Value> {
        self.get_mut(key)
    }
}

/// A shared handle to a user-defined [`KeyAccess`] type.
///
/// Cloning an `Object` clones the handle: every clone sees the same state. Two
/// objects are equal only if they are clones of the same handle.
///
/// ```
/// use satchel::{Map, Object, Value};
///
/// let shared = Object::aliasing(Map::new());
/// let mut alias = shared.clone();
///
/// satchel::path::set(&mut alias, "colors/[]", "red")?;
/// assert_eq!(
///     satchel::path::get(&shared, "colors/0")?,
///     Some(Value::from("red"))
/// );
/// assert_eq!(Value::from(shared), Value::from(alias));
/// # Ok::<(), satchel::path::PathError>(())
/// ```
#[derive(Clone)]
pub struct Object {
    shared: Rc<RefCell<dyn KeyAccess>>,
    // Same allocation as `shared`, present when the type implements `KeyAccessMut`
    aliasing: Option<Rc<RefCell<dyn KeyAccessMut>>>,
    type_name: &'static str,
}

impl Object {
    /// Wraps a value whose reads return copies
    pub fn new<T: KeyAccess + 'static>(value: T) -> Self {
        Self::from_shared(Rc::new(RefCell::new(value)))
    }

    /// Wraps a value whose nested values can be modified in place
    pub fn aliasing<T: KeyAccessMut + 'static>(value: T) -> Self {
        Self::from_shared_aliasing(Rc::new(RefCell::new(value)))
    }

    /// Wraps an existing shared value. The caller keeps its own handle.
    pub fn from_shared<T: KeyAccess + 'static>(value: Rc<RefCell<T>>) -> Self {
        Self {
            shared: value,
            aliasing: None,
            type_name: short_type_name::<T>(),
        }
    }

    /// Wraps an existing shared value whose nested values can be modified in place
    pub fn from_shared_aliasing<T: KeyAccessMut + 'static>(value: Rc<RefCell<T>>) -> Self {
        let aliasing: Rc<RefCell<dyn KeyAccessMut>> = value.clone();
        Self {
            shared: value,
            aliasing: Some(aliasing),
            type_name: short_type_name::<T>(),
        }
    }

    /// Short name of the wrapped type, e.g. `"Settings"`
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns true if nested values can be modified in place
    pub fn is_aliasing(&self) -> bool {
        self.aliasing.is_some()
    }

    /// Returns true if both handles point at the same value
    pub fn ptr_eq(&self, other: &Object) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.shared), Rc::as_ptr(&other.shared))
    }

    /// Borrows the wrapped value for reading
    pub fn borrow(&self) -> Result<Ref<'_, dyn KeyAccess + 'static>, PathError> {
        self.shared.try_borrow().map_err(|_| PathError::Busy {
            type_name: self.type_name.to_string(),
        })
    }

    /// Borrows the wrapped value for writing
    pub fn borrow_mut(&self) -> Result<RefMut<'_, dyn KeyAccess + 'static>, PathError> {
        self.shared.try_borrow_mut().map_err(|_| PathError::Busy {
            type_name: self.type_name.to_string(),
        })
    }

    /// Borrows the wrapped value through its aliasing capability, if it has one
    pub(crate) fn borrow_aliasing(
        &self,
    ) -> Option<Result<Ref<'_, dyn KeyAccessMut + 'static>, PathError>> {
        self.aliasing.as_ref().map(|cell| {
            cell.try_borrow().map_err(|_| PathError::Busy {
                type_name: self.type_name.to_string(),
            })
        })
    }

    /// Mutably borrows the wrapped value through its aliasing capability, if it has one
    pub(crate) fn borrow_aliasing_mut(
        &self,
    ) -> Option<Result<RefMut<'_, dyn KeyAccessMut + 'static>, PathError>> {
        self.aliasing.as_ref().map(|cell| {
            cell.try_borrow_mut().map_err(|_| PathError::Busy {
                type_name: self.type_name.to_string(),
            })
        })
    }

    /// Returns all entries, or `None` if the type cannot be iterated or is
    /// currently borrowed for writing
    pub fn entries(&self) -> Option<Map> {
        self.shared.try_borrow().ok()?.entries()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({})", self.type_name)
    }
}

/// The last path segment of a type name, keeping generic arguments intact
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let head_end = full.find('<').unwrap_or(full.len());
    match full[..head_end].rfind("::") {
        Some(pos) => &full[pos + 2..],
        None => full,
    }
}
