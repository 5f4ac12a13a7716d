//! Path-based access into nested containers.
//!
//! A path is a `/`-delimited sequence of keys such as `"user/profile/name"`.
//! Each segment is converted with [`Key::from`], so `"0"` addresses index 0 of
//! a list, and empty segments (`"a//b"`) are the literal key `""`. The segment
//! `[]` is reserved: in a write it appends at the container's next natural index.
//!
//! Reads never fail on missing data. [`has`] returns false and [`get`] returns
//! `None` as soon as a segment is absent or an intermediate value cannot be
//! indexed. Writes create the missing intermediate maps they need and fail with a
//! structural error when the existing data cannot be descended into.
//!
//! # Examples
//!
//! ```
//! use satchel::{map, path, Value};
//!
//! let mut data = map! { "user" => map! { "name" => "Alice" } };
//!
//! assert!(path::has(&data, "user/name")?);
//! assert_eq!(path::get(&data, "user/email")?, None);
//!
//! path::set(&mut data, "user/tags/[]", "admin")?;
//! path::set(&mut data, "user/tags/[]", "ops")?;
//! assert_eq!(path::get(&data, "user/tags/1")?, Some(Value::from("ops")));
//!
//! // A scalar in the way is a structural error, not a silent overwrite
//! let err = path::set(&mut data, "user/name/first", "A").unwrap_err();
//! assert!(err.is_structural_write());
//! # Ok::<(), satchel::path::PathError>(())
//! ```

use tracing::{debug, trace};

use crate::{
    bag::{Bag, BagCore, MutableBag},
    value::{Key, Map, Object, Value},
};

mod errors;

pub use errors::PathError;

/// The path segment that appends instead of naming a key
pub const APPEND: &str = "[]";

/// A borrowed view of a container, used for reads.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    /// A native map or the entries of a bag
    Map(&'a Map),
    /// A user-defined accessor
    Object(&'a Object),
}

/// A borrowed view of a container, used for writes.
#[derive(Debug)]
pub enum NodeMut<'a> {
    /// A native map or the entries of a mutable bag
    Map(&'a mut Map),
    /// A user-defined accessor. Writes go through the handle.
    Object(&'a Object),
    /// Entries that must not be modified, such as those of a [`Bag`]
    ReadOnly {
        map: &'a Map,
        type_name: &'static str,
    },
}

/// Containers the path functions can traverse.
pub trait Accessible {
    /// Borrows the container for reading
    fn node(&self) -> Result<Node<'_>, PathError>;

    /// Borrows the container for writing
    fn node_mut(&mut self) -> Result<NodeMut<'_>, PathError>;
}

impl Accessible for Map {
    fn node(&self) -> Result<Node<'_>, PathError> {
        Ok(Node::Map(self))
    }

    fn node_mut(&mut self) -> Result<NodeMut<'_>, PathError> {
        Ok(NodeMut::Map(self))
    }
}

impl Accessible for Bag {
    fn node(&self) -> Result<Node<'_>, PathError> {
        Ok(Node::Map(self.items()))
    }

    fn node_mut(&mut self) -> Result<NodeMut<'_>, PathError> {
        Ok(NodeMut::ReadOnly {
            map: self.items(),
            type_name: "Bag",
        })
    }
}

impl Accessible for MutableBag {
    fn node(&self) -> Result<Node<'_>, PathError> {
        Ok(Node::Map(self.items()))
    }

    fn node_mut(&mut self) -> Result<NodeMut<'_>, PathError> {
        Ok(NodeMut::Map(self.as_map_mut()))
    }
}

impl Accessible for Object {
    fn node(&self) -> Result<Node<'_>, PathError> {
        Ok(Node::Object(self))
    }

    fn node_mut(&mut self) -> Result<NodeMut<'_>, PathError> {
        Ok(NodeMut::Object(self))
    }
}

impl Accessible for Value {
    fn node(&self) -> Result<Node<'_>, PathError> {
        match self {
            Value::Map(map) => map.node(),
            Value::Bag(bag) => bag.node(),
            Value::MutableBag(bag) => bag.node(),
            Value::Object(object) => object.node(),
            other => Err(PathError::NotAccessible {
                type_name: other.type_name().to_string(),
            }),
        }
    }

    fn node_mut(&mut self) -> Result<NodeMut<'_>, PathError> {
        match self {
            Value::Map(map) => map.node_mut(),
            Value::Bag(bag) => bag.node_mut(),
            Value::MutableBag(bag) => bag.node_mut(),
            Value::Object(object) => object.node_mut(),
            other => Err(PathError::NotAccessible {
                type_name: other.type_name().to_string(),
            }),
        }
    }
}

fn split(path: &str) -> Result<Vec<&str>, PathError> {
    if path.is_empty() {
        return Err(PathError::EmptyPath);
    }
    Ok(path.split('/').collect())
}

/// Returns true if every segment of `path` resolves.
///
/// A key that is present with a null value counts as present.
pub fn has<C: Accessible + ?Sized>(container: &C, path: &str) -> Result<bool, PathError> {
    let segments = split(path)?;
    Ok(walk(container.node()?, &segments, &mut |_| ())?.is_some())
}

/// Returns a copy of the value at `path`, or `None` if any segment is missing.
pub fn get<C: Accessible + ?Sized>(container: &C, path: &str) -> Result<Option<Value>, PathError> {
    let segments = split(path)?;
    walk(container.node()?, &segments, &mut Value::clone)
}

/// Like [`get`], returning `default` when the path does not resolve.
pub fn get_or<C: Accessible + ?Sized>(
    container: &C,
    path: &str,
    default: impl Into<Value>,
) -> Result<Value, PathError> {
    Ok(get(container, path)?.unwrap_or_else(|| default.into()))
}

/// Visits the value at the end of `segments`.
///
/// Returns `Ok(None)` the moment a segment is absent or an intermediate value has
/// no key access.
fn walk<R, F>(node: Node<'_>, segments: &[&str], visit: &mut F) -> Result<Option<R>, PathError>
where
    F: FnMut(&Value) -> R,
{
    let [segment, rest @ ..] = segments else {
        return Ok(None);
    };
    let key = Key::from(*segment);

    match node {
        Node::Map(map) => match map.get(&key) {
            Some(child) => visit_child(child, rest, visit),
            None => Ok(None),
        },
        Node::Object(object) => {
            if let Some(target) = object.borrow_aliasing() {
                let target = target?;
                return match target.get_key_ref(&key) {
                    Some(child) => visit_child(child, rest, visit),
                    None => Ok(None),
                };
            }
            let child = {
                let target = object.borrow()?;
                if !target.has_key(&key) {
                    return Ok(None);
                }
                target.get_key(&key)
            };
            match child {
                Some(child) => visit_child(&child, rest, visit),
                None => Ok(None),
            }
        }
    }
}

fn visit_child<R, F>(child: &Value, rest: &[&str], visit: &mut F) -> Result<Option<R>, PathError>
where
    F: FnMut(&Value) -> R,
{
    if rest.is_empty() {
        return Ok(Some(visit(child)));
    }
    match child.node() {
        Ok(node) => walk(node, rest, visit),
        Err(_) => Ok(None),
    }
}

/// Writes `value` at `path`, creating intermediate maps as needed.
///
/// - A missing or null intermediate key gets a new empty map.
/// - An intermediate `[]` appends a new empty map and descends into it.
/// - A terminal `[]` appends `value`; any other terminal segment assigns it.
///
/// Fails with a structural error when an existing scalar is in the way, when an
/// object that only returns copies would have to be descended into, or when the
/// write reaches a read-only [`Bag`]. An append into a container whose index
/// `i64::MAX` is already taken fails too. These checks happen before anything is
/// created, so a failed write leaves `container` unchanged.
pub fn set<C: Accessible + ?Sized>(
    container: &mut C,
    path: &str,
    value: impl Into<Value>,
) -> Result<(), PathError> {
    let segments = split(path)?;
    set_in(container.node_mut()?, path, &segments, value.into())
}

fn set_in(node: NodeMut<'_>, path: &str, segments: &[&str], value: Value) -> Result<(), PathError> {
    let [segment, rest @ ..] = segments else {
        return Ok(());
    };

    match node {
        NodeMut::ReadOnly { type_name, .. } => {
            debug!(path, type_name, "Rejected write into read-only container");
            Err(PathError::ReadOnly {
                path: path.to_string(),
                type_name: type_name.to_string(),
            })
        }
        NodeMut::Map(map) if rest.is_empty() => {
            if *segment == APPEND {
                if map.try_push(value).is_none() {
                    return Err(no_free_index(path, "Map"));
                }
            } else {
                map.insert(Key::from(*segment), value);
            }
            Ok(())
        }
        NodeMut::Map(map) => {
            let child = if *segment == APPEND {
                trace!(path, "Appending intermediate map");
                map.try_push_mut(Map::new())
                    .ok_or_else(|| no_free_index(path, "Map"))?
            } else {
                let child = map.get_or_insert_with(Key::from(*segment), Value::default);
                if child.is_null() {
                    trace!(path, key = segment, "Creating intermediate map");
                    *child = Value::Map(Map::new());
                }
                child
            };
            set_in_child(child, path, segment, rest, value)
        }
        NodeMut::Object(object) => set_in_object(object, path, segment, rest, value),
    }
}

fn set_in_child(
    child: &mut Value,
    path: &str,
    segment: &str,
    rest: &[&str],
    value: Value,
) -> Result<(), PathError> {
    if child.is_scalar() {
        let type_name = child.type_name();
        debug!(path, key = segment, type_name, "Rejected write through scalar");
        return Err(PathError::NotAContainer {
            path: path.to_string(),
            key: segment.to_string(),
            type_name: type_name.to_string(),
        });
    }
    set_in(child.node_mut()?, path, rest, value)
}

fn no_free_index(path: &str, type_name: &str) -> PathError {
    debug!(path, type_name, "Rejected append with no free index");
    PathError::NoFreeIndex {
        path: path.to_string(),
        type_name: type_name.to_string(),
    }
}

fn set_in_object(
    object: &Object,
    path: &str,
    segment: &str,
    rest: &[&str],
    value: Value,
) -> Result<(), PathError> {
    if rest.is_empty() {
        let mut target = object.borrow_mut()?;
        if segment == APPEND {
            if target.append(value).is_none() {
                return Err(no_free_index(path, object.type_name()));
            }
        } else {
            target.set_key(Key::from(segment), value);
        }
        return Ok(());
    }

    if let Some(target) = object.borrow_aliasing_mut() {
        let mut target = target?;
        let key = if segment == APPEND {
            trace!(path, type_name = object.type_name(), "Appending intermediate map");
            target
                .append(Value::Map(Map::new()))
                .ok_or_else(|| no_free_index(path, object.type_name()))?
        } else {
            let key = Key::from(segment);
            if target.get_key_ref(&key).is_none_or(Value::is_null) {
                trace!(path, key = segment, type_name = object.type_name(), "Creating intermediate map");
                target.set_key(key.clone(), Value::Map(Map::new()));
            }
            key
        };
        return match target.get_key_mut(&key) {
            Some(child) => set_in_child(child, path, segment, rest, value),
            None => Err(detached(object, path, segment)),
        };
    }

    // Reads return copies, so only a nested handle can be written through
    if segment != APPEND {
        let child = object.borrow()?.get_key(&Key::from(segment));
        if let Some(Value::Object(child)) = child {
            return set_in(NodeMut::Object(&child), path, rest, value);
        }
    }
    Err(detached(object, path, segment))
}

fn detached(object: &Object, path: &str, segment: &str) -> PathError {
    debug!(
        path,
        key = segment,
        type_name = object.type_name(),
        "Rejected write through detached object"
    );
    PathError::DetachedRead {
        path: path.to_string(),
        key: segment.to_string(),
        type_name: object.type_name().to_string(),
    }
}

/// Removes the value at `path` and returns it.
///
/// The parent is resolved like [`get`]; if it is missing, nothing happens and
/// `None` is returned. The order of the remaining entries is kept.
pub fn remove<C: Accessible + ?Sized>(
    container: &mut C,
    path: &str,
) -> Result<Option<Value>, PathError> {
    let segments = split(path)?;
    let Some((last, parents)) = segments.split_last() else {
        return Ok(None);
    };
    remove_in(container.node_mut()?, path, parents, last)
}

/// Like [`remove`], returning `default` when nothing was removed.
pub fn remove_or<C: Accessible + ?Sized>(
    container: &mut C,
    path: &str,
    default: impl Into<Value>,
) -> Result<Value, PathError> {
    Ok(remove(container, path)?.unwrap_or_else(|| default.into()))
}

fn remove_in(
    node: NodeMut<'_>,
    path: &str,
    parents: &[&str],
    last: &str,
) -> Result<Option<Value>, PathError> {
    let Some((segment, rest)) = parents.split_first() else {
        let key = Key::from(last);
        return match node {
            NodeMut::Map(map) => Ok(map.remove(&key)),
            NodeMut::Object(object) => {
                let mut target = object.borrow_mut()?;
                if target.has_key(&key) {
                    Ok(target.remove_key(&key))
                } else {
                    Ok(None)
                }
            }
            NodeMut::ReadOnly { map, type_name } if map.contains_key(&key) => {
                debug!(path, type_name, "Rejected removal from read-only container");
                Err(PathError::ReadOnly {
                    path: path.to_string(),
                    type_name: type_name.to_string(),
                })
            }
            NodeMut::ReadOnly { .. } => Ok(None),
        };
    };
    let key = Key::from(*segment);

    match node {
        NodeMut::Map(map) => match map.get_mut(&key) {
            Some(child) if !child.is_scalar() => remove_in(child.node_mut()?, path, rest, last),
            _ => Ok(None),
        },
        NodeMut::ReadOnly { map, type_name } => match map.get(&key) {
            Some(Value::Object(child)) => remove_in(NodeMut::Object(child), path, rest, last),
            Some(child) => {
                if !resolves(child, rest, last)? {
                    return Ok(None);
                }
                debug!(path, type_name, "Rejected removal from read-only container");
                Err(PathError::ReadOnly {
                    path: path.to_string(),
                    type_name: type_name.to_string(),
                })
            }
            None => Ok(None),
        },
        NodeMut::Object(object) => {
            if let Some(target) = object.borrow_aliasing_mut() {
                let mut target = target?;
                return match target.get_key_mut(&key) {
                    Some(child) if !child.is_scalar() => {
                        remove_in(child.node_mut()?, path, rest, last)
                    }
                    _ => Ok(None),
                };
            }
            let child = object.borrow()?.get_key(&key);
            match child {
                Some(Value::Object(child)) => remove_in(NodeMut::Object(&child), path, rest, last),
                Some(child) => {
                    if resolves(&child, rest, last)? {
                        Err(detached(object, path, segment))
                    } else {
                        Ok(None)
                    }
                }
                None => Ok(None),
            }
        }
    }
}

/// Returns true if `rest` followed by `last` resolves below `child`
fn resolves(child: &Value, rest: &[&str], last: &str) -> Result<bool, PathError> {
    let Ok(node) = child.node() else {
        return Ok(false);
    };
    let mut segments = rest.to_vec();
    segments.push(last);
    Ok(walk(node, &segments, &mut |_| ())?.is_some())
}
