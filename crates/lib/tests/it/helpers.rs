//! Sample key accessors shared by the integration tests.

use satchel::prelude::*;

/// A record that hands out copies of its fields and cannot alias them.
#[derive(Debug, Default)]
pub struct Profile {
    pub fields: Map,
}

impl KeyAccess for Profile {
    fn has_key(&self, key: &Key) -> bool {
        self.fields.contains_key(key)
    }

    fn get_key(&self, key: &Key) -> Option<Value> {
        self.fields.get(key).cloned()
    }

    fn set_key(&mut self, key: Key, value: Value) {
        self.fields.insert(key, value);
    }

    fn remove_key(&mut self, key: &Key) -> Option<Value> {
        self.fields.remove(key)
    }

    fn entries(&self) -> Option<Map> {
        Some(self.fields.clone())
    }
}

/// A store that lends out references to its slots.
#[derive(Debug, Default)]
pub struct Registry {
    pub slots: Map,
}

impl KeyAccess for Registry {
    fn has_key(&self, key: &Key) -> bool {
        self.slots.contains_key(key)
    }

    fn get_key(&self, key: &Key) -> Option<Value> {
        self.slots.get(key).cloned()
    }

    fn set_key(&mut self, key: Key, value: Value) {
        self.slots.insert(key, value);
    }

    fn remove_key(&mut self, key: &Key) -> Option<Value> {
        self.slots.remove(key)
    }

    fn entries(&self) -> Option<Map> {
        Some(self.slots.clone())
    }
}

impl KeyAccessMut for Registry {
    fn get_key_ref(&self, key: &Key) -> Option<&Value> {
        self.slots.get(key)
    }

    fn get_key_mut(&mut self, key: &Key) -> Option<&mut Value> {
        self.slots.get_mut(key)
    }
}

/// An accessor with a single computed key and no way to list its entries.
#[derive(Debug, Default)]
pub struct Clock;

impl KeyAccess for Clock {
    fn has_key(&self, key: &Key) -> bool {
        *key == "now"
    }

    fn get_key(&self, key: &Key) -> Option<Value> {
        (*key == "now").then_some(Value::Int(1_700_000_000))
    }

    fn set_key(&mut self, _key: Key, _value: Value) {}

    fn remove_key(&mut self, _key: &Key) -> Option<Value> {
        None
    }
}

/// A detached profile holding `fields`
pub fn profile(fields: Map) -> Object {
    Object::new(Profile { fields })
}

/// An aliasing registry holding `slots`
pub fn registry(slots: Map) -> Object {
    Object::aliasing(Registry { slots })
}
