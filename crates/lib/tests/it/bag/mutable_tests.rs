use satchel::{list, map, path::PathError, prelude::*};

use crate::helpers::registry;

// ===== IN-PLACE WRITES =====

#[test]
fn test_writes_chain_and_mutate_in_place() {
    let mut bag = MutableBag::new();
    bag.add("b").add("c").prepend("a").set("name", "letters");

    assert_eq!(
        bag.to_map(),
        map! { 0 => "a", 1 => "b", 2 => "c", "name" => "letters" }
    );

    bag.set(1, "B");
    assert_eq!(bag.values().to_map(), list!["a", "B", "c", "letters"]);
}

#[test]
fn test_add_after_sparse_keys() {
    let mut bag = MutableBag::from(map! { 4 => "four", "x" => "ex" });
    bag.add("five");
    assert_eq!(bag.get(5), Some(&Value::from("five")));

    bag.remove(5);
    bag.add("again");
    assert_eq!(bag.last_index_of("again"), Some(Key::Int(6)));

    bag.clear().add("fresh");
    assert_eq!(bag.to_map(), list!["fresh"]);
}

#[test]
fn test_prepend_keeps_string_keys() {
    let mut bag = MutableBag::from(map! { "k" => "v", 3 => "three" });
    bag.prepend("head");
    assert_eq!(
        bag.to_map(),
        map! { 0 => "head", "k" => "v", 1 => "three" }
    );
}

#[test]
fn test_get_mut_edits_nested_value() {
    let mut bag = MutableBag::from(map! { "tags" => list!["a"] });
    if let Some(Value::Map(tags)) = bag.get_mut("tags") {
        tags.push("b");
    }
    assert_eq!(bag.get_path("tags/1").unwrap(), Some(Value::from("b")));
    assert!(bag.get_mut("missing").is_none());
}

// ===== REMOVAL =====

#[test]
fn test_remove_variants() {
    let mut bag = MutableBag::from(map! { "a" => 1, "b" => Value::Null });

    assert_eq!(bag.remove("b"), Some(Value::Null));
    assert_eq!(bag.remove("b"), None);
    assert_eq!(bag.remove_or("b", "gone"), Value::from("gone"));
    assert_eq!(bag.remove_or("a", 0), Value::Int(1));
    assert!(bag.is_empty());
}

#[test]
fn test_remove_item_takes_first_strict_match() {
    let mut bag = MutableBag::from_values([
        Value::from("1"),
        Value::Int(1),
        Value::Int(1),
    ]);
    bag.remove_item(1);
    assert_eq!(bag.to_map(), map! { 0 => "1", 2 => 1 });

    bag.remove_item(true);
    assert_eq!(bag.count(), 2);
}

#[test]
fn test_remove_first_and_last() {
    let mut bag = MutableBag::from(map! { 3 => "x", "k" => "y", 9 => "z" });
    assert_eq!(bag.remove_first(), Some(Value::from("x")));
    assert_eq!(bag.to_map(), map! { "k" => "y", 0 => "z" });

    assert_eq!(bag.remove_last(), Some(Value::from("z")));
    assert_eq!(bag.remove_last(), Some(Value::from("y")));
    assert_eq!(bag.remove_last(), None);
    assert_eq!(bag.remove_first(), None);
}

// ===== PATHS =====

#[test]
fn test_path_writes_and_removes() {
    let mut bag = MutableBag::new();
    bag.set_path("db/hosts/[]", "primary")
        .unwrap()
        .set_path("db/hosts/[]", "replica")
        .unwrap()
        .set_path("db/port", 5432)
        .unwrap();

    assert_eq!(
        bag.to_map(),
        map! { "db" => map! { "hosts" => list!["primary", "replica"], "port" => 5432 } }
    );

    assert_eq!(
        bag.remove_path("db/hosts/0").unwrap(),
        Some(Value::from("primary"))
    );
    assert_eq!(bag.remove_path("db/user").unwrap(), None);
    assert_eq!(
        bag.remove_path_or("db/user", "root").unwrap(),
        Value::from("root")
    );
    assert_eq!(
        bag.get_path("db/hosts").unwrap(),
        Some(Value::from(map! { 1 => "replica" }))
    );
}

#[test]
fn test_path_write_through_scalar_fails_without_change() {
    let mut bag = MutableBag::from(map! { "port" => 5432 });
    let before = bag.clone();

    let err = bag.set_path("port/number", 1).unwrap_err();
    assert!(err.is_structural_write());
    assert!(err.is_path_error());
    assert_eq!(bag, before);
}

#[test]
fn test_path_write_into_nested_immutable_bag_fails() {
    let mut bag = MutableBag::from(map! { "frozen" => Bag::from(map! { "x" => 1 }) });

    let err = bag.set_path("frozen/x", 2).unwrap_err();
    assert!(matches!(
        err,
        satchel::Error::Path(PathError::ReadOnly { .. })
    ));
    assert_eq!(bag.get_path("frozen/x").unwrap(), Some(Value::Int(1)));
}

#[test]
fn test_path_append_fails_when_the_last_index_is_taken() {
    let mut bag = MutableBag::new();
    bag.set(i64::MAX, "a");

    let err = bag.set_path("[]", "b").unwrap_err();
    assert!(err.is_structural_write());
    assert!(matches!(
        err,
        satchel::Error::Path(PathError::NoFreeIndex { .. })
    ));

    assert!(bag.set_path("[]/nested", "c").is_err());
    assert!(bag.try_add("d").is_err());
    assert_eq!(bag.count(), 1);
    assert_eq!(bag.get(i64::MAX), Some(&Value::from("a")));
}

// ===== SHARING =====

#[test]
fn test_aliasing_handle_shares_bag() {
    let shared = Object::aliasing(MutableBag::from(map! { "hits" => 0 }));
    let mut writer = shared.clone();

    satchel::path::set(&mut writer, "hits", 1).unwrap();
    satchel::path::set(&mut writer, "log/[]", "first").unwrap();

    let snapshot = Bag::from_value(shared).unwrap();
    assert_eq!(
        snapshot.to_map(),
        map! { "hits" => 1, "log" => list!["first"] }
    );
}

#[test]
fn test_object_append_fails_when_the_last_index_is_taken() {
    let mut shared = Object::aliasing(map! { i64::MAX => "a" });

    let err = satchel::path::set(&mut shared, "[]", "b").unwrap_err();
    assert!(matches!(err, PathError::NoFreeIndex { .. }));
    assert!(satchel::path::set(&mut shared, "[]/x", "c").is_err());
    assert_eq!(shared.entries(), Some(map! { i64::MAX => "a" }));
}

#[test]
fn test_bag_inside_registry_object() {
    let mut store = registry(map! { "inventory" => MutableBag::from_values(["axe"]) });

    satchel::path::set(&mut store, "inventory/[]", "rope").unwrap();
    assert_eq!(
        satchel::path::get(&store, "inventory/1").unwrap(),
        Some(Value::from("rope"))
    );
}
