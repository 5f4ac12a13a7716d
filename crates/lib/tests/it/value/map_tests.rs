use satchel::{list, map, prelude::*};

#[test]
fn test_next_index_follows_largest_int_key() {
    let mut map = map! { 3 => "a", "k" => "b", -5 => "c" };
    assert_eq!(map.next_index(), 4);
    assert_eq!(map.push("d"), Key::Int(4));

    map.remove(&Key::Int(4));
    assert_eq!(map.next_index(), 5);

    map.pop();
    assert_eq!(map.next_index(), 4);

    map.clear();
    assert_eq!(map.push("fresh"), Key::Int(0));
}

#[test]
fn test_negative_keys_do_not_move_next_index() {
    let mut map = map! { -2 => "x" };
    assert_eq!(map.push("y"), Key::Int(0));
}

#[test]
fn test_push_stops_when_the_last_index_is_taken() {
    let mut map = map! { i64::MAX => "last" };
    assert_eq!(map.next_index(), i64::MAX);

    assert_eq!(map.try_push("next"), None);
    assert!(map.try_push_mut(Map::new()).is_none());
    map.push("next");

    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&Key::Int(i64::MAX)), Some(&Value::from("last")));
}

#[test]
fn test_insert_keeps_position_of_existing_key() {
    let mut map = map! { "a" => 1, "b" => 2 };
    assert_eq!(map.insert("a", 10), Some(Value::Int(1)));
    let keys: Vec<Key> = map.keys().cloned().collect();
    assert_eq!(keys, vec![Key::from("a"), Key::from("b")]);
}

#[test]
fn test_equality_is_ordered() {
    let left = map! { "a" => 1, "b" => 2 };
    let right = map! { "b" => 2, "a" => 1 };
    assert_ne!(left, right);
    assert_eq!(left, map! { "a" => 1, "b" => 2 });
}

#[test]
fn test_indexed_and_associative() {
    assert!(list!["a", "b"].is_indexed());
    assert!(Map::new().is_indexed());
    assert!(!map! { 1 => "a" }.is_indexed());
    assert!(map! { "x" => 1 }.is_associative());

    let mut shifted = list!["a", "b"];
    shifted.shift();
    assert!(shifted.is_associative());
}

#[test]
fn test_get_or_insert_with() {
    let mut map = Map::new();
    let tags = map.get_or_insert_with(Key::from("tags"), || Value::from(Map::new()));
    if let Some(tags) = tags.as_map_mut() {
        tags.push("new");
    }
    map.get_or_insert_with(Key::from("tags"), || Value::Null);
    assert_eq!(map, map! { "tags" => list!["new"] });
}
