use satchel::{list, map, prelude::*};

// ===== OFFSET SEARCH =====

#[test]
fn test_index_of_clamps_offsets() {
    let bag = Bag::from_values(["a", "b", "c", "a", "b", "c"]);

    assert_eq!(bag.index_of_from("a", -2), Some(Key::Int(3)));
    assert_eq!(bag.index_of_from("a", 5), None);
    assert_eq!(bag.index_of_from("a", 1), Some(Key::Int(3)));
    assert_eq!(bag.index_of_from("a", -100), Some(Key::Int(0)));
    assert_eq!(bag.index_of_from("c", 100), Some(Key::Int(5)));

    assert_eq!(bag.last_index_of("a"), Some(Key::Int(3)));
    assert_eq!(bag.last_index_of_from("c", 4), Some(Key::Int(2)));
    assert_eq!(bag.last_index_of_from("a", 100), Some(Key::Int(3)));
    assert_eq!(bag.last_index_of_from("b", -100), None);
}

#[test]
fn test_search_tolerates_any_offset() {
    let bag = Bag::from_values(["a", "b", "c"]);
    let empty = Bag::new();

    for offset in [i64::MIN, -4, -3, -1, 0, 2, 3, 4, i64::MAX] {
        let _ = bag.index_of_from("a", offset);
        let _ = bag.last_index_of_from("a", offset);
        let _ = bag.find_from(|_, _| true, offset);
        let _ = bag.find_last_key_from(|_, _| true, offset);
        assert_eq!(empty.index_of_from("a", offset), None);
        assert_eq!(empty.last_index_of_from("a", offset), None);
    }
}

#[test]
fn test_index_of_returns_string_keys() {
    let bag = Bag::from(map! { "x" => 1, "y" => "1", "z" => 1 });
    assert_eq!(bag.index_of("1"), Some(Key::from("y")));
    assert_eq!(bag.last_index_of(1), Some(Key::from("z")));
    assert_eq!(bag.index_of(1.0), None);
}

#[test]
fn test_find_family_passes_key_first() {
    let bag = Bag::from(map! { "apple" => 3, "banana" => 5, "cherry" => 7 });
    let long_name = |key: &Key, _: &Value| key.to_string().len() > 5;

    assert_eq!(bag.find(long_name), Some(&Value::Int(5)));
    assert_eq!(bag.find_last(long_name), Some(&Value::Int(7)));
    assert_eq!(bag.find_key(long_name), Some(Key::from("banana")));
    assert_eq!(bag.find_last_key(long_name), Some(Key::from("cherry")));
    assert_eq!(bag.find(|_, v| *v == 100), None);
}

// ===== ABSENCE =====

#[test]
fn test_absence_is_none_not_null() {
    let bag = Bag::from_values([Value::Null]);
    assert_eq!(bag.first(), Some(&Value::Null));
    assert_eq!(bag.last(), Some(&Value::Null));
    assert_eq!(bag.get(0), Some(&Value::Null));
    assert_eq!(bag.get(1), None);
    assert_eq!(bag.find(|_, _| true), Some(&Value::Null));

    let empty = MutableBag::new();
    assert_eq!(empty.first(), None);
    assert_eq!(empty.find(|_, _| true), None);
}

#[test]
fn test_get_or_and_path_defaults() {
    let bag = Bag::from(map! { "db" => map! { "port" => 5432 } });
    assert_eq!(bag.get_or("missing", 1), Value::Int(1));
    assert_eq!(bag.get_path_or("db/port", 0).unwrap(), Value::Int(5432));
    assert_eq!(bag.get_path_or("db/host", "localhost").unwrap(), Value::from("localhost"));
    assert!(bag.has_path("db/port").unwrap());
    assert!(!bag.has_path("db/port/number").unwrap());
}

// ===== AGGREGATES =====

#[test]
fn test_join_sum_product() {
    let bag = Bag::from_values([Value::from("a"), Value::Int(1), Value::Float(0.5), Value::Null]);
    assert_eq!(bag.join("-"), "a-1-0.5-");

    let numbers = Bag::from_values([Value::Int(2), Value::from("3"), Value::Bool(true)]);
    assert_eq!(numbers.sum(), Value::Int(6));
    assert_eq!(numbers.product(), Value::Int(6));

    let nested = Bag::from_values([Value::Int(2), Value::from(list![10, 20])]);
    assert_eq!(nested.sum(), Value::Int(2));
}

#[test]
fn test_reduce() {
    let bag = Bag::from_values([1, 2, 3, 4]);
    let total = bag.reduce(0, |acc, _, value| acc + value.as_int().unwrap_or(0));
    assert_eq!(total, 10);

    let keys = bag.reduce(Vec::new(), |mut acc, key, _| {
        acc.push(key.clone());
        acc
    });
    assert_eq!(keys, vec![Key::Int(0), Key::Int(1), Key::Int(2), Key::Int(3)]);
}

#[test]
fn test_has_item_is_strict() {
    let bag = Bag::from_values([Value::Int(0), Value::from("")]);
    assert!(bag.has_item(0));
    assert!(!bag.has_item(false));
    assert!(!bag.has_item(Value::Null));
    assert!(bag.has_item(""));
}
