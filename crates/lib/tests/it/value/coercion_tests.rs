use satchel::{list, map, prelude::*, value::Number};

use crate::helpers::{Clock, profile};

#[test]
fn test_truthiness() {
    let falsy = [
        Value::Null,
        Value::Bool(false),
        Value::Int(0),
        Value::Float(0.0),
        Value::from(""),
        Value::from("0"),
        Value::from(Map::new()),
    ];
    for value in falsy {
        assert!(!value.is_truthy(), "{value:?}");
    }

    let truthy = [
        Value::from("0.0"),
        Value::from(" "),
        Value::Int(-1),
        Value::from(list![0]),
        Value::Bag(Bag::new()),
        Value::from(profile(Map::new())),
    ];
    for value in truthy {
        assert!(value.is_truthy(), "{value:?}");
    }
}

#[test]
fn test_number_coercion() {
    assert_eq!(Value::from("42").to_number(), Number::Int(42));
    assert_eq!(Value::from("3.5kg").to_number(), Number::Float(3.5));
    assert_eq!(Value::from("kg").to_number(), Number::Int(0));
    assert_eq!(Value::Bool(true).to_number(), Number::Int(1));
    assert_eq!(Value::Null.to_number(), Number::Int(0));
}

#[test]
fn test_text_coercion() {
    assert_eq!(Value::Int(-7).to_text(), "-7");
    assert_eq!(Value::Float(1.0).to_text(), "1");
    assert_eq!(Value::Bool(false).to_text(), "");
    assert_eq!(Value::from(map! { "a" => 1 }).to_text(), r#"{"a":1}"#);
    assert_eq!(Value::from(profile(list!["x"])).to_text(), r#"["x"]"#);
    assert_eq!(Value::from(Object::new(Clock)).to_text(), "[object Clock]");
}

#[test]
fn test_strict_equality() {
    assert_ne!(Value::Int(1), Value::Float(1.0));
    assert_ne!(Value::Int(1), Value::from("1"));
    assert_ne!(Value::Int(0), Value::Bool(false));
    assert_eq!(Value::Float(0.5), 0.5);
    assert_eq!(
        Value::Bag(Bag::from_values([1])),
        Value::Bag(Bag::from_values([1]))
    );
    assert_ne!(
        Value::Bag(Bag::from_values([1])),
        Value::MutableBag(MutableBag::from_values([1]))
    );
}

#[test]
fn test_objects_compare_by_handle() {
    let first = profile(map! { "a" => 1 });
    let twin = profile(map! { "a" => 1 });

    assert_eq!(Value::from(first.clone()), Value::from(first.clone()));
    assert_ne!(Value::from(first), Value::from(twin));
}

#[test]
fn test_type_names() {
    assert_eq!(Value::from("x").type_name(), "text");
    assert_eq!(Value::from(list![1]).type_name(), "map");
    assert_eq!(Value::MutableBag(MutableBag::new()).type_name(), "MutableBag");
    assert_eq!(Value::from(profile(Map::new())).type_name(), "Profile");
}
