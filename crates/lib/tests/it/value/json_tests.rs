use satchel::{list, map, prelude::*};

use crate::helpers::{Clock, profile};

#[test]
fn test_bag_json_round_trip_keeps_order() {
    let json = r#"{"zeta":1,"alpha":[true,null,2.5],"mid":{"0":"a","2":"b"}}"#;
    let bag = Bag::from_json_str(json).unwrap();

    assert_eq!(
        bag.keys().to_map(),
        list!["zeta", "alpha", "mid"]
    );
    assert_eq!(bag.to_json_string().unwrap(), json);
}

#[test]
fn test_json_values_keep_key_order() {
    let bag = Bag::from(map! { "b" => 1, "a" => 2 });
    let json = bag.to_json().unwrap();
    assert_eq!(json.to_string(), r#"{"b":1,"a":2}"#);

    let back = Bag::from_value(Value::from(json)).unwrap();
    assert_eq!(back.keys().to_map(), list!["b", "a"]);
    assert_eq!(back, bag);

    #[derive(serde::Serialize)]
    struct Release {
        version: &'static str,
        channel: &'static str,
    }
    let release = Bag::from_serialize(&Release {
        version: "1.2",
        channel: "beta",
    })
    .unwrap();
    assert_eq!(release.keys().to_map(), list!["version", "channel"]);
}

#[test]
fn test_json_arrays_become_indexed_bags() {
    let bag = MutableBag::from_json_str(r#"["a", "b"]"#).unwrap();
    assert!(bag.is_indexed());
    assert_eq!(bag.to_json().unwrap(), serde_json::json!(["a", "b"]));
}

#[test]
fn test_from_serialize() {
    #[derive(serde::Serialize)]
    struct Server {
        host: &'static str,
        ports: Vec<u16>,
    }

    let bag = Bag::from_serialize(&Server {
        host: "localhost",
        ports: vec![80, 443],
    })
    .unwrap();
    assert_eq!(
        bag.to_map(),
        map! { "host" => "localhost", "ports" => list![80, 443] }
    );
}

#[test]
fn test_serde_transparent_bags() {
    let bag = Bag::from(map! { "a" => 1 });
    assert_eq!(serde_json::to_string(&bag).unwrap(), r#"{"a":1}"#);

    let back: MutableBag = serde_json::from_str(r#"{"a":1}"#).unwrap();
    assert_eq!(back.to_map(), bag.to_map());
}

#[test]
fn test_objects_serialize_through_entries() {
    let bag = Bag::from(map! { "user" => profile(map! { "name" => "Ann" }) });
    assert_eq!(
        bag.to_json_string().unwrap(),
        r#"{"user":{"name":"Ann"}}"#
    );

    let opaque = Bag::from(map! { "clock" => Object::new(Clock) });
    let err = opaque.to_json_string().unwrap_err();
    assert!(err.is_serialization_error());
    assert_eq!(err.module(), "serialize");
}

#[test]
fn test_invalid_json_is_a_serialization_error() {
    let err = Bag::from_json_str("{not json").unwrap_err();
    assert!(err.is_serialization_error());

    let err = Bag::from_json_str("42").unwrap_err();
    assert!(!err.is_serialization_error());
    assert!(err.is_invalid_argument());
}
