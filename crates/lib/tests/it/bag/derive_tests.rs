use satchel::{
    bag::{BagError, MAX_PAD},
    list, map,
    prelude::*,
};

use crate::helpers::{Clock, profile};

fn sample() -> Bag {
    Bag::from(map! {
        "d" => 4,
        0 => "zero",
        "b" => 2,
        7 => Value::Null,
        "a" => 1,
    })
}

/// Returns true if `derived` lists its values in the same relative order as `source`
fn keeps_relative_order(source: &Bag, derived: &Bag) -> bool {
    let mut positions = derived
        .items()
        .values()
        .map(|value| source.items().values().position(|v| v == value));
    let mut last = None;
    positions.all(|position| match position {
        Some(p) if last.is_none_or(|l| l < p) => {
            last = Some(p);
            true
        }
        _ => false,
    })
}

#[test]
fn test_derive_operations_keep_relative_order() {
    let bag = sample();
    let derived = vec![
        bag.values(),
        bag.filter(|key, _| key.is_int()),
        bag.reject(|_, value| value.is_null()),
        bag.clean(),
        bag.slice(1, Some(3), false),
        bag.slice(-2, None, true),
        bag.partition(|_, v| v.as_int().is_some()).0,
        bag.partition(|_, v| v.as_int().is_some()).1,
        bag.diff(list![2]),
        bag.intersect_keys(map! { "a" => 0, "d" => 0 }),
        bag.omit(["b"]),
        bag.merge(list!["extra"]).slice(0, Some(5), true),
    ];
    for result in derived {
        assert!(keeps_relative_order(&bag, &result), "{result:?}");
    }
}

#[test]
fn test_derive_never_touches_receiver() {
    let bag = sample();
    let before = bag.clone();

    let _ = bag.map(|_, v| v.to_text());
    let _ = bag.map_keys(|k, _| k.to_string());
    let _ = bag.replace_recursive(map! { "a" => map! { "x" => 1 } });
    let _ = bag.defaults(map! { "z" => 26 });
    let _ = bag.pad(-10, 0);
    let _ = bag.chunk(2, true);
    let _ = bag.flip();
    let _ = bag.sort(SortOptions::new());
    let _ = bag.shuffle();
    let _ = bag.reverse(true);
    let _ = bag.unique();

    assert_eq!(bag, before);
}

#[test]
fn test_receiver_variant_is_kept() {
    let bag = MutableBag::from_values([3, 1, 2]);
    let chained: MutableBag = bag
        .filter(|_, v| *v != 1)
        .map(|_, v| v.as_int().unwrap_or(0) * 10)
        .sort(SortOptions::new().descending());
    assert_eq!(chained.to_map(), list![30, 20]);

    let chunks = bag.chunk(2, false).unwrap();
    assert!(
        chunks
            .items()
            .values()
            .all(|chunk| matches!(chunk, Value::MutableBag(_)))
    );
}

// ===== MERGING =====

#[test]
fn test_replace_recursive_merges_maps() {
    let bag = Bag::from(map! { "a" => map! { "b" => "foo" } });
    assert_eq!(
        bag.replace_recursive(map! { "a" => map! { "c" => "bar" } })
            .to_map(),
        map! { "a" => map! { "b" => "foo", "c" => "bar" } }
    );
}

#[test]
fn test_replace_recursive_replaces_lists() {
    let bag = Bag::from(map! { "a" => list!["foo", "bar"] });
    assert_eq!(
        bag.replace_recursive(map! { "a" => list!["baz"] }).to_map(),
        map! { "a" => list!["baz"] }
    );
}

#[test]
fn test_replace_recursive_null_keeps_structure() {
    let bag = Bag::from(map! { "a" => map! { "b" => "foo" }, "s" => "scalar" });
    assert_eq!(
        bag.replace_recursive(map! { "a" => Value::Null, "s" => Value::Null })
            .to_map(),
        map! { "a" => map! { "b" => "foo" }, "s" => Value::Null }
    );
}

#[test]
fn test_replace_recursive_keeps_nested_bag_variant() {
    let bag = Bag::from(map! { "cfg" => MutableBag::from(map! { "a" => 1 }) });
    let merged = bag.replace_recursive(map! { "cfg" => map! { "b" => 2 } });
    assert_eq!(
        merged.get("cfg"),
        Some(&Value::MutableBag(MutableBag::from(map! { "a" => 1, "b" => 2 })))
    );
}

#[test]
fn test_defaults_recursive_prefers_receiver() {
    let settings = Bag::from(map! { "db" => map! { "host" => "prod" } });
    let filled = settings.defaults_recursive(map! {
        "db" => map! { "host" => "localhost", "port" => 5432 },
    });
    assert_eq!(
        filled.to_map(),
        map! { "db" => map! { "host" => "prod", "port" => 5432 } }
    );
}

// ===== RESHAPING =====

#[test]
fn test_chunk_into_three() {
    let chunks = Bag::from_values(["a", "b", "c", "d", "e"])
        .chunk(2, false)
        .unwrap();
    assert_eq!(
        chunks.to_map(),
        list![
            Bag::from_values(["a", "b"]),
            Bag::from_values(["c", "d"]),
            Bag::from_values(["e"]),
        ]
    );
}

#[test]
fn test_column_from_mixed_rows() {
    let rows = Bag::from_values([
        Value::from(map! { "id" => "u1", "email" => "a@x" }),
        Value::Bag(Bag::from(map! { "id" => "u2", "email" => "b@x" })),
        Value::from(profile(map! { "id" => "u3", "email" => "c@x" })),
        Value::from("not a row"),
    ]);
    assert_eq!(
        rows.column("email", Some(Key::from("id"))).to_map(),
        map! { "u1" => "a@x", "u2" => "b@x", "u3" => "c@x" }
    );
}

#[test]
fn test_pad_both_directions() {
    let bag = Bag::from_values(["a"]);
    assert_eq!(bag.pad(3, "-").unwrap().to_map(), list!["a", "-", "-"]);
    assert_eq!(bag.pad(-3, "-").unwrap().to_map(), list!["-", "-", "a"]);
    assert_eq!(bag.pad(1, "-").unwrap().to_map(), list!["a"]);
}

#[test]
fn test_pad_rejects_oversized_requests() {
    let bag = Bag::from_values(["a", "b"]);
    let limit = (MAX_PAD + 2) as i64;

    assert_eq!(bag.pad(-limit, "-").unwrap().first(), Some(&Value::from("-")));

    let err: satchel::Error = bag.pad(limit + 1, "-").unwrap_err().into();
    assert!(err.is_invalid_argument());
    assert!(matches!(bag.pad(i64::MAX, "-"), Err(BagError::PadTooLarge { .. })));
    assert_eq!(bag.count(), 2);
}

#[test]
fn test_flip_and_count_values_reject_containers() {
    let bag = Bag::from_values([Value::from("a"), Value::from(list![1])]);
    let err: satchel::Error = bag.flip().unwrap_err().into();
    assert!(err.is_logic_error());
    assert!(!err.is_invalid_argument());
    assert!(bag.count_values().is_err());
}

#[test]
fn test_map_and_map_keys() {
    let prices = Bag::from(map! { "tea" => 3, "cake" => 5 });
    let doubled = prices.map(|_, v| v.as_int().unwrap_or(0) * 2);
    assert_eq!(doubled.to_map(), map! { "tea" => 6, "cake" => 10 });

    let labelled = prices.map_keys(|key, value| format!("{key}@{value}"));
    assert_eq!(labelled.keys().to_map(), list!["tea@3", "cake@5"]);
}

#[test]
fn test_flatten_depth() {
    let bag = Bag::from_values([
        Value::Int(1),
        Value::from(list![2, list![3, list![4]]]),
    ]);
    assert_eq!(bag.flatten(0).to_map(), bag.values().to_map());
    assert_eq!(bag.flatten(2).to_map(), list![1, 2, 3, list![4]]);
    assert_eq!(bag.flatten(usize::MAX).to_map(), list![1, 2, 3, 4]);
}

#[test]
fn test_flatten_reads_object_entries() {
    let bag = Bag::from_values([
        Value::Int(1),
        Value::from(Object::aliasing(list![2, 3])),
        Value::from(profile(map! { "name" => "ada", "tags" => list!["x"] })),
    ]);
    assert_eq!(bag.flatten(1).to_map(), list![1, 2, 3, "ada", list!["x"]]);
    assert_eq!(bag.flatten(usize::MAX).to_map(), list![1, 2, 3, "ada", "x"]);

    let clock = Value::from(Object::new(Clock));
    let kept = Bag::from_values([clock.clone()]).flatten(usize::MAX);
    assert_eq!(kept.to_map(), list![clock]);
}
