use satchel::{Error, list, map, prelude::*};

#[test]
fn test_sort_ascending_and_descending() {
    let bag = Bag::from_values([4, 3, 1, 2]);

    assert_eq!(bag.sort(SortOptions::new()).to_map(), list![1, 2, 3, 4]);
    assert_eq!(
        bag.sort(SortOptions::new().descending()).to_map(),
        list![4, 3, 2, 1]
    );
    assert_eq!(
        bag.sort(SortOptions::new().preserve_keys(true)).to_map(),
        map! { 2 => 1, 3 => 2, 1 => 3, 0 => 4 }
    );
    assert_eq!(bag.to_map(), list![4, 3, 1, 2]);
}

#[test]
fn test_sort_reindexes_string_keys_unless_preserved() {
    let bag = Bag::from(map! { "x" => 2, "y" => 1 });
    assert_eq!(bag.sort(SortOptions::new()).to_map(), list![1, 2]);
    assert_eq!(
        bag.sort(SortOptions::new().preserve_keys(true)).to_map(),
        map! { "y" => 1, "x" => 2 }
    );
}

// ===== MODES =====

fn sorted(values: Map, mode: &str) -> Map {
    let options = SortOptions::new().with_mode(mode.parse().unwrap());
    Bag::from(values).sort(options).to_map()
}

#[test]
fn test_sort_modes() {
    assert_eq!(
        sorted(list!["10", 9.5, 2], "numeric"),
        list![2, 9.5, "10"]
    );
    assert_eq!(sorted(list![10, 9, 100], "string"), list![10, 100, 9]);
    assert_eq!(sorted(list!["b", "A", "c"], "string"), list!["A", "b", "c"]);
    assert_eq!(sorted(list!["b", "A", "c"], "string_ci"), list!["A", "b", "c"]);
    assert_eq!(sorted(list!["b", "C", "a"], "string_ci"), list!["a", "b", "C"]);
    assert_eq!(
        sorted(list!["img12", "img10", "img2"], "natural"),
        list!["img2", "img10", "img12"]
    );
    assert_eq!(
        sorted(list!["IMG12", "img10", "Img2"], "natural_ci"),
        list!["Img2", "img10", "IMG12"]
    );
    assert_eq!(sorted(list!["10", "9", 8], "regular"), list![8, "9", "10"]);
}

#[test]
fn test_unknown_sort_options_are_invalid_arguments() {
    let err: Error = "sideways".parse::<Order>().unwrap_err().into();
    assert!(err.is_invalid_argument());
    assert_eq!(err.to_string(), "Unknown sort option 'sideways'");

    assert!("fuzzy".parse::<SortMode>().is_err());
    assert_eq!("DESC".parse::<Order>().unwrap(), Order::Descending);
    assert_eq!(
        SortOptions::new().with_order("desc".parse().unwrap()),
        SortOptions::new().descending()
    );
}

// ===== STABILITY AND CUSTOM ORDERINGS =====

#[test]
fn test_sort_by_is_stable_in_both_directions() {
    let bag = Bag::from_values(["bb", "a", "cc", "d"]);
    let length = |value: &Value| value.to_text().len();

    assert_eq!(
        bag.sort_by(length, SortOptions::new()).to_map(),
        list!["a", "d", "bb", "cc"]
    );
    assert_eq!(
        bag.sort_by(length, SortOptions::new().descending()).to_map(),
        list!["bb", "cc", "a", "d"]
    );
}

#[test]
fn test_sort_with_comparator() {
    let bag = MutableBag::from(map! { "a" => 1, "b" => 3, "c" => 2 });
    let reversed = bag.sort_with(|a, b| b.as_int().cmp(&a.as_int()), true);
    assert_eq!(reversed.keys().to_map(), list!["b", "c", "a"]);
    assert!(matches!(reversed.into_value(), Value::MutableBag(_)));
}

// ===== KEY SORTS =====

#[test]
fn test_sort_keys_mixed() {
    let bag = Bag::from(map! { "b" => 1, "a" => 2, 10 => 3, 9 => 4 });

    let ascending = bag.sort_keys(SortOptions::new());
    assert_eq!(ascending.keys().to_map(), list![9, 10, "a", "b"]);
    assert_eq!(ascending.get(10), Some(&Value::Int(3)));

    let descending = bag.sort_keys(SortOptions::new().descending().preserve_keys(false));
    assert_eq!(descending.keys().to_map(), list!["b", "a", 10, 9]);
}

#[test]
fn test_sort_keys_by_and_with() {
    let bag = Bag::from(map! { "Beta" => 1, "alpha" => 2, "Gamma" => 3 });

    let by_lowercase = bag.sort_keys_by(
        |key| key.to_string().to_lowercase(),
        SortOptions::new(),
    );
    assert_eq!(by_lowercase.keys().to_map(), list!["alpha", "Beta", "Gamma"]);

    let by_length = bag.sort_keys_with(|a, b| a.to_string().len().cmp(&b.to_string().len()));
    assert_eq!(by_length.keys().to_map(), list!["Beta", "alpha", "Gamma"]);
}
