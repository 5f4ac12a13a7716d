//! Value, key and map tests

mod coercion_tests;
mod json_tests;
mod map_tests;
