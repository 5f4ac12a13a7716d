//! Bag integration tests
//!
//! Tests are grouped by the extension trait that carries the operation, plus
//! the in-place API of `MutableBag` and the behavior both variants share.

mod derive_tests;
mod mutable_tests;
mod query_tests;
mod sort_tests;
