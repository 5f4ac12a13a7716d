//! Path engine integration tests
//!
//! Reads and writes through native maps and bags live in `map_tests`; user
//! accessors, aliasing handles and cyclic data live in `object_tests`.
