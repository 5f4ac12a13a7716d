/*! Integration tests for Satchel.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - path: Tests for nested has/get/set/remove over maps, bags and objects
 * - bag: Tests for the Bag and MutableBag API, grouped by extension trait
 * - value: Tests for keys, maps, coercions and serialization
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("satchel=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod bag;
mod helpers;
mod path;
mod value;
