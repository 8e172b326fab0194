//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against in-memory adapters.  No external storage is required.

mod mock_store;
mod scenario_tests;
mod service_tests;
