//! Behavioral tests for the page modules
//!
//! BDD-style tests using given-when-then naming. They exercise the pure
//! decision logic; DOM wiring is covered by the wasm tests under `tests/`.

pub mod menu_behaviors;
