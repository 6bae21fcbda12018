//! Common test utilities for prealloc-ir
//!
//! Fixture loading and the `// want "regex"` expectation harness shared by
//! the integration tests.

#![allow(dead_code)]

mod assertions;
mod fixtures;

pub use assertions::*;
pub use fixtures::*;
