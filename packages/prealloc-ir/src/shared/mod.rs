//! Shared module - Common types
//!
//! Types shared across all features. No tree-sitter here.

pub mod models;

pub use models::*;
