//! Parsing domain models

mod go_ast;
pub mod literals;

pub use go_ast::*;
