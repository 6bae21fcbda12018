//! Parsing Feature
//!
//! Go source → tree-sitter concrete tree → owned `GoFile`.
//!
//! ## Structure
//! - `domain/` - Go AST model, literal decoding
//! - `ports/` - GoParser trait, SpanExt
//! - `infrastructure/` - TreeSitterGoParser, CST lowering

pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports
pub use domain::GoFile;
pub use infrastructure::TreeSitterGoParser;
pub use ports::{GoParser, SpanExt};
