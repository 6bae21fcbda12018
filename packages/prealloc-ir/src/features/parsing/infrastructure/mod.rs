//! Parsing infrastructure (tree-sitter)

mod lowering;
mod tree_sitter_parser;

pub use tree_sitter_parser::TreeSitterGoParser;
