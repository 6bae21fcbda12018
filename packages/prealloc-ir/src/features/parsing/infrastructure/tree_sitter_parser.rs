//! Tree-sitter parser implementation
//!
//! This is where the tree-sitter dependency lives.

use tree_sitter::{Node as TSNode, Parser as TSParser};

use super::lowering::GoLowering;
use crate::errors::{PreallocError, Result};
use crate::features::parsing::domain::GoFile;
use crate::features::parsing::ports::GoParser;

/// Tree-sitter based Go parser
///
/// A fresh `tree_sitter::Parser` is created per call, so one instance can be
/// shared across rayon workers.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeSitterGoParser;

impl TreeSitterGoParser {
    pub fn new() -> Self {
        Self
    }
}

/// Count error and missing nodes, descending only into damaged subtrees
fn count_errors(node: TSNode<'_>) -> usize {
    if !node.has_error() {
        return 0;
    }
    let own = usize::from(node.is_error() || node.is_missing());
    let mut cursor = node.walk();
    let nested: usize = node.children(&mut cursor).map(count_errors).sum();
    own + nested
}

impl GoParser for TreeSitterGoParser {
    fn parse(&self, source: &str, file_path: &str) -> Result<GoFile> {
        let mut parser = TSParser::new();
        parser
            .set_language(&tree_sitter_go::language())
            .map_err(|e| PreallocError::parse(format!("Failed to set language: {}", e)))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| PreallocError::parse(format!("Failed to parse {}", file_path)))?;

        let root = tree.root_node();
        let syntax_errors = count_errors(root);
        if syntax_errors > 0 {
            tracing::warn!(
                file = file_path,
                errors = syntax_errors,
                "Syntax errors in Go source, analyzing the recovered tree"
            );
        }

        let mut file = GoLowering::new(source).lower_file(root, file_path);
        file.syntax_errors = syntax_errors;
        Ok(file)
    }
}
