//! Source location types
//!
//! Lines are 1-based, columns are 0-based byte offsets (tree-sitter convention).
//! `Position` is the 1-based form printed in diagnostics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Single printable location in a source file (1-based line and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Span in source code
///
/// Doubles as the identity of a syntax node: the type resolver keys its
/// tables by span, so two distinct expressions never share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl Span {
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Create a zero span (0:0-0:0)
    pub fn zero() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Start of the span as a printable position
    pub fn start(&self) -> Position {
        Position::new(self.start_line, self.start_col + 1)
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::zero()
    }
}
