//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains:
//! - domain/     - Pure business logic (no external dependencies)
//! - ports/      - Interface definitions (traits)
//! - application/ - Use cases
//! - infrastructure/ - External dependency implementations

// Go front end: tree-sitter parse + lowering into an owned AST
pub mod parsing;

// Lexical scopes and type classes for expressions
pub mod type_resolution;

// Symbolic capacity expressions
pub mod capacity;

// Iteration counts for range and counted loops
pub mod loop_bounds;

// Self-append detection in loop bodies
pub mod append_pattern;

// Slice declarations that may be preallocated
pub mod slice_candidates;

// Block analysis and diagnostics
pub mod prealloc;
