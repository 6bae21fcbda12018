//! Capacity Feature
//!
//! Symbolic arithmetic over loop trip counts and append weights, and the
//! bridge from Go expressions into it.
//!
//! ## Structure
//! - `domain/` - CapacityExpr algebra and rendering
//! - `infrastructure/` - Go expression lowering

pub mod domain;
pub mod infrastructure;

pub use domain::{AggregateKind, ArithOp, CapacityExpr, RenderError};
pub use infrastructure::lower_expr;
