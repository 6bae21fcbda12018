//! Shared models

mod diagnostic;
mod span;

pub use diagnostic::Diagnostic;
pub use span::{Position, Span};
