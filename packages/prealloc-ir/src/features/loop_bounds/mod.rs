//! Loop Bounds Feature
//!
//! Derives how many times a loop runs, as a symbolic capacity expression.
//!
//! ## Structure
//! - `domain/` - LoopKind, TripCount, LoopDescriptor
//! - `infrastructure/` - LoopBoundResolver (range subjects, counted headers)

pub mod domain;
pub mod infrastructure;

pub use domain::{LoopDescriptor, LoopKind, TripCount};
pub use infrastructure::LoopBoundResolver;
