//! Slice Candidates Feature
//!
//! Finds slices created empty or with a known length inside a block:
//! `var x []T`, `x := []T{...}`, `x := []T(nil)`, `x := make([]T, n)`.
//!
//! ## Structure
//! - `domain/` - SliceCandidate, CandidateSet
//! - `infrastructure/` - CandidateTracker

pub mod domain;
pub mod infrastructure;

pub use domain::{CandidateSet, SliceCandidate};
pub use infrastructure::CandidateTracker;
