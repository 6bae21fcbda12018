//! Slice candidate infrastructure

mod tracker;

pub use tracker::CandidateTracker;
