//! Append Pattern Feature
//!
//! Recognises `x = append(x, a, b)` as the only growth shape worth a
//! capacity hint, counts the elements it adds per iteration, and flags
//! bodies that may leave the loop early.

pub mod domain;
pub mod infrastructure;

pub use domain::{AppendWeight, LoopScan};
pub use infrastructure::scan_loop_body;
