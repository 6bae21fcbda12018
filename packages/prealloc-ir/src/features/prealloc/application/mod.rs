//! Prealloc Application Layer
//!
//! Entry point for per-file analysis. Callers hand in a parsed file and a
//! type oracle; the pipeline owns parsing and file I/O.

mod block_analyzer;

pub use block_analyzer::{analyze_file, BlockAnalyzer};
