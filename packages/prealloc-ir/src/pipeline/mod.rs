//! Pipeline
//!
//! Turns paths on disk into diagnostics:
//!
//! ```text
//! paths → collect_go_files → [per file, in parallel]
//!         read → parse → resolve types → analyze → FileReport
//! ```

mod discovery;
mod processor;

pub use discovery::collect_go_files;
pub use processor::{analyze_paths, analyze_source, FileReport};
