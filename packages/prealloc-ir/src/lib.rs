/*
 * Prealloc IR - Slice Preallocation Analysis for Go
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (Span, Position, Diagnostic)
 * - features/    : Vertical slices (parsing → type_resolution → capacity
 *                  → loop_bounds / append_pattern / slice_candidates → prealloc)
 * - pipeline/    : File discovery and parallel orchestration
 * - config/      : Analysis switches and YAML loading
 *
 * Performance:
 * - One tree-sitter parse per file, analysis is a pure tree walk
 * - Rayon work-stealing across files
 */

// Crate-level lint configuration
#![allow(clippy::too_many_arguments)] // Lowering helpers thread parser context
#![allow(clippy::collapsible_if)] // Readability over brevity
#![allow(clippy::collapsible_else_if)] // else if clarity
#![allow(clippy::match_like_matches_macro)] // Match for readability
#![allow(clippy::single_match)] // Single match for readability
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::module_inception)] // Module naming intentional

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules (vertical slices)
pub mod features;

/// Analysis configuration
pub mod config;

/// Error types
pub mod errors;

/// File discovery and orchestration
pub mod pipeline;

// Re-exports for convenience
pub use config::PreallocConfig;
pub use errors::{PreallocError, Result};
pub use features::prealloc::application::{analyze_file, BlockAnalyzer};
pub use pipeline::{analyze_paths, analyze_source, collect_go_files, FileReport};
pub use shared::models::{Diagnostic, Position, Span};

/// Configure the global Rayon pool (75% of cores, at least one thread).
///
/// Safe to call more than once; later calls are ignored.
pub fn init_rayon() {
    let num_threads = std::cmp::max(1, num_cpus::get() * 3 / 4);
    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
    {
        tracing::debug!(error = %e, "Rayon global pool already initialized");
    }
}
