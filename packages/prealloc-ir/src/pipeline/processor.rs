//! Per-file processing and parallel fan-out

use std::path::{Path, PathBuf};
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::PreallocConfig;
use crate::errors::{PreallocError, Result};
use crate::features::parsing::{GoParser, TreeSitterGoParser};
use crate::features::prealloc::application::analyze_file;
use crate::features::type_resolution::ScopeResolver;
use crate::shared::models::Diagnostic;

/// Outcome for one file; a failed file carries its error instead of diagnostics
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Parse, resolve and analyze one Go source text
pub fn analyze_source(source: &str, path: &str, config: &PreallocConfig) -> Result<Vec<Diagnostic>> {
    let file = TreeSitterGoParser::new().parse(source, path)?;
    let info = ScopeResolver::resolve_file(&file);
    debug!(file = path, typed_nodes = info.len(), "Resolved types");
    Ok(analyze_file(&file, &info, config))
}

fn analyze_one(path: &Path, config: &PreallocConfig) -> FileReport {
    let shown = path.to_string_lossy();
    let result = std::fs::read_to_string(path)
        .map_err(PreallocError::from)
        .and_then(|source| analyze_source(&source, &shown, config));

    match result {
        Ok(diagnostics) => FileReport {
            path: path.to_path_buf(),
            diagnostics,
            error: None,
        },
        Err(e) => {
            warn!(file = %shown, error = %e, "Failed to analyze file");
            FileReport {
                path: path.to_path_buf(),
                diagnostics: Vec::new(),
                error: Some(e.to_string()),
            }
        }
    }
}

/// Analyze every Go file, one report per file in input order
pub fn analyze_paths(paths: &[PathBuf], config: &PreallocConfig) -> Vec<FileReport> {
    let start = Instant::now();
    if config.inspects_no_loops() {
        warn!("Range loops and counted loops are both disabled; nothing will be reported");
    }

    #[cfg(feature = "parallel")]
    let reports: Vec<FileReport> = paths.par_iter().map(|p| analyze_one(p, config)).collect();
    #[cfg(not(feature = "parallel"))]
    let reports: Vec<FileReport> = paths.iter().map(|p| analyze_one(p, config)).collect();

    let diagnostics: usize = reports.iter().map(|r| r.diagnostics.len()).sum();
    let failed = reports.iter().filter(|r| r.is_error()).count();
    info!(
        files = reports.len(),
        diagnostics,
        failed,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Preallocation analysis finished"
    );
    reports
}
