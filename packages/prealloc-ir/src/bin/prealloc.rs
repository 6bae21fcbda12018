//! prealloc CLI
//!
//! Reports slice declarations that could be preallocated.
//!
//! # Usage
//!
//! ```bash
//! # Analyze a package tree with the defaults (range loops, simple mode)
//! prealloc .
//!
//! # Counted loops too, escaping loops included, JSON output
//! prealloc --forloops=true --simple=false --format json pkg/
//!
//! # Switches from a file; flags still override it
//! prealloc --config prealloc.yaml pkg/
//! ```
//!
//! Exit status: 0 when nothing was found, 1 when diagnostics were reported,
//! 2 when a file or the configuration could not be read.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use prealloc_ir::{analyze_paths, collect_go_files, init_rayon, Diagnostic, PreallocConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "prealloc")]
#[command(about = "Find slice declarations that could be preallocated", long_about = None)]
struct Args {
    /// Go files or directories (directories are walked recursively)
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Only report loops without return/break/continue/goto in them
    #[arg(long, value_name = "true|false")]
    simple: Option<bool>,

    /// Report preallocation suggestions on range loops
    #[arg(long, value_name = "true|false")]
    rangeloops: Option<bool>,

    /// Report preallocation suggestions on for loops
    #[arg(long, value_name = "true|false")]
    forloops: Option<bool>,

    /// YAML configuration file (version 1)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

const EXIT_FOUND: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("prealloc: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut failed = false;
    let mut files = Vec::new();
    for path in &args.paths {
        match collect_go_files(path) {
            Ok(found) => files.extend(found),
            Err(e) => {
                eprintln!("prealloc: {}: {}", path.display(), e);
                failed = true;
            }
        }
    }

    init_rayon();
    let reports = analyze_paths(&files, &config);

    let mut diagnostics: Vec<&Diagnostic> = Vec::new();
    for report in &reports {
        if let Some(error) = &report.error {
            eprintln!("prealloc: {}: {}", report.path.display(), error);
            failed = true;
        }
        diagnostics.extend(&report.diagnostics);
    }

    match args.format {
        Format::Text => {
            for diagnostic in &diagnostics {
                println!("{}", diagnostic);
            }
        }
        Format::Json => match serde_json::to_string_pretty(&diagnostics) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("prealloc: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        },
    }

    if failed {
        ExitCode::from(EXIT_ERROR)
    } else if !diagnostics.is_empty() {
        ExitCode::from(EXIT_FOUND)
    } else {
        ExitCode::SUCCESS
    }
}

/// Config file (or defaults) with command-line switches applied on top
fn build_config(args: &Args) -> prealloc_ir::Result<PreallocConfig> {
    let mut config = match &args.config {
        Some(path) => PreallocConfig::from_yaml(path)?,
        None => PreallocConfig::default(),
    };
    if let Some(simple) = args.simple {
        config = config.conservative(simple);
    }
    if let Some(range_loops) = args.rangeloops {
        config = config.range_loops(range_loops);
    }
    if let Some(for_loops) = args.forloops {
        config = config.for_loops(for_loops);
    }
    Ok(config)
}
