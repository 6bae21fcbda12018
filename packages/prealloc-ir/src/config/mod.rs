//! Configuration
//!
//! Three switches, settable from code, from CLI flags, or from a versioned
//! YAML file.
//!
//! # Examples
//!
//! ```rust,ignore
//! use prealloc_ir::config::PreallocConfig;
//!
//! let config = PreallocConfig::default().for_loops(true);
//! let config = PreallocConfig::from_yaml("prealloc.yaml")?;
//! ```

pub mod analysis_config;
pub mod error;
pub mod io;

// Re-exports
pub use analysis_config::PreallocConfig;
pub use error::{ConfigError, ConfigResult};
pub use io::ConfigFileV1;
