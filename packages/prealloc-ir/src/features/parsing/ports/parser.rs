//! Parser port (interface)
//!
//! Defines the contract for turning Go source text into a `GoFile`.

use crate::errors::Result;
use crate::features::parsing::domain::GoFile;

/// Parser trait - abstraction over parsing implementation
pub trait GoParser: Send + Sync {
    /// Parse source code into a GoFile
    fn parse(&self, source: &str, file_path: &str) -> Result<GoFile>;

    /// Check if this parser supports the given file extension
    fn supports_extension(&self, ext: &str) -> bool {
        ext == "go"
    }
}
