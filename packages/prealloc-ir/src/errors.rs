//! Error types for prealloc-ir
//!
//! The analysis itself never fails; these cover the layers around it
//! (reading files, driving the parser, loading configuration).

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for prealloc-ir operations
#[derive(Debug, Error)]
pub enum PreallocError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl PreallocError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        PreallocError::Parse(msg.into())
    }
}

/// Result type alias for prealloc operations
pub type Result<T> = std::result::Result<T, PreallocError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_formatting() {
        let err = PreallocError::parse("no tree for main.go");
        assert_eq!(err.to_string(), "Parse error: no tree for main.go");

        let err: PreallocError = ConfigError::UnsupportedVersion {
            found: 3,
            supported: vec![1],
        }
        .into();
        assert!(err.to_string().starts_with("Configuration error:"));
    }
}
