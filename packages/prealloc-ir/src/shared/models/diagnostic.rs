//! Diagnostic model
//!
//! The only output of the analysis: a position-tagged message.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::span::Position;

/// A single preallocation hint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub file_path: String,
    pub position: Position,
    pub message: String,
}

impl Diagnostic {
    pub fn new(file_path: impl Into<String>, position: Position, message: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            position,
            message: message.into(),
        }
    }

    pub fn line(&self) -> u32 {
        self.position.line
    }
}

/// `path:line:column: message`, the format Go vet-style tools print
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file_path, self.position, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let diag = Diagnostic::new("a.go", Position::new(3, 2), "Consider preallocating x");
        assert_eq!(diag.to_string(), "a.go:3:2: Consider preallocating x");
    }

    #[test]
    fn test_json_shape() {
        let diag = Diagnostic::new("a.go", Position::new(3, 2), "msg");
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["position"]["line"], 3);
        assert_eq!(json["message"], "msg");
    }
}
