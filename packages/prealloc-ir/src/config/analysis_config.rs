//! Analysis switches
//!
//! Three independent booleans decide which loops are inspected and how
//! strictly escaping control flow is treated.

use serde::{Deserialize, Serialize};

/// Preallocation analysis configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreallocConfig {
    /// Skip loops whose body can `return`/`break`/`continue` early.
    /// The iteration count is then only an upper bound.
    pub conservative: bool,

    /// Inspect `for ... range` loops
    pub include_range_loops: bool,

    /// Inspect counted `for init; cond; post` loops
    pub include_for_loops: bool,
}

impl Default for PreallocConfig {
    fn default() -> Self {
        Self {
            conservative: true,
            include_range_loops: true,
            include_for_loops: false,
        }
    }
}

impl PreallocConfig {
    /// Every loop kind enabled, conservative mode on
    pub fn all_loops() -> Self {
        Self {
            include_for_loops: true,
            ..Self::default()
        }
    }

    pub fn conservative(mut self, value: bool) -> Self {
        self.conservative = value;
        self
    }

    pub fn range_loops(mut self, value: bool) -> Self {
        self.include_range_loops = value;
        self
    }

    pub fn for_loops(mut self, value: bool) -> Self {
        self.include_for_loops = value;
        self
    }

    /// Neither loop kind is inspected, so no file can produce a diagnostic
    pub fn inspects_no_loops(&self) -> bool {
        !self.include_range_loops && !self.include_for_loops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_cli_defaults() {
        let config = PreallocConfig::default();
        assert!(config.conservative);
        assert!(config.include_range_loops);
        assert!(!config.include_for_loops);
        assert!(!config.inspects_no_loops());
    }

    #[test]
    fn test_builder() {
        let config = PreallocConfig::default().conservative(false).for_loops(true);
        assert!(!config.conservative);
        assert!(config.include_for_loops);
        assert_eq!(PreallocConfig::all_loops(), PreallocConfig::default().for_loops(true));
    }

    #[test]
    fn test_no_loop_kinds_is_allowed() {
        let config = PreallocConfig::default().range_loops(false);
        assert!(config.inspects_no_loops());
        assert!(!PreallocConfig::all_loops().range_loops(false).inspects_no_loops());
    }
}
