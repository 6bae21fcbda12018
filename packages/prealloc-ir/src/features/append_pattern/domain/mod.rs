//! Append weights

use rustc_hash::FxHashMap;

/// What one loop body does to one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendWeight {
    /// Elements appended per iteration
    Count(usize),
    /// Mutated in a way that makes a capacity hint misleading
    Disqualified,
}

impl AppendWeight {
    /// Add `elements` appended elements; disqualification sticks
    pub fn plus(self, elements: usize) -> Self {
        match self {
            AppendWeight::Count(count) => AppendWeight::Count(count.saturating_add(elements)),
            AppendWeight::Disqualified => AppendWeight::Disqualified,
        }
    }

    pub fn is_disqualified(&self) -> bool {
        matches!(self, AppendWeight::Disqualified)
    }
}

/// Result of scanning one loop body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopScan {
    /// Only candidates the body touches have an entry
    pub weights: FxHashMap<String, AppendWeight>,
    /// A direct `if` in the body returns or branches out
    pub has_escape: bool,
}

impl LoopScan {
    pub fn weight(&self, name: &str) -> Option<AppendWeight> {
        self.weights.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disqualification_sticks() {
        assert_eq!(AppendWeight::Count(1).plus(2), AppendWeight::Count(3));
        assert_eq!(AppendWeight::Disqualified.plus(2), AppendWeight::Disqualified);
        assert!(AppendWeight::Disqualified.is_disqualified());
    }
}
