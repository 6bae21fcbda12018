//! Slice candidates of one block

use crate::features::capacity::domain::CapacityExpr;
use crate::shared::models::Position;

/// A slice created in a block without a capacity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceCandidate {
    pub name: String,
    /// Start of the creating statement
    pub position: Position,
    /// Elements the slice already holds (`[]T{a, b}`, `make([]T, n)`)
    pub initial_capacity: Option<CapacityExpr>,
    /// Some loop appends to it in a supported way
    pub eligible: bool,
    /// Some loop rules a hint out; wins over `eligible`
    pub ineligible: bool,
    /// Sum of per-loop growth
    pub accumulated: Option<CapacityExpr>,
}

impl SliceCandidate {
    pub fn new(
        name: impl Into<String>,
        position: Position,
        initial_capacity: Option<CapacityExpr>,
    ) -> Self {
        Self {
            name: name.into(),
            position,
            initial_capacity,
            eligible: false,
            ineligible: false,
            accumulated: None,
        }
    }

    pub fn is_reportable(&self) -> bool {
        self.eligible && !self.ineligible
    }

    /// Record one loop's growth; an unresolvable contribution poisons the total
    pub fn accumulate(&mut self, growth: CapacityExpr) {
        self.eligible = true;
        self.accumulated = Some(match self.accumulated.take() {
            Some(total) => total.add(growth),
            None => growth,
        });
    }

    /// Capacity to recommend: initial elements plus accumulated growth
    pub fn capacity(&self) -> Option<CapacityExpr> {
        let accumulated = self.accumulated.clone()?;
        Some(match &self.initial_capacity {
            Some(initial) => initial.clone().add(accumulated),
            None => accumulated,
        })
    }

    /// `Consider preallocating x[ with capacity <expr>]`
    pub fn message(&self) -> String {
        let mut message = format!("Consider preallocating {}", self.name);
        if let Some(Ok(rendered)) = self.capacity().map(|c| c.render()) {
            message.push_str(" with capacity ");
            message.push_str(&rendered);
        }
        message
    }
}

/// Candidates of one block in creation order
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    candidates: Vec<SliceCandidate>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate; an earlier record of the same name can no longer be trusted
    pub fn insert(&mut self, candidate: SliceCandidate) {
        for earlier in self
            .candidates
            .iter_mut()
            .filter(|c| c.name == candidate.name)
        {
            earlier.ineligible = true;
        }
        self.candidates.push(candidate);
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.candidates.iter().map(|c| c.name.as_str())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SliceCandidate> {
        self.candidates.iter_mut()
    }

    pub fn into_reportable(self) -> impl Iterator<Item = SliceCandidate> {
        self.candidates.into_iter().filter(SliceCandidate::is_reportable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, initial: Option<CapacityExpr>) -> SliceCandidate {
        SliceCandidate::new(name, Position::new(1, 1), initial)
    }

    #[test]
    fn test_message_with_initial_capacity() {
        let mut x = candidate("x", Some(CapacityExpr::int(3)));
        x.accumulate(CapacityExpr::int(5));
        assert_eq!(x.message(), "Consider preallocating x with capacity 8");
    }

    #[test]
    fn test_message_without_capacity_clause() {
        let mut x = candidate("x", None);
        x.accumulate(CapacityExpr::int(5));
        x.accumulate(CapacityExpr::Unresolvable);
        x.accumulate(CapacityExpr::var("n"));
        assert!(x.is_reportable());
        assert_eq!(x.message(), "Consider preallocating x");
    }

    #[test]
    fn test_symbolic_accumulation() {
        let mut x = candidate("x", Some(CapacityExpr::var("k")));
        x.accumulate(CapacityExpr::var("n"));
        x.accumulate(CapacityExpr::len_of("s"));
        assert_eq!(x.message(), "Consider preallocating x with capacity k + n + len(s)");
    }

    #[test]
    fn test_recreated_name_invalidates_earlier_record() {
        let mut set = CandidateSet::new();
        set.insert(candidate("x", None));
        set.insert(candidate("y", None));
        set.insert(candidate("x", None));
        for c in set.iter_mut() {
            c.eligible = true;
        }
        let reported: Vec<_> = set.into_reportable().map(|c| c.name).collect();
        assert_eq!(reported, vec!["y", "x"]);
    }
}
