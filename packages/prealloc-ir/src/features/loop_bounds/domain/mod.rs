//! Loop trip counts

use crate::features::capacity::domain::CapacityExpr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopKind {
    /// `for ... range x {}`
    Range,
    /// `for init; cond; post {}` and its reduced forms
    Counted,
}

/// How many times a loop body runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripCount {
    /// Symbolic count, positive or not provably constant
    Resolved(CapacityExpr),
    /// Shape not understood; appends in the body still count, but
    /// no capacity can be stated
    Unknown,
    /// The loop has no finite length to preallocate for (channels,
    /// iterator functions, `for {}`) or contradicts itself
    Invalid,
    /// Provably never runs
    Empty,
}

impl TripCount {
    /// Classify a computed count: a constant `<= 0` means the loop never runs
    pub fn from_count(count: CapacityExpr) -> Self {
        match count.const_value() {
            Some(value) if value <= 0 => TripCount::Empty,
            _ if count.is_unresolvable() => TripCount::Unknown,
            _ => TripCount::Resolved(count),
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, TripCount::Invalid)
    }
}

/// One visited loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopDescriptor {
    pub kind: LoopKind,
    pub trip_count: TripCount,
}

impl LoopDescriptor {
    pub fn new(kind: LoopKind, trip_count: TripCount) -> Self {
        Self { kind, trip_count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_count() {
        assert_eq!(TripCount::from_count(CapacityExpr::int(0)), TripCount::Empty);
        assert_eq!(TripCount::from_count(CapacityExpr::int(-4)), TripCount::Empty);
        assert_eq!(
            TripCount::from_count(CapacityExpr::int(3)),
            TripCount::Resolved(CapacityExpr::int(3))
        );
        assert_eq!(
            TripCount::from_count(CapacityExpr::var("n")),
            TripCount::Resolved(CapacityExpr::var("n"))
        );
        assert_eq!(TripCount::from_count(CapacityExpr::Unresolvable), TripCount::Unknown);
    }
}
