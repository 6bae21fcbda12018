//! Candidate detection for single statements

use crate::features::capacity::domain::CapacityExpr;
use crate::features::capacity::infrastructure::lower_expr;
use crate::features::parsing::domain::{AssignOp, Expr, ExprKind, Ident, Stmt, StmtKind};
use crate::features::slice_candidates::domain::SliceCandidate;
use crate::features::type_resolution::ports::TypeOracle;
use crate::shared::models::Position;

/// Elements a freshly created slice already holds
type InitialCapacity = Option<CapacityExpr>;

pub struct CandidateTracker<'o> {
    oracle: &'o dyn TypeOracle,
}

impl<'o> CandidateTracker<'o> {
    pub fn new(oracle: &'o dyn TypeOracle) -> Self {
        Self { oracle }
    }

    /// Candidates created by one statement, in name order; nested blocks
    /// are not entered
    pub fn candidates_of(&self, stmt: &Stmt) -> Vec<SliceCandidate> {
        let position = stmt.span.start();
        let mut found = Vec::new();

        match &stmt.kind {
            StmtKind::Var(specs) => {
                for spec in specs {
                    if spec.values.is_empty() {
                        // `var x []T`
                        let is_slice = spec
                            .ty
                            .as_ref()
                            .is_some_and(|ty| self.oracle.resolve(ty).is_slice());
                        if is_slice {
                            found.extend(
                                named(&spec.names).map(|n| SliceCandidate::new(n, position, None)),
                            );
                        }
                    } else if spec.values.len() == spec.names.len() {
                        for (name, value) in spec.names.iter().zip(&spec.values) {
                            if let Some(candidate) = self.created(&name.name, value, position) {
                                found.push(candidate);
                            }
                        }
                    }
                }
            }
            StmtKind::Assign {
                lhs,
                op: AssignOp::Define | AssignOp::Assign,
                rhs,
            } if lhs.len() == rhs.len() => {
                for (target, value) in lhs.iter().zip(rhs) {
                    let Some(name) = target.as_ident() else {
                        continue;
                    };
                    if let Some(candidate) = self.created(name, value, position) {
                        found.push(candidate);
                    }
                }
            }
            _ => {}
        }

        found
    }

    fn created(&self, name: &str, value: &Expr, position: Position) -> Option<SliceCandidate> {
        if name == "_" {
            return None;
        }
        let initial = self.slice_creation(value)?;
        Some(SliceCandidate::new(name, position, initial))
    }

    /// `Some` when `value` creates a slice without a capacity
    fn slice_creation(&self, value: &Expr) -> Option<InitialCapacity> {
        match &value.unparen().kind {
            // `[]T{}`, `[]T{a, b}`
            ExprKind::Composite {
                ty: Some(ty),
                elements,
                keyed: false,
                ..
            } => {
                if !self.oracle.resolve(ty).is_slice() {
                    return None;
                }
                let count = i64::try_from(elements.len()).ok()?;
                Some((count > 0).then(|| CapacityExpr::int(count)))
            }
            ExprKind::Call {
                func,
                args,
                spread: false,
            } => {
                // `[]T(nil)`
                if let Some(target) = self.oracle.denoted_type(func) {
                    let [arg] = args.as_slice() else {
                        return None;
                    };
                    return (target.is_slice() && arg.unparen().is_ident("nil")).then_some(None);
                }

                // `make([]T, n)`
                let [ty, len] = args.as_slice() else {
                    return None;
                };
                let is_make = func.unparen().is_ident("make")
                    && !self.oracle.type_of(func).is_known()
                    && self.oracle.denoted_type(ty).is_some_and(|t| t.is_slice());
                if !is_make {
                    return None;
                }
                let len = lower_expr(len, self.oracle);
                Some(match len.const_value() {
                    Some(0) => None,
                    _ => Some(len),
                })
            }
            _ => None,
        }
    }
}

fn named(names: &[Ident]) -> impl Iterator<Item = &str> {
    names.iter().filter(|n| !n.is_blank()).map(|n| n.name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::domain::GoFile;
    use crate::features::parsing::{GoParser, TreeSitterGoParser};
    use crate::features::type_resolution::ScopeResolver;

    /// `name@line:col initial` for each candidate of each top-level statement of `f`
    fn candidates(body: &str) -> Vec<String> {
        let code = format!(
            "package p\n\ntype Ints []int\ntype Point struct{{ X int }}\n\nfunc f(n int) {{\n{}\n}}\n",
            body
        );
        let file: GoFile = TreeSitterGoParser::new()
            .parse(&code, "test.go")
            .expect("parse should succeed");
        let info = ScopeResolver::resolve_file(&file);
        let tracker = CandidateTracker::new(&info);

        file.functions[0]
            .body
            .as_ref()
            .expect("body")
            .stmts
            .iter()
            .flat_map(|stmt| tracker.candidates_of(stmt))
            .map(|c| {
                let initial = c
                    .initial_capacity
                    .map(|e| e.render().unwrap_or_default())
                    .unwrap_or_else(|| "-".to_string());
                format!("{}@{} {}", c.name, c.position, initial)
            })
            .collect()
    }

    #[test]
    fn test_declarations_without_values() {
        let found = candidates("\tvar x, y []int\n\tvar z Ints\n\tvar p Point\n\tvar m map[string]int\n\tvar a [3]int");
        assert_eq!(found, vec!["x@7:2 -", "y@7:2 -", "z@8:2 -"]);
    }

    #[test]
    fn test_creation_forms() {
        let found = candidates(
            "\ta := []int{}\n\tb := make([]int, 0)\n\tc := []int(nil)\n\tvar d = Ints(nil)\n\tvar e []int = []int{1, 2, 3}\n\tf := make([]int, n)\n\tg := make([]int, 5)",
        );
        assert_eq!(
            found,
            vec!["a@7:2 -", "b@8:2 -", "c@9:2 -", "d@10:2 -", "e@11:2 3", "f@12:2 n", "g@13:2 5"]
        );
    }

    #[test]
    fn test_non_candidates() {
        let found = candidates(
            "\t_ := []int{}\n\tvar _ []int\n\ta := make([]int, 0, 10)\n\tb := []int{4: 1}\n\tc := map[string]int{}\n\td, e := []int{}\n\tvar f, g = []int{}\n\th := Point{}\n\ti := []int(other)\n\tj := f()",
        );
        assert!(found.is_empty(), "unexpected candidates: {:?}", found);
    }

    #[test]
    fn test_positional_assignment() {
        let found = candidates("\ta, b := 1, []string{}\n\tvar c, d = []int{}, 2");
        assert_eq!(found, vec!["b@7:2 -", "c@8:2 -"]);
    }

    #[test]
    fn test_plain_assignment_recreates() {
        let found = candidates("\tvar x []int\n\tx = []int{}");
        assert_eq!(found, vec!["x@7:2 -", "x@8:2 -"]);
    }

    #[test]
    fn test_shadowed_make_is_not_a_candidate() {
        let found = candidates("\tmake := func(a, b int) []int { return nil }\n\tx := make(1, 0)\n\t_ = x");
        assert!(found.is_empty());
    }
}
