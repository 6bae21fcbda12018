//! Trip count derivation for range and counted loops

use crate::features::capacity::domain::{AggregateKind, CapacityExpr};
use crate::features::capacity::infrastructure::lower_expr;
use crate::features::loop_bounds::domain::{LoopDescriptor, LoopKind, TripCount};
use crate::features::parsing::domain::literals::{parse_int_literal, string_literal_iterations};
use crate::features::parsing::domain::{AssignOp, BinaryOp, Expr, ExprKind, Stmt, StmtKind};
use crate::features::type_resolution::domain::TypeClass;
use crate::features::type_resolution::ports::TypeOracle;

/// Direction of a counted loop's step variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Up,
    Down,
}

/// One comparison of the step variable, normalised to `i OP limit`
#[derive(Debug)]
struct Bound {
    limit: CapacityExpr,
    inclusive: bool,
}

pub struct LoopBoundResolver<'o> {
    oracle: &'o dyn TypeOracle,
}

impl<'o> LoopBoundResolver<'o> {
    pub fn new(oracle: &'o dyn TypeOracle) -> Self {
        Self { oracle }
    }

    /// Describe a `for` or range statement; `None` for anything else
    pub fn describe(&self, stmt: &Stmt) -> Option<LoopDescriptor> {
        match &stmt.kind {
            StmtKind::Range { subject, .. } => Some(LoopDescriptor::new(
                LoopKind::Range,
                self.range_count(subject),
            )),
            StmtKind::For {
                init, cond, post, ..
            } => Some(LoopDescriptor::new(
                LoopKind::Counted,
                self.counted_count(init.as_deref(), cond.as_ref(), post.as_deref()),
            )),
            _ => None,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Range loops
    // ═══════════════════════════════════════════════════════════════════════

    /// Number of iterations of `for range subject`
    pub fn range_count(&self, subject: &Expr) -> TripCount {
        match &subject.unparen().kind {
            ExprKind::IntLit(text) => {
                return match parse_int_literal(text) {
                    Some(value) => TripCount::from_count(CapacityExpr::int(value)),
                    None => TripCount::Unknown,
                };
            }
            ExprKind::StringLit(text) => {
                return match string_literal_iterations(text).and_then(|n| i64::try_from(n).ok()) {
                    Some(runes) => TripCount::from_count(CapacityExpr::int(runes)),
                    None => TripCount::Unknown,
                };
            }
            _ => {}
        }

        let class = self.oracle.type_of(subject);
        match class {
            TypeClass::Slice | TypeClass::Array | TypeClass::Map => {
                TripCount::Resolved(CapacityExpr::len_of(subject.to_string()))
            }
            TypeClass::Pointer(_) if class.is_array_pointer() => {
                TripCount::Resolved(CapacityExpr::len_of(subject.to_string()))
            }
            TypeClass::Basic(_) if class.is_string() => {
                TripCount::Resolved(CapacityExpr::len_of(subject.to_string()))
            }
            TypeClass::Basic(_) if class.is_integer() => {
                TripCount::from_count(lower_expr(subject, self.oracle))
            }
            TypeClass::Chan | TypeClass::Func => TripCount::Invalid,
            _ => TripCount::Unknown,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Counted loops
    // ═══════════════════════════════════════════════════════════════════════

    /// Number of iterations of `for init; cond; post`
    pub fn counted_count(
        &self,
        init: Option<&Stmt>,
        cond: Option<&Expr>,
        post: Option<&Stmt>,
    ) -> TripCount {
        let Some(cond) = cond else {
            return TripCount::Invalid;
        };
        if init.is_none() && post.is_none() && cond.unparen().is_ident("true") {
            return TripCount::Invalid;
        }

        let Some((var, step)) = post.and_then(step_of) else {
            return TripCount::Unknown;
        };
        let Some(start) = init.and_then(|init| initial_value(init, var)) else {
            return TripCount::Unknown;
        };

        let mut joiner = None;
        let mut bounds = Vec::new();
        if let Err(unresolved) = self.collect_bounds(cond, var, step, &mut joiner, &mut bounds) {
            return unresolved;
        }

        let all_inclusive = bounds.iter().all(|b| b.inclusive);
        let limits = bounds.into_iter().map(|bound| {
            if !bound.inclusive || all_inclusive {
                return bound.limit;
            }
            // Mixed: `i <= b` is `i < b + 1`, `i >= b` is `i > b - 1`
            match step {
                Step::Up => bound.limit.add(CapacityExpr::int(1)),
                Step::Down => bound.limit.sub(CapacityExpr::int(1)),
            }
        });

        let kind = match (step, joiner) {
            (Step::Up, Some(BinaryOp::LogicalOr)) => AggregateKind::Max,
            (Step::Up, _) => AggregateKind::Min,
            (Step::Down, Some(BinaryOp::LogicalOr)) => AggregateKind::Min,
            (Step::Down, _) => AggregateKind::Max,
        };
        let limit = CapacityExpr::aggregate(kind, limits);
        let start = lower_expr(start, self.oracle);

        let count = match step {
            Step::Up => limit.sub(start),
            Step::Down => start.sub(limit),
        };
        let count = if all_inclusive {
            count.add(CapacityExpr::int(1))
        } else {
            count
        };
        TripCount::from_count(count)
    }

    /// Gather the comparisons of `cond`, all joined by the same `&&`/`||`
    fn collect_bounds(
        &self,
        cond: &Expr,
        var: &str,
        step: Step,
        joiner: &mut Option<BinaryOp>,
        out: &mut Vec<Bound>,
    ) -> Result<(), TripCount> {
        let ExprKind::Binary { op, left, right } = &cond.unparen().kind else {
            return Err(TripCount::Unknown);
        };

        if matches!(op, BinaryOp::LogicalAnd | BinaryOp::LogicalOr) {
            if joiner.is_some_and(|j| j != *op) {
                return Err(TripCount::Unknown);
            }
            *joiner = Some(*op);
            self.collect_bounds(left, var, step, joiner, out)?;
            return self.collect_bounds(right, var, step, joiner, out);
        }

        if !op.is_comparison() {
            return Err(TripCount::Unknown);
        }
        let (op, limit) = if left.unparen().is_ident(var) {
            (*op, right)
        } else if right.unparen().is_ident(var) {
            (op.mirrored(), left)
        } else {
            return Err(TripCount::Unknown);
        };

        let inclusive = match (op, step) {
            (BinaryOp::NotEq, _) => false,
            (BinaryOp::Less, Step::Up) | (BinaryOp::Greater, Step::Down) => false,
            (BinaryOp::LessEq, Step::Up) | (BinaryOp::GreaterEq, Step::Down) => true,
            (BinaryOp::Eq, _) => return Err(TripCount::Unknown),
            // `i > n` while incrementing: never ends or never starts
            _ => return Err(TripCount::Invalid),
        };

        out.push(Bound {
            limit: lower_expr(limit, self.oracle),
            inclusive,
        });
        Ok(())
    }
}

/// Step variable and direction of `i++`, `i--`, `i += 1`, `i -= 1`
fn step_of(post: &Stmt) -> Option<(&str, Step)> {
    match &post.kind {
        StmtKind::IncDec { target, increment } => {
            let step = if *increment { Step::Up } else { Step::Down };
            Some((target.unparen().as_ident()?, step))
        }
        StmtKind::Assign {
            lhs,
            op: AssignOp::Compound(op),
            rhs,
        } => {
            let ([target], [amount]) = (lhs.as_slice(), rhs.as_slice()) else {
                return None;
            };
            let ExprKind::IntLit(text) = &amount.unparen().kind else {
                return None;
            };
            if parse_int_literal(text) != Some(1) {
                return None;
            }
            let step = match op.as_str() {
                "+=" => Step::Up,
                "-=" => Step::Down,
                _ => return None,
            };
            Some((target.unparen().as_ident()?, step))
        }
        _ => None,
    }
}

/// Initial value of `var` in `i := e` / `i, j = e, f`
fn initial_value<'s>(init: &'s Stmt, var: &str) -> Option<&'s Expr> {
    let StmtKind::Assign {
        lhs,
        op: AssignOp::Define | AssignOp::Assign,
        rhs,
    } = &init.kind
    else {
        return None;
    };
    if lhs.len() != rhs.len() {
        return None;
    }
    let index = lhs.iter().position(|target| target.is_ident(var))?;
    rhs.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::domain::GoFile;
    use crate::features::parsing::{GoParser, TreeSitterGoParser};
    use crate::features::type_resolution::ScopeResolver;

    /// Trip counts of the top-level loops of `f`, rendered
    fn trip_counts(body: &str) -> Vec<String> {
        let code = format!(
            "package p\n\nfunc f(n, m int, s []int, str string, ch chan int, it func(func(int) bool)) {{\n{}\n}}\n",
            body
        );
        let file: GoFile = TreeSitterGoParser::new()
            .parse(&code, "test.go")
            .expect("parse should succeed");
        let info = ScopeResolver::resolve_file(&file);
        let resolver = LoopBoundResolver::new(&info);

        file.functions[0]
            .body
            .as_ref()
            .expect("body")
            .stmts
            .iter()
            .filter_map(|stmt| resolver.describe(stmt))
            .map(|descriptor| match descriptor.trip_count {
                TripCount::Resolved(expr) => expr.render().unwrap_or_else(|e| e.to_string()),
                TripCount::Unknown => "<unknown>".to_string(),
                TripCount::Invalid => "<invalid>".to_string(),
                TripCount::Empty => "<empty>".to_string(),
            })
            .collect()
    }

    fn one(body: &str) -> String {
        let counts = trip_counts(body);
        assert_eq!(counts.len(), 1, "expected one loop in {:?}", body);
        counts.into_iter().next().unwrap_or_default()
    }

    #[test]
    fn test_range_counts() {
        let counts = trip_counts(
            r#"	var a [5]int
	var p *[5]int
	var mp map[string]int
	for range s {
	}
	for range a {
	}
	for range p {
	}
	for range mp {
	}
	for range str {
	}
	for range 5 {
	}
	for range n {
	}
	for range n - 1 {
	}
	for range "héllo" {
	}
	for range ch {
	}
	for range it {
	}
	for range 0 {
	}
	for range "" {
	}"#,
        );
        assert_eq!(
            counts,
            vec![
                "len(s)", "len(a)", "len(p)", "len(mp)", "len(str)", "5", "n", "n - 1", "5",
                "<invalid>", "<invalid>", "<empty>", "<empty>",
            ]
        );
    }

    #[test]
    fn test_range_over_unknown_type() {
        assert_eq!(one("\tfor range g() {\n\t}"), "<unknown>");
    }

    #[test]
    fn test_counted_constant_bounds() {
        assert_eq!(one("\tfor i := 0; i < 5; i++ {\n\t}"), "5");
        assert_eq!(one("\tfor i := 1; i < 5; i++ {\n\t}"), "4");
        assert_eq!(one("\tfor i := 0; i <= 5; i++ {\n\t}"), "6");
        assert_eq!(one("\tfor i := 0; i != 5; i++ {\n\t}"), "5");
        assert_eq!(one("\tfor i := 5; i > 0; i-- {\n\t}"), "5");
        assert_eq!(one("\tfor i := 5; i >= 0; i-- {\n\t}"), "6");
        assert_eq!(one("\tfor i := 5; 0 <= i; i -= 1 {\n\t}"), "6");
        assert_eq!(one("\tfor i := 0; 5 > i; i += 1 {\n\t}"), "5");
    }

    #[test]
    fn test_counted_symbolic_bounds() {
        assert_eq!(one("\tfor i := 0; i < n; i++ {\n\t}"), "n");
        assert_eq!(one("\tfor i := 1; i < n; i++ {\n\t}"), "n - 1");
        assert_eq!(one("\tfor i := 1; i <= n; i++ {\n\t}"), "n");
        assert_eq!(one("\tfor i := -1; i < n; i++ {\n\t}"), "n + 1");
        assert_eq!(one("\tfor i := m; i < 5; i++ {\n\t}"), "5 - m");
        assert_eq!(one("\tfor i := m; i <= 5; i++ {\n\t}"), "5 - m + 1");
        assert_eq!(one("\tfor i := m; i < 0; i++ {\n\t}"), "-m");
        assert_eq!(one("\tfor i := m; i <= n; i++ {\n\t}"), "n - m + 1");
        assert_eq!(one("\tfor i := len(s) - 1; i >= 0; i-- {\n\t}"), "len(s)");
    }

    #[test]
    fn test_counted_empty_and_invalid() {
        assert_eq!(one("\tfor i := 5; i < 5; i++ {\n\t}"), "<empty>");
        assert_eq!(one("\tfor i := 9; i < 5; i++ {\n\t}"), "<empty>");
        assert_eq!(one("\tfor i := 0; i > 5; i++ {\n\t}"), "<invalid>");
        assert_eq!(one("\tfor i := 0; i < 5; i-- {\n\t}"), "<invalid>");
        assert_eq!(one("\tfor {\n\t}"), "<invalid>");
        assert_eq!(one("\tfor true {\n\t}"), "<invalid>");
    }

    #[test]
    fn test_counted_unknown_shapes() {
        assert_eq!(one("\tfor n > 0 {\n\t}"), "<unknown>");
        assert_eq!(one("\tfor i := 0; i < n; i += 2 {\n\t}"), "<unknown>");
        assert_eq!(one("\tfor i := 0; i == 0; i++ {\n\t}"), "<unknown>");
        assert_eq!(one("\tfor i, j := 0, 0; j < n; i++ {\n\t}"), "<unknown>");
        assert_eq!(one("\tfor i := 0; i < n && m > 0; i++ {\n\t}"), "<unknown>");
        assert_eq!(one("\tfor i := 0; i < n && i < m || i < 3; i++ {\n\t}"), "<unknown>");
    }

    #[test]
    fn test_counted_multiple_assignment() {
        assert_eq!(one("\tfor j, i := 7, 2; i < n; i++ {\n\t}"), "n - 2");
    }

    #[test]
    fn test_counted_combined_bounds() {
        assert_eq!(one("\tfor i := 0; i < n && i < m; i++ {\n\t}"), "min(n, m)");
        assert_eq!(one("\tfor i := 0; i < n || i < m; i++ {\n\t}"), "max(n, m)");
        assert_eq!(one("\tfor i := 0; i < n && i < min(m, 10); i++ {\n\t}"), "min(n, m, 10)");
        assert_eq!(one("\tfor i := 0; i < 8 && i < 3; i++ {\n\t}"), "3");
        assert_eq!(one("\tfor i := 0; i <= n && i < m; i++ {\n\t}"), "min(n + 1, m)");
        assert_eq!(one("\tfor i := n; i > 0 && i > m; i-- {\n\t}"), "n - max(0, m)");
    }

    #[test]
    fn test_counted_labeled_loop_through_as_loop() {
        let code = "package p\nfunc f(n int) {\nouter:\n\tfor i := 0; i < n; i++ {\n\t\tbreak outer\n\t}\n}\n";
        let file = TreeSitterGoParser::new().parse(code, "t.go").expect("parse");
        let info = ScopeResolver::resolve_file(&file);
        let resolver = LoopBoundResolver::new(&info);
        let stmt = &file.functions[0].body.as_ref().expect("body").stmts[0];
        let descriptor = stmt.as_loop().and_then(|l| resolver.describe(l)).expect("loop");
        assert_eq!(descriptor.kind, LoopKind::Counted);
        assert_eq!(descriptor.trip_count, TripCount::Resolved(CapacityExpr::var("n")));
    }
}
