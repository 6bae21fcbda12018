//! Loop body scan for `x = append(x, ...)`
//!
//! Only statements directly in the body are considered: an append nested
//! in an `if` or inner loop does not run once per iteration.

use rustc_hash::FxHashSet;

use crate::features::append_pattern::domain::{AppendWeight, LoopScan};
use crate::features::parsing::domain::{AssignOp, Block, BranchKind, Expr, ExprKind, StmtKind};

/// Scan `body` for appends to the given candidate names
pub fn scan_loop_body(body: &Block, candidates: &FxHashSet<&str>) -> LoopScan {
    let mut scan = LoopScan::default();

    for stmt in &body.stmts {
        match &stmt.kind {
            StmtKind::Assign {
                lhs,
                op: AssignOp::Assign,
                rhs,
            } => {
                let paired = lhs.len() == rhs.len();
                for (index, target) in lhs.iter().enumerate() {
                    let Some(name) = target.as_ident().filter(|n| candidates.contains(n)) else {
                        continue;
                    };
                    let current = scan.weight(name);
                    if current.is_some_and(|w| w.is_disqualified()) {
                        continue;
                    }
                    // `x, y = f()` rebinds from a multi-value call
                    let value = if paired { rhs.get(index) } else { None };
                    let Some(update) = value.map_or(Some(AppendWeight::Disqualified), |v| {
                        classify_update(name, v)
                    }) else {
                        continue;
                    };
                    let next = match update {
                        AppendWeight::Count(added) => {
                            current.unwrap_or(AppendWeight::Count(0)).plus(added)
                        }
                        AppendWeight::Disqualified => AppendWeight::Disqualified,
                    };
                    scan.weights.insert(name.to_string(), next);
                }
            }
            StmtKind::If { then, .. } if !scan.has_escape => {
                scan.has_escape = then.stmts.iter().any(|inner| {
                    matches!(
                        inner.kind,
                        StmtKind::Return(_)
                            | StmtKind::Branch {
                                kind: BranchKind::Break | BranchKind::Continue | BranchKind::Goto,
                                ..
                            }
                    )
                });
            }
            _ => {}
        }
    }

    scan
}

/// Effect of `name = value`; `None` when it has no bearing
fn classify_update(name: &str, value: &Expr) -> Option<AppendWeight> {
    let ExprKind::Call { func, args, spread } = &value.unparen().kind else {
        return Some(AppendWeight::Disqualified);
    };
    if !func.unparen().is_ident("append") {
        return Some(AppendWeight::Disqualified);
    }
    // `x = append(x)` appends nothing
    if args.len() < 2 {
        return None;
    }
    // `x = append(y, v)` or `x = append(x, ys...)`
    if !args[0].unparen().is_ident(name) || *spread {
        return Some(AppendWeight::Disqualified);
    }
    Some(AppendWeight::Count(args.len() - 1))
}
