//! Per-block preallocation analysis
//!
//! Every block is analyzed on its own: candidates never leak into nested
//! blocks and nested blocks never feed the enclosing one. A block's own
//! diagnostics come before those of the blocks nested inside it.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::config::PreallocConfig;
use crate::features::append_pattern::{scan_loop_body, AppendWeight, LoopScan};
use crate::features::capacity::CapacityExpr;
use crate::features::loop_bounds::{LoopBoundResolver, LoopKind, TripCount};
use crate::features::parsing::domain::{Block, Expr, ExprKind, GoFile, Stmt, StmtKind};
use crate::features::slice_candidates::{CandidateSet, CandidateTracker, SliceCandidate};
use crate::features::type_resolution::TypeOracle;
use crate::shared::models::Diagnostic;

/// Analyze every function body and function literal of `file`
///
/// Top-level units are visited in source order, so the result is ordered by
/// declaration, then block pre-order, then candidate order.
pub fn analyze_file(
    file: &GoFile,
    oracle: &dyn TypeOracle,
    config: &PreallocConfig,
) -> Vec<Diagnostic> {
    let analyzer = BlockAnalyzer::new(&file.path, oracle, config);

    let mut roots: Vec<&Block> = Vec::new();
    for global in &file.globals {
        nested_blocks(global, &mut roots);
    }
    roots.extend(file.functions.iter().filter_map(|func| func.body.as_ref()));
    roots.sort_by_key(|block| (block.span.start_line, block.span.start_col));

    let diagnostics: Vec<Diagnostic> = roots
        .into_iter()
        .flat_map(|block| analyzer.analyze_block(block))
        .collect();

    debug!(
        file = %file.path,
        functions = file.functions.len(),
        diagnostics = diagnostics.len(),
        "Analyzed file"
    );
    diagnostics
}

pub struct BlockAnalyzer<'a> {
    file_path: &'a str,
    config: &'a PreallocConfig,
    tracker: CandidateTracker<'a>,
    bounds: LoopBoundResolver<'a>,
}

impl<'a> BlockAnalyzer<'a> {
    pub fn new(file_path: &'a str, oracle: &'a dyn TypeOracle, config: &'a PreallocConfig) -> Self {
        Self {
            file_path,
            config,
            tracker: CandidateTracker::new(oracle),
            bounds: LoopBoundResolver::new(oracle),
        }
    }

    /// Diagnostics of `block` followed by those of every block nested in it
    pub fn analyze_block(&self, block: &Block) -> Vec<Diagnostic> {
        let mut candidates = CandidateSet::new();
        let mut nested = Vec::new();

        for stmt in &block.stmts {
            for candidate in self.tracker.candidates_of(stmt) {
                candidates.insert(candidate);
            }
            if let Some(loop_stmt) = stmt.as_loop() {
                if !candidates.is_empty() {
                    self.apply_loop(loop_stmt, &mut candidates);
                }
            }
            nested_blocks(stmt, &mut nested);
        }

        let mut diagnostics: Vec<Diagnostic> = candidates
            .into_reportable()
            .map(|candidate| {
                Diagnostic::new(self.file_path, candidate.position, candidate.message())
            })
            .collect();

        for inner in nested {
            diagnostics.extend(self.analyze_block(inner));
        }
        diagnostics
    }

    fn is_enabled(&self, kind: LoopKind) -> bool {
        match kind {
            LoopKind::Range => self.config.include_range_loops,
            LoopKind::Counted => self.config.include_for_loops,
        }
    }

    /// Fold one loop into the candidates it appends to
    fn apply_loop(&self, stmt: &Stmt, candidates: &mut CandidateSet) {
        let (kind, body) = match &stmt.kind {
            StmtKind::Range { body, .. } => (LoopKind::Range, body),
            StmtKind::For { body, .. } => (LoopKind::Counted, body),
            _ => return,
        };
        if !self.is_enabled(kind) {
            return;
        }
        let Some(descriptor) = self.bounds.describe(stmt) else {
            return;
        };

        let scan = {
            let names: FxHashSet<&str> = candidates.names().collect();
            scan_loop_body(body, &names)
        };
        if scan.is_empty() {
            return;
        }

        for candidate in candidates.iter_mut().filter(|c| !c.ineligible) {
            let Some(weight) = scan.weight(&candidate.name) else {
                continue;
            };
            self.apply_weight(candidate, weight, &descriptor.trip_count, &scan);
            debug!(
                file = self.file_path,
                line = stmt.span.start_line,
                ?kind,
                name = %candidate.name,
                ?weight,
                trip_count = ?descriptor.trip_count,
                eligible = candidate.is_reportable(),
                "Loop applied to candidate"
            );
        }
    }

    fn apply_weight(
        &self,
        candidate: &mut SliceCandidate,
        weight: AppendWeight,
        trip_count: &TripCount,
        scan: &LoopScan,
    ) {
        if trip_count.is_invalid()
            || (self.config.conservative && scan.has_escape)
            || weight.is_disqualified()
        {
            candidate.ineligible = true;
            return;
        }

        let AppendWeight::Count(count) = weight else {
            return;
        };
        match trip_count {
            TripCount::Resolved(iterations) => {
                let per_iteration = i64::try_from(count)
                    .map_or(CapacityExpr::Unresolvable, CapacityExpr::int);
                candidate.accumulate(per_iteration.mul(iterations.clone()));
            }
            TripCount::Unknown => candidate.accumulate(CapacityExpr::Unresolvable),
            TripCount::Empty | TripCount::Invalid => {}
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Nested block discovery
// ═══════════════════════════════════════════════════════════════════════════

/// Blocks directly inside `stmt`, in source order
fn nested_blocks<'b>(stmt: &'b Stmt, out: &mut Vec<&'b Block>) {
    match &stmt.kind {
        StmtKind::Var(specs) | StmtKind::Const(specs) => {
            for value in specs.iter().flat_map(|spec| &spec.values) {
                expr_blocks(value, out);
            }
        }
        StmtKind::Assign { lhs, rhs, .. } => {
            for expr in lhs.iter().chain(rhs) {
                expr_blocks(expr, out);
            }
        }
        StmtKind::IncDec { target, .. } => expr_blocks(target, out),
        StmtKind::Expr(expr) | StmtKind::Go(expr) | StmtKind::Defer(expr) => {
            expr_blocks(expr, out)
        }
        StmtKind::Send { channel, value } => {
            expr_blocks(channel, out);
            expr_blocks(value, out);
        }
        StmtKind::Return(values) => {
            for value in values {
                expr_blocks(value, out);
            }
        }
        StmtKind::Block(block) => out.push(block),
        StmtKind::If {
            init,
            cond,
            then,
            els,
        } => {
            if let Some(init) = init {
                nested_blocks(init, out);
            }
            expr_blocks(cond, out);
            out.push(then);
            if let Some(els) = els {
                nested_blocks(els, out);
            }
        }
        StmtKind::For {
            init,
            cond,
            post,
            body,
        } => {
            if let Some(init) = init {
                nested_blocks(init, out);
            }
            if let Some(cond) = cond {
                expr_blocks(cond, out);
            }
            if let Some(post) = post {
                nested_blocks(post, out);
            }
            out.push(body);
        }
        StmtKind::Range {
            key,
            value,
            subject,
            body,
            ..
        } => {
            for expr in key.iter().chain(value) {
                expr_blocks(expr, out);
            }
            expr_blocks(subject, out);
            out.push(body);
        }
        StmtKind::Switch { init, tag, clauses } => {
            if let Some(init) = init {
                nested_blocks(init, out);
            }
            if let Some(tag) = tag {
                expr_blocks(tag, out);
            }
            for clause in clauses {
                for expr in &clause.exprs {
                    expr_blocks(expr, out);
                }
                out.push(&clause.body);
            }
        }
        StmtKind::TypeSwitch {
            init,
            subject,
            clauses,
            ..
        } => {
            if let Some(init) = init {
                nested_blocks(init, out);
            }
            expr_blocks(subject, out);
            out.extend(clauses.iter().map(|clause| &clause.body));
        }
        StmtKind::Select { clauses } => {
            for clause in clauses {
                if let Some(comm) = &clause.comm {
                    nested_blocks(comm, out);
                }
                out.push(&clause.body);
            }
        }
        StmtKind::Labeled { stmt, .. } => nested_blocks(stmt, out),
        StmtKind::Type(_) | StmtKind::Branch { .. } | StmtKind::Empty | StmtKind::Other(_) => {}
    }
}

/// Function literal bodies inside `expr`
fn expr_blocks<'b>(expr: &'b Expr, out: &mut Vec<&'b Block>) {
    match &expr.kind {
        ExprKind::FuncLit(lit) => out.push(&lit.body),
        ExprKind::Call { func, args, .. } => {
            expr_blocks(func, out);
            for arg in args {
                expr_blocks(arg, out);
            }
        }
        ExprKind::Selector { operand, .. }
        | ExprKind::TypeAssert { operand, .. }
        | ExprKind::Unary { operand, .. }
        | ExprKind::Paren(operand) => expr_blocks(operand, out),
        ExprKind::Index { operand, indices } => {
            expr_blocks(operand, out);
            for index in indices {
                expr_blocks(index, out);
            }
        }
        ExprKind::Slice {
            operand,
            low,
            high,
            max,
        } => {
            expr_blocks(operand, out);
            for bound in [low, high, max].into_iter().flatten() {
                expr_blocks(bound, out);
            }
        }
        ExprKind::Binary { left, right, .. } => {
            expr_blocks(left, out);
            expr_blocks(right, out);
        }
        ExprKind::Composite { elements, .. } => {
            for element in elements {
                expr_blocks(element, out);
            }
        }
        ExprKind::Ident(_)
        | ExprKind::IntLit(_)
        | ExprKind::FloatLit(_)
        | ExprKind::StringLit(_)
        | ExprKind::RuneLit(_)
        | ExprKind::Type(_)
        | ExprKind::Other(_) => {}
    }
}
