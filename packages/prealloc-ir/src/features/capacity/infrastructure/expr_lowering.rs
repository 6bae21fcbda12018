//! Go expression → capacity expression

use crate::features::capacity::domain::{AggregateKind, CapacityExpr};
use crate::features::parsing::domain::literals::parse_int_literal;
use crate::features::parsing::domain::{BinaryOp, Expr, ExprKind, UnaryOp};
use crate::features::type_resolution::ports::TypeOracle;

/// Symbolic interpretation of an integer-valued Go expression
///
/// Integer literals, identifiers, `+ - *`, unary minus, `len(x)` and
/// `min`/`max` are modelled; integer conversions of constants are
/// unwrapped. Everything else becomes an opaque `Var` holding its source
/// text.
pub fn lower_expr(expr: &Expr, oracle: &dyn TypeOracle) -> CapacityExpr {
    match &expr.kind {
        ExprKind::IntLit(text) => match parse_int_literal(text) {
            Some(value) => CapacityExpr::int(value),
            None => opaque(expr),
        },
        ExprKind::Ident(name) => CapacityExpr::var(name.as_str()),
        ExprKind::Paren(inner) => lower_expr(inner, oracle),
        ExprKind::Unary {
            op: UnaryOp::Neg,
            operand,
        } => lower_expr(operand, oracle).neg(),
        ExprKind::Unary {
            op: UnaryOp::Plus,
            operand,
        } => lower_expr(operand, oracle),
        ExprKind::Binary { op, left, right } => {
            let combine: fn(CapacityExpr, CapacityExpr) -> CapacityExpr = match op {
                BinaryOp::Add => CapacityExpr::add,
                BinaryOp::Sub => CapacityExpr::sub,
                BinaryOp::Mul => CapacityExpr::mul,
                _ => return opaque(expr),
            };
            combine(lower_expr(left, oracle), lower_expr(right, oracle))
        }
        ExprKind::Call {
            func,
            args,
            spread: false,
        } => lower_call(expr, func, args, oracle).unwrap_or_else(|| opaque(expr)),
        _ => opaque(expr),
    }
}

fn lower_call(
    call: &Expr,
    func: &Expr,
    args: &[Expr],
    oracle: &dyn TypeOracle,
) -> Option<CapacityExpr> {
    // Conversion: `int64(5)` is `5`, `int64(n)` stays as written
    if let Some(target) = oracle.denoted_type(func) {
        if !target.is_integer() {
            return None;
        }
        let [operand] = args else {
            return None;
        };
        let lowered = lower_expr(operand, oracle);
        return match lowered.const_value() {
            Some(_) => Some(lowered),
            None => Some(opaque(call)),
        };
    }

    let name = func.unparen().as_ident()?;
    // A shadowing declaration gives the callee a known type
    if oracle.type_of(func).is_known() {
        return None;
    }
    match (name, args) {
        ("len", [subject]) => Some(CapacityExpr::len_of(subject.to_string())),
        ("min", [_, ..]) => Some(aggregate(AggregateKind::Min, args, oracle)),
        ("max", [_, ..]) => Some(aggregate(AggregateKind::Max, args, oracle)),
        _ => None,
    }
}

fn aggregate(kind: AggregateKind, args: &[Expr], oracle: &dyn TypeOracle) -> CapacityExpr {
    CapacityExpr::aggregate(kind, args.iter().map(|arg| lower_expr(arg, oracle)))
}

fn opaque(expr: &Expr) -> CapacityExpr {
    CapacityExpr::var(expr.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::domain::{GoFile, StmtKind};
    use crate::features::parsing::{GoParser, TreeSitterGoParser};
    use crate::features::type_resolution::{ScopeResolver, TypeInfo};

    /// Lower the right-hand side of every `_ = expr` in the first function
    fn lower_all(body: &str) -> Vec<String> {
        let code = format!("package p\n\nfunc f(n, m int, s []int) {{\n{}\n}}\n", body);
        let file: GoFile = TreeSitterGoParser::new()
            .parse(&code, "test.go")
            .expect("parse should succeed");
        let info: TypeInfo = ScopeResolver::resolve_file(&file);

        file.functions[0]
            .body
            .as_ref()
            .expect("body")
            .stmts
            .iter()
            .filter_map(|stmt| match &stmt.kind {
                StmtKind::Assign { rhs, .. } => Some(&rhs[0]),
                _ => None,
            })
            .map(|expr| {
                lower_expr(expr, &info)
                    .render()
                    .unwrap_or_else(|e| format!("<{}>", e))
            })
            .collect()
    }

    #[test]
    fn test_lower_arithmetic() {
        let rendered = lower_all("\t_ = n + 1\n\t_ = (n - 1) + 1\n\t_ = 2 * 3\n\t_ = -m\n\t_ = 0x10\n\t_ = +n");
        assert_eq!(rendered, vec!["n + 1", "n", "6", "-m", "16", "n"]);
    }

    #[test]
    fn test_lower_builtins() {
        let rendered = lower_all("\t_ = len(s)\n\t_ = min(n, 10, min(m, 3))\n\t_ = max(4, 7)\n\t_ = cap(s)");
        assert_eq!(rendered, vec!["len(s)", "min(n, 10, m, 3)", "7", "cap(s)"]);
    }

    #[test]
    fn test_lower_conversions() {
        let rendered = lower_all("\t_ = int64(5)\n\t_ = int(n)\n\t_ = int32(-3) + n");
        assert_eq!(rendered, vec!["5", "int(n)", "n - 3"]);
    }

    #[test]
    fn test_lower_opaque_expressions() {
        let rendered = lower_all("\t_ = n / 2\n\t_ = 2 * (n / 2)\n\t_ = s[0] - 1\n\t_ = n << 1");
        assert_eq!(rendered, vec!["n / 2", "2 * (n / 2)", "s[0] - 1", "n << 1"]);
    }
}
