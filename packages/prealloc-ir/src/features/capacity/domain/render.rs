//! Infix rendering of capacity expressions

use thiserror::Error;

use super::CapacityExpr;

/// Expression has no textual form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("capacity is unresolvable")]
    Unresolvable,

    #[error("{0} aggregate has no operands")]
    EmptyAggregate(&'static str),
}

/// Source text of an operator expression the algebra does not model (`n / 2`)
const PREC_OPAQUE: u8 = 0;
const PREC_UNARY: u8 = 3;
const PREC_ATOM: u8 = 4;

/// Whether source text has a space outside brackets and string literals,
/// i.e. is an operator expression rather than an operand
fn is_compound(text: &str) -> bool {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for c in text.chars() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' && q != '`' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ' ' if depth == 0 => return true,
            _ => {}
        }
    }
    false
}

impl CapacityExpr {
    /// Render as Go-style infix arithmetic: `2 * n`, `n - m + 1`, `min(a, b)`
    pub fn render(&self) -> Result<String, RenderError> {
        let mut out = String::new();
        self.write_to(&mut out)?;
        Ok(out)
    }

    fn precedence(&self) -> u8 {
        match self {
            CapacityExpr::Int(value) if *value < 0 => PREC_UNARY,
            CapacityExpr::Neg(_) => PREC_UNARY,
            CapacityExpr::Var(text) if is_compound(text) => PREC_OPAQUE,
            CapacityExpr::Binary { op, .. } => op.precedence(),
            _ => PREC_ATOM,
        }
    }

    fn write_to(&self, out: &mut String) -> Result<(), RenderError> {
        match self {
            CapacityExpr::Int(value) => out.push_str(&value.to_string()),
            CapacityExpr::Var(name) => out.push_str(name),
            CapacityExpr::Len(subject) => {
                out.push_str("len(");
                out.push_str(subject);
                out.push(')');
            }
            CapacityExpr::Neg(operand) => {
                out.push('-');
                operand.write_operand(out, operand.precedence() < PREC_ATOM)?;
            }
            CapacityExpr::Binary { op, left, right } => {
                let prec = op.precedence();
                left.write_operand(out, left.precedence() < prec)?;
                out.push(' ');
                out.push_str(op.symbol());
                out.push(' ');
                // Left-associative: an equal-precedence right operand needs parens
                right.write_operand(out, right.precedence() <= prec)?;
            }
            CapacityExpr::Aggregate { kind, operands } => {
                if operands.is_empty() {
                    return Err(RenderError::EmptyAggregate(kind.name()));
                }
                out.push_str(kind.name());
                out.push('(');
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    operand.write_to(out)?;
                }
                out.push(')');
            }
            CapacityExpr::Unresolvable => return Err(RenderError::Unresolvable),
        }
        Ok(())
    }

    fn write_operand(&self, out: &mut String, parenthesize: bool) -> Result<(), RenderError> {
        if parenthesize {
            out.push('(');
            self.write_to(out)?;
            out.push(')');
        } else {
            self.write_to(out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::capacity::domain::{AggregateKind, ArithOp};

    fn var(name: &str) -> CapacityExpr {
        CapacityExpr::var(name)
    }

    #[test]
    fn test_render_atoms() {
        assert_eq!(CapacityExpr::int(5).render().unwrap(), "5");
        assert_eq!(var("n").render().unwrap(), "n");
        assert_eq!(CapacityExpr::len_of("s").render().unwrap(), "len(s)");
        assert_eq!(var("m").neg().render().unwrap(), "-m");
    }

    #[test]
    fn test_render_left_associative_chain() {
        let expr = CapacityExpr::int(5)
            .add(var("n"))
            .add(CapacityExpr::len_of("s"))
            .add(var("n").sub(var("m")).add(CapacityExpr::int(1)));
        assert_eq!(expr.render().unwrap(), "5 + n + len(s) + n - m + 1");
    }

    #[test]
    fn test_render_right_subtraction_parenthesized() {
        let expr = var("a").sub(var("b").sub(var("c")));
        assert_eq!(expr.render().unwrap(), "a - (b - c)");
    }

    #[test]
    fn test_render_multiplication() {
        assert_eq!(CapacityExpr::int(2).mul(var("n")).render().unwrap(), "2 * n");
        assert_eq!(
            CapacityExpr::int(2).mul(CapacityExpr::len_of("s")).render().unwrap(),
            "2 * len(s)"
        );
        let expr = CapacityExpr::int(3).mul(var("n").sub(var("m")));
        assert_eq!(expr.render().unwrap(), "3 * (n - m)");
    }

    #[test]
    fn test_render_negated_binary() {
        let expr = var("n").sub(var("m")).neg();
        assert_eq!(expr.render().unwrap(), "-(n - m)");
    }

    #[test]
    fn test_render_aggregate() {
        let expr = CapacityExpr::min(vec![var("n"), CapacityExpr::int(10), CapacityExpr::len_of("a")]);
        assert_eq!(expr.render().unwrap(), "min(n, 10, len(a))");

        let expr = CapacityExpr::int(2).mul(CapacityExpr::max(vec![var("a"), var("b")]));
        assert_eq!(expr.render().unwrap(), "2 * max(a, b)");
    }

    #[test]
    fn test_render_opaque_operands() {
        let half = var("n / 2");
        assert_eq!(half.render().unwrap(), "n / 2");
        assert_eq!(
            CapacityExpr::int(2).mul(half.clone()).render().unwrap(),
            "2 * (n / 2)"
        );
        assert_eq!(half.neg().render().unwrap(), "-(n / 2)");
        assert_eq!(var("f(a, b)").sub(var("m")).render().unwrap(), "f(a, b) - m");
        assert_eq!(var(r#"g(" ")"#).mul(CapacityExpr::int(3)).render().unwrap(), r#"g(" ") * 3"#);
    }

    #[test]
    fn test_render_failures() {
        assert_eq!(
            CapacityExpr::Unresolvable.render(),
            Err(RenderError::Unresolvable)
        );

        let empty = CapacityExpr::Aggregate {
            kind: AggregateKind::Max,
            operands: Vec::new(),
        };
        assert_eq!(empty.render(), Err(RenderError::EmptyAggregate("max")));

        let nested = CapacityExpr::Binary {
            op: ArithOp::Add,
            left: Box::new(var("n")),
            right: Box::new(empty),
        };
        assert!(nested.render().is_err());
    }
}
