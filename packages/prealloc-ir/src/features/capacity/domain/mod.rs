//! Symbolic capacity algebra
//!
//! Small integer expressions describing loop trip counts and append growth.
//! Every constructor simplifies on the way in, so a built expression is
//! already in its rendered shape:
//!
//! - two integer literals under `+`, `-`, `*` fold into one literal
//! - `0` vanishes under `add`/`sub`, `1` vanishes under `mul`, `0` annihilates `mul`
//! - trailing constants are merged: `(n - 1) + 1` becomes `n`
//! - sums lean left: `a + (b - c)` becomes `a + b - c`
//! - adding a negative literal becomes a subtraction and vice versa
//! - nested `min`/`max` of the same kind are flattened
//! - `Unresolvable` absorbs every operation

mod render;

pub use render::RenderError;

/// Binary arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
}

impl ArithOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
        }
    }

    /// Binding strength used when rendering
    pub(crate) fn precedence(self) -> u8 {
        match self {
            ArithOp::Add | ArithOp::Sub => 1,
            ArithOp::Mul => 2,
        }
    }

    fn apply(self, left: i64, right: i64) -> Option<i64> {
        match self {
            ArithOp::Add => left.checked_add(right),
            ArithOp::Sub => left.checked_sub(right),
            ArithOp::Mul => left.checked_mul(right),
        }
    }
}

/// `min(...)` / `max(...)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateKind {
    Min,
    Max,
}

impl AggregateKind {
    pub fn name(self) -> &'static str {
        match self {
            AggregateKind::Min => "min",
            AggregateKind::Max => "max",
        }
    }

    /// The aggregate that picks the other extreme
    pub fn opposite(self) -> Self {
        match self {
            AggregateKind::Min => AggregateKind::Max,
            AggregateKind::Max => AggregateKind::Min,
        }
    }

    fn pick(self, a: i64, b: i64) -> i64 {
        match self {
            AggregateKind::Min => a.min(b),
            AggregateKind::Max => a.max(b),
        }
    }
}

/// Symbolic capacity expression
///
/// Build through the constructors (`int`, `var`, `len_of`, `add`, `sub`,
/// `mul`, `neg`, `aggregate`) rather than the variants, so that the
/// simplification rules hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CapacityExpr {
    /// Integer literal
    Int(i64),
    /// Opaque named quantity from the source (`n`, `cfg.Size`)
    Var(String),
    /// `len(subject)`
    Len(String),
    /// Unary negation
    Neg(Box<CapacityExpr>),
    Binary {
        op: ArithOp,
        left: Box<CapacityExpr>,
        right: Box<CapacityExpr>,
    },
    /// `min`/`max`, operands in first-occurrence order
    Aggregate {
        kind: AggregateKind,
        operands: Vec<CapacityExpr>,
    },
    /// Eligible, but no displayable expression exists
    Unresolvable,
}

impl CapacityExpr {
    pub fn int(value: i64) -> Self {
        CapacityExpr::Int(value)
    }

    pub fn var(name: impl Into<String>) -> Self {
        CapacityExpr::Var(name.into())
    }

    pub fn len_of(subject: impl Into<String>) -> Self {
        CapacityExpr::Len(subject.into())
    }

    /// Literal value, if the expression folded to one
    pub fn const_value(&self) -> Option<i64> {
        match self {
            CapacityExpr::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_unresolvable(&self) -> bool {
        matches!(self, CapacityExpr::Unresolvable)
    }

    pub fn add(self, other: CapacityExpr) -> CapacityExpr {
        match (self, other) {
            (CapacityExpr::Unresolvable, _) | (_, CapacityExpr::Unresolvable) => {
                CapacityExpr::Unresolvable
            }
            (left, CapacityExpr::Int(b)) => left.offset(b),
            (CapacityExpr::Int(a), right) if a <= 0 || right.has_trailing_constant() => {
                right.offset(a)
            }
            (left, CapacityExpr::Neg(inner)) => left.sub(*inner),
            // `a + (b ± c)` becomes `a + b ± c`
            (
                left,
                CapacityExpr::Binary {
                    op: op @ (ArithOp::Add | ArithOp::Sub),
                    left: head,
                    right: last,
                },
            ) => {
                let sum = left.add(*head);
                match op {
                    ArithOp::Add => sum.add(*last),
                    _ => sum.sub(*last),
                }
            }
            (left, right) => Self::binary(ArithOp::Add, left, right),
        }
    }

    pub fn sub(self, other: CapacityExpr) -> CapacityExpr {
        match (self, other) {
            (CapacityExpr::Unresolvable, _) | (_, CapacityExpr::Unresolvable) => {
                CapacityExpr::Unresolvable
            }
            (left, CapacityExpr::Int(b)) => match b.checked_neg() {
                Some(delta) => left.offset(delta),
                None => Self::binary(ArithOp::Sub, left, CapacityExpr::Int(b)),
            },
            (CapacityExpr::Int(0), right) => right.neg(),
            (left, CapacityExpr::Neg(inner)) => left.add(*inner),
            (left, right) if left == right => CapacityExpr::Int(0),
            (left, right) => Self::binary(ArithOp::Sub, left, right),
        }
    }

    pub fn mul(self, other: CapacityExpr) -> CapacityExpr {
        match (self, other) {
            (CapacityExpr::Unresolvable, _) | (_, CapacityExpr::Unresolvable) => {
                CapacityExpr::Unresolvable
            }
            (CapacityExpr::Int(a), CapacityExpr::Int(b)) => Self::fold(ArithOp::Mul, a, b),
            (CapacityExpr::Int(0), _) | (_, CapacityExpr::Int(0)) => CapacityExpr::Int(0),
            (CapacityExpr::Int(1), e) | (e, CapacityExpr::Int(1)) => e,
            (left, right) => Self::binary(ArithOp::Mul, left, right),
        }
    }

    pub fn neg(self) -> CapacityExpr {
        match self {
            CapacityExpr::Int(value) => match value.checked_neg() {
                Some(negated) => CapacityExpr::Int(negated),
                None => CapacityExpr::Neg(Box::new(CapacityExpr::Int(value))),
            },
            CapacityExpr::Neg(inner) => *inner,
            CapacityExpr::Unresolvable => CapacityExpr::Unresolvable,
            other => CapacityExpr::Neg(Box::new(other)),
        }
    }

    /// Build `min(...)`/`max(...)`, flattening nested aggregates of the
    /// same kind. All-constant operands fold to the extreme value; a single
    /// operand is returned as is; no operands at all is unresolvable.
    pub fn aggregate(
        kind: AggregateKind,
        operands: impl IntoIterator<Item = CapacityExpr>,
    ) -> CapacityExpr {
        let mut flat = Vec::new();
        for operand in operands {
            match operand {
                CapacityExpr::Unresolvable => return CapacityExpr::Unresolvable,
                CapacityExpr::Aggregate {
                    kind: inner,
                    operands,
                } if inner == kind => flat.extend(operands),
                other => flat.push(other),
            }
        }

        if flat.is_empty() {
            return CapacityExpr::Unresolvable;
        }
        if flat.len() == 1 {
            return flat.remove(0);
        }

        let constants: Option<Vec<i64>> = flat.iter().map(CapacityExpr::const_value).collect();
        if let Some(values) = constants {
            if let Some(extreme) = values.into_iter().reduce(|a, b| kind.pick(a, b)) {
                return CapacityExpr::Int(extreme);
            }
        }

        CapacityExpr::Aggregate {
            kind,
            operands: flat,
        }
    }

    pub fn min(operands: impl IntoIterator<Item = CapacityExpr>) -> CapacityExpr {
        Self::aggregate(AggregateKind::Min, operands)
    }

    pub fn max(operands: impl IntoIterator<Item = CapacityExpr>) -> CapacityExpr {
        Self::aggregate(AggregateKind::Max, operands)
    }

    fn binary(op: ArithOp, left: CapacityExpr, right: CapacityExpr) -> CapacityExpr {
        CapacityExpr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Fold two literals; on overflow keep the operation symbolic
    fn fold(op: ArithOp, a: i64, b: i64) -> CapacityExpr {
        match op.apply(a, b) {
            Some(value) => CapacityExpr::Int(value),
            None => Self::binary(op, CapacityExpr::Int(a), CapacityExpr::Int(b)),
        }
    }

    /// `self + delta`, merged into a trailing `+ k` / `- k` if there is one
    fn offset(self, delta: i64) -> CapacityExpr {
        match self {
            CapacityExpr::Unresolvable => CapacityExpr::Unresolvable,
            CapacityExpr::Int(a) => Self::fold(ArithOp::Add, a, delta),
            CapacityExpr::Binary {
                op: op @ (ArithOp::Add | ArithOp::Sub),
                left,
                right,
            } => match *right {
                CapacityExpr::Int(a) => {
                    let current = match op {
                        ArithOp::Add => Some(a),
                        _ => a.checked_neg(),
                    };
                    match current.and_then(|c| c.checked_add(delta)) {
                        Some(total) => (*left).offset(total),
                        None => Self::binary(op, *left, CapacityExpr::Int(a)).attach(delta),
                    }
                }
                right => Self::binary(op, *left, right).attach(delta),
            },
            other => other.attach(delta),
        }
    }

    fn has_trailing_constant(&self) -> bool {
        matches!(
            self,
            CapacityExpr::Binary {
                op: ArithOp::Add | ArithOp::Sub,
                right,
                ..
            } if matches!(**right, CapacityExpr::Int(_))
        )
    }

    fn attach(self, delta: i64) -> CapacityExpr {
        if delta == 0 {
            return self;
        }
        if delta > 0 {
            return Self::binary(ArithOp::Add, self, CapacityExpr::Int(delta));
        }
        match delta.checked_neg() {
            Some(magnitude) => Self::binary(ArithOp::Sub, self, CapacityExpr::Int(magnitude)),
            None => Self::binary(ArithOp::Add, self, CapacityExpr::Int(delta)),
        }
    }
}
