//! Owned Go syntax tree
//!
//! A compact, immutable model of the parts of Go the analysis looks at.
//! Syntax it does not model is kept as `Other` with its source text, so the
//! tree always mirrors the file's statement structure.

use std::fmt;

use crate::shared::models::Span;

/// One parsed Go source file
#[derive(Debug, Clone, Default)]
pub struct GoFile {
    pub path: String,
    pub functions: Vec<FuncDecl>,
    /// Package-level `var`/`const`/`type` declarations
    pub globals: Vec<Stmt>,
    /// Number of tree-sitter error/missing nodes
    pub syntax_errors: usize,
}

/// Function or method declaration
#[derive(Debug, Clone)]
pub struct FuncDecl {
    pub name: String,
    pub receiver: Option<Param>,
    pub signature: Signature,
    pub body: Option<Block>,
    pub span: Span,
}

/// Parameters and results of a function type
#[derive(Debug, Clone, Default)]
pub struct Signature {
    pub params: Vec<Param>,
    pub results: Vec<Param>,
}

/// One parameter group: `a, b int` or `xs ...string`
#[derive(Debug, Clone)]
pub struct Param {
    pub names: Vec<Ident>,
    pub ty: TypeExpr,
    pub variadic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.name == "_"
    }
}

/// `{ ... }`
#[derive(Debug, Clone, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Loop statement, looking through labels
    pub fn as_loop(&self) -> Option<&Stmt> {
        match &self.kind {
            StmtKind::For { .. } | StmtKind::Range { .. } => Some(self),
            StmtKind::Labeled { stmt, .. } => stmt.as_loop(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum StmtKind {
    /// `var a, b T = x, y` (one entry per spec of a grouped declaration)
    Var(Vec<ValueSpec>),
    Const(Vec<ValueSpec>),
    Type(Vec<TypeSpec>),
    /// `a, b := x, y`, `a = x`, `a += x`
    Assign {
        lhs: Vec<Expr>,
        op: AssignOp,
        rhs: Vec<Expr>,
    },
    /// `i++` / `i--`
    IncDec { target: Expr, increment: bool },
    Expr(Expr),
    Block(Block),
    If {
        init: Option<Box<Stmt>>,
        cond: Expr,
        then: Block,
        /// `else` branch: a `Block` or another `If`
        els: Option<Box<Stmt>>,
    },
    /// `for init; cond; post {}`, `for cond {}`, `for {}`
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        post: Option<Box<Stmt>>,
        body: Block,
    },
    /// `for k, v := range subject {}`
    Range {
        key: Option<Expr>,
        value: Option<Expr>,
        define: bool,
        subject: Expr,
        body: Block,
    },
    Switch {
        init: Option<Box<Stmt>>,
        tag: Option<Expr>,
        clauses: Vec<CaseClause>,
    },
    TypeSwitch {
        init: Option<Box<Stmt>>,
        binding: Option<Ident>,
        subject: Expr,
        clauses: Vec<TypeClause>,
    },
    Select { clauses: Vec<CommClause> },
    Labeled { label: String, stmt: Box<Stmt> },
    Return(Vec<Expr>),
    Branch {
        kind: BranchKind,
        label: Option<String>,
    },
    Go(Expr),
    Defer(Expr),
    Send { channel: Expr, value: Expr },
    Empty,
    Other(String),
}

/// One `name(s) [type] [= value(s)]` entry of a `var`/`const` declaration
#[derive(Debug, Clone)]
pub struct ValueSpec {
    pub names: Vec<Ident>,
    pub ty: Option<TypeExpr>,
    pub values: Vec<Expr>,
    pub span: Span,
}

/// `type Name T` or `type Name = T`
#[derive(Debug, Clone)]
pub struct TypeSpec {
    pub name: Ident,
    pub ty: TypeExpr,
    pub alias: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignOp {
    /// `:=`
    Define,
    /// `=`
    Assign,
    /// `+=`, `<<=`, ... (operator text kept)
    Compound(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    Break,
    Continue,
    Goto,
    Fallthrough,
}

/// `case a, b:` (empty `exprs` for `default:`)
#[derive(Debug, Clone)]
pub struct CaseClause {
    pub exprs: Vec<Expr>,
    pub body: Block,
}

/// `case int, string:` in a type switch (empty `types` for `default:`)
#[derive(Debug, Clone)]
pub struct TypeClause {
    pub types: Vec<TypeExpr>,
    pub body: Block,
}

/// `case v := <-ch:` in a select (`comm` is `None` for `default:`)
#[derive(Debug, Clone)]
pub struct CommClause {
    pub comm: Option<Box<Stmt>>,
    pub body: Block,
}

#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Identifier name, if this is a bare identifier
    pub fn as_ident(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Ident(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_ident(&self, name: &str) -> bool {
        self.as_ident() == Some(name)
    }

    /// Strip any number of enclosing parentheses
    pub fn unparen(&self) -> &Expr {
        match &self.kind {
            ExprKind::Paren(inner) => inner.unparen(),
            _ => self,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    /// Identifiers, including `nil`, `true`, `false` and `iota`
    Ident(String),
    /// Integer literal, raw source text
    IntLit(String),
    FloatLit(String),
    /// Interpreted or raw string literal, raw source text with quotes
    StringLit(String),
    RuneLit(String),
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
        /// `f(xs...)`
        spread: bool,
    },
    /// A type in expression position: conversion target or `make` argument
    Type(TypeExpr),
    Selector {
        operand: Box<Expr>,
        field: String,
    },
    Index {
        operand: Box<Expr>,
        indices: Vec<Expr>,
    },
    Slice {
        operand: Box<Expr>,
        low: Option<Box<Expr>>,
        high: Option<Box<Expr>>,
        max: Option<Box<Expr>>,
    },
    TypeAssert {
        operand: Box<Expr>,
        ty: Option<TypeExpr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Paren(Box<Expr>),
    /// `T{a, b}`; `ty` is `None` for elided inner literals
    Composite {
        ty: Option<TypeExpr>,
        elements: Vec<Expr>,
        keyed: bool,
        text: String,
    },
    FuncLit(Box<FuncLit>),
    Other(String),
}

/// `func(params) results { body }`
#[derive(Debug, Clone)]
pub struct FuncLit {
    pub signature: Signature,
    pub body: Block,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Quo,
    Rem,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    AndNot,
    LogicalAnd,
    LogicalOr,
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
}

impl BinaryOp {
    pub fn from_token(token: &str) -> Option<Self> {
        let op = match token {
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Quo,
            "%" => BinaryOp::Rem,
            "&" => BinaryOp::And,
            "|" => BinaryOp::Or,
            "^" => BinaryOp::Xor,
            "<<" => BinaryOp::Shl,
            ">>" => BinaryOp::Shr,
            "&^" => BinaryOp::AndNot,
            "&&" => BinaryOp::LogicalAnd,
            "||" => BinaryOp::LogicalOr,
            "==" => BinaryOp::Eq,
            "!=" => BinaryOp::NotEq,
            "<" => BinaryOp::Less,
            "<=" => BinaryOp::LessEq,
            ">" => BinaryOp::Greater,
            ">=" => BinaryOp::GreaterEq,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Quo => "/",
            BinaryOp::Rem => "%",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
            BinaryOp::Xor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::AndNot => "&^",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::LogicalOr => "||",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Less => "<",
            BinaryOp::LessEq => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEq => ">=",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq
                | BinaryOp::NotEq
                | BinaryOp::Less
                | BinaryOp::LessEq
                | BinaryOp::Greater
                | BinaryOp::GreaterEq
        )
    }

    /// Comparison with its operands swapped: `a < b` is `b > a`
    pub fn mirrored(self) -> Self {
        match self {
            BinaryOp::Less => BinaryOp::Greater,
            BinaryOp::Greater => BinaryOp::Less,
            BinaryOp::LessEq => BinaryOp::GreaterEq,
            BinaryOp::GreaterEq => BinaryOp::LessEq,
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
    Complement,
    Deref,
    Addr,
    Recv,
}

impl UnaryOp {
    pub fn from_token(token: &str) -> Option<Self> {
        let op = match token {
            "-" => UnaryOp::Neg,
            "+" => UnaryOp::Plus,
            "!" => UnaryOp::Not,
            "^" => UnaryOp::Complement,
            "*" => UnaryOp::Deref,
            "&" => UnaryOp::Addr,
            "<-" => UnaryOp::Recv,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
            UnaryOp::Not => "!",
            UnaryOp::Complement => "^",
            UnaryOp::Deref => "*",
            UnaryOp::Addr => "&",
            UnaryOp::Recv => "<-",
        }
    }
}

/// Type syntax
#[derive(Debug, Clone)]
pub enum TypeExpr {
    /// `int`, `MySlice`, a type parameter
    Named { name: String, span: Span },
    /// `pkg.Name`
    Qualified { package: String, name: String },
    Slice(Box<TypeExpr>),
    /// `[N]T`, `[...]T`
    Array { len: String, elem: Box<TypeExpr> },
    Map { key: Box<TypeExpr>, value: Box<TypeExpr> },
    Chan { dir: ChanDir, elem: Box<TypeExpr> },
    Pointer(Box<TypeExpr>),
    Func(Box<Signature>),
    Struct(String),
    Interface(String),
    /// `List[T]`
    Generic { base: Box<TypeExpr>, args: Vec<TypeExpr> },
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

// ═══════════════════════════════════════════════════════════════════════════
// Source rendering (gofmt-like, used for capacity text and diagnostics)
// ═══════════════════════════════════════════════════════════════════════════

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Ident(name) => f.write_str(name),
            ExprKind::IntLit(text)
            | ExprKind::FloatLit(text)
            | ExprKind::StringLit(text)
            | ExprKind::RuneLit(text)
            | ExprKind::Other(text) => f.write_str(text),
            ExprKind::Call { func, args, spread } => {
                write!(f, "{}(", func)?;
                write_list(f, args)?;
                if *spread {
                    f.write_str("...")?;
                }
                f.write_str(")")
            }
            ExprKind::Type(ty) => match ty {
                // Conversions to composite types need parens: (*T)(x), (func())(x)
                TypeExpr::Pointer(_) | TypeExpr::Func(_) | TypeExpr::Chan { .. } => {
                    write!(f, "({})", ty)
                }
                _ => write!(f, "{}", ty),
            },
            ExprKind::Selector { operand, field } => write!(f, "{}.{}", operand, field),
            ExprKind::Index { operand, indices } => {
                write!(f, "{}[", operand)?;
                write_list(f, indices)?;
                f.write_str("]")
            }
            ExprKind::Slice {
                operand,
                low,
                high,
                max,
            } => {
                write!(f, "{}[", operand)?;
                if let Some(low) = low {
                    write!(f, "{}", low)?;
                }
                f.write_str(":")?;
                if let Some(high) = high {
                    write!(f, "{}", high)?;
                }
                if let Some(max) = max {
                    write!(f, ":{}", max)?;
                }
                f.write_str("]")
            }
            ExprKind::TypeAssert { operand, ty } => match ty {
                Some(ty) => write!(f, "{}.({})", operand, ty),
                None => write!(f, "{}.(type)", operand),
            },
            ExprKind::Binary { op, left, right } => {
                write!(f, "{} {} {}", left, op.as_str(), right)
            }
            ExprKind::Unary { op, operand } => write!(f, "{}{}", op.as_str(), operand),
            ExprKind::Paren(inner) => write!(f, "({})", inner),
            ExprKind::Composite { text, .. } => f.write_str(text),
            ExprKind::FuncLit(lit) => f.write_str(&lit.text),
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named { name, .. } => f.write_str(name),
            TypeExpr::Qualified { package, name } => write!(f, "{}.{}", package, name),
            TypeExpr::Slice(elem) => write!(f, "[]{}", elem),
            TypeExpr::Array { len, elem } => write!(f, "[{}]{}", len, elem),
            TypeExpr::Map { key, value } => write!(f, "map[{}]{}", key, value),
            TypeExpr::Chan { dir, elem } => match dir {
                ChanDir::Both => write!(f, "chan {}", elem),
                ChanDir::Send => write!(f, "chan<- {}", elem),
                ChanDir::Recv => write!(f, "<-chan {}", elem),
            },
            TypeExpr::Pointer(elem) => write!(f, "*{}", elem),
            TypeExpr::Func(_) => f.write_str("func(...)"),
            TypeExpr::Struct(text) | TypeExpr::Interface(text) | TypeExpr::Other(text) => {
                f.write_str(text)
            }
            TypeExpr::Generic { base, args } => {
                write!(f, "{}[", base)?;
                write_list(f, args)?;
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Expr {
        Expr::new(ExprKind::Ident(name.to_string()), Span::zero())
    }

    fn int(text: &str) -> Expr {
        Expr::new(ExprKind::IntLit(text.to_string()), Span::zero())
    }

    #[test]
    fn test_display_call_and_selector() {
        let call = Expr::new(
            ExprKind::Call {
                func: Box::new(ident("len")),
                args: vec![Expr::new(
                    ExprKind::Selector {
                        operand: Box::new(ident("cfg")),
                        field: "Items".to_string(),
                    },
                    Span::zero(),
                )],
                spread: false,
            },
            Span::zero(),
        );
        assert_eq!(call.to_string(), "len(cfg.Items)");
    }

    #[test]
    fn test_display_binary_and_paren() {
        let sum = Expr::new(
            ExprKind::Binary {
                op: BinaryOp::Add,
                left: Box::new(ident("n")),
                right: Box::new(int("1")),
            },
            Span::zero(),
        );
        let paren = Expr::new(ExprKind::Paren(Box::new(sum)), Span::zero());
        assert_eq!(paren.to_string(), "(n + 1)");
        assert_eq!(paren.unparen().to_string(), "n + 1");
    }

    #[test]
    fn test_display_types() {
        let ty = TypeExpr::Map {
            key: Box::new(TypeExpr::Named {
                name: "string".to_string(),
                span: Span::zero(),
            }),
            value: Box::new(TypeExpr::Slice(Box::new(TypeExpr::Qualified {
                package: "sort".to_string(),
                name: "IntSlice".to_string(),
            }))),
        };
        assert_eq!(ty.to_string(), "map[string][]sort.IntSlice");
    }

    #[test]
    fn test_mirrored_comparison() {
        assert_eq!(BinaryOp::Less.mirrored(), BinaryOp::Greater);
        assert_eq!(BinaryOp::GreaterEq.mirrored(), BinaryOp::LessEq);
        assert_eq!(BinaryOp::NotEq.mirrored(), BinaryOp::NotEq);
        assert!(BinaryOp::from_token("<=").is_some_and(BinaryOp::is_comparison));
        assert!(!BinaryOp::LogicalAnd.is_comparison());
    }
}
