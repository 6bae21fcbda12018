//! Concrete syntax tree → Go AST lowering
//!
//! Node kinds and field names follow tree-sitter-go. Comments and other
//! extras are skipped; unknown statement and expression kinds are kept as
//! `Other` with their source text.

use tree_sitter::Node as TSNode;

use crate::features::parsing::domain::{
    AssignOp, BinaryOp, Block, BranchKind, CaseClause, ChanDir, CommClause, Expr, ExprKind,
    FuncDecl, FuncLit, GoFile, Ident, Param, Signature, Stmt, StmtKind, TypeClause, TypeExpr,
    TypeSpec, UnaryOp, ValueSpec,
};
use crate::features::parsing::ports::SpanExt;
use crate::shared::models::Span;

/// Node kinds that denote a type
const TYPE_KINDS: &[&str] = &[
    "type_identifier",
    "qualified_type",
    "slice_type",
    "array_type",
    "implicit_length_array_type",
    "map_type",
    "channel_type",
    "pointer_type",
    "function_type",
    "struct_type",
    "interface_type",
    "generic_type",
    "parenthesized_type",
    "negated_type",
];

fn is_type_node(kind: &str) -> bool {
    TYPE_KINDS.contains(&kind)
}

fn named_children<'t>(node: TSNode<'t>) -> Vec<TSNode<'t>> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect();
    children
}

/// Named nodes under a field; comma-separated fields also tag the commas
fn field_children<'t>(node: TSNode<'t>, field: &str) -> Vec<TSNode<'t>> {
    let mut cursor = node.walk();
    let children = node
        .children_by_field_name(field, &mut cursor)
        .filter(|child| child.is_named() && !child.is_extra())
        .collect();
    children
}

/// Anonymous token child (`:=`, `...`)
fn has_token(node: TSNode<'_>, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token);
    found
}

/// Lowers one tree-sitter-go tree; borrows the source for node text
pub(crate) struct GoLowering<'s> {
    source: &'s str,
}

impl<'s> GoLowering<'s> {
    pub(crate) fn new(source: &'s str) -> Self {
        Self { source }
    }

    fn text(&self, node: TSNode<'_>) -> &'s str {
        self.source.get(node.byte_range()).unwrap_or("")
    }

    fn ident(&self, node: TSNode<'_>) -> Ident {
        Ident::new(self.text(node), node.to_span())
    }

    pub(crate) fn lower_file(&self, root: TSNode<'_>, path: &str) -> GoFile {
        let mut file = GoFile {
            path: path.to_string(),
            ..GoFile::default()
        };

        for child in named_children(root) {
            match child.kind() {
                "function_declaration" | "method_declaration" => {
                    file.functions.push(self.func_decl(child));
                }
                "var_declaration" | "const_declaration" | "type_declaration" => {
                    if let Some(stmt) = self.stmt(child) {
                        file.globals.push(stmt);
                    }
                }
                _ => {}
            }
        }

        file
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Declarations
    // ═══════════════════════════════════════════════════════════════════════

    fn func_decl(&self, node: TSNode<'_>) -> FuncDecl {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(n).to_string())
            .unwrap_or_default();
        let receiver = node
            .child_by_field_name("receiver")
            .and_then(|r| self.params(r).into_iter().next());

        FuncDecl {
            name,
            receiver,
            signature: self.signature(node),
            body: node.child_by_field_name("body").map(|b| self.block(b)),
            span: node.to_span(),
        }
    }

    /// Parameters and results of a function declaration, literal or type
    fn signature(&self, node: TSNode<'_>) -> Signature {
        let params = node
            .child_by_field_name("parameters")
            .map(|p| self.params(p))
            .unwrap_or_default();

        let results = match node.child_by_field_name("result") {
            Some(result) if result.kind() == "parameter_list" => self.params(result),
            Some(result) => vec![Param {
                names: Vec::new(),
                ty: self.type_expr(result),
                variadic: false,
            }],
            None => Vec::new(),
        };

        Signature { params, results }
    }

    fn params(&self, list: TSNode<'_>) -> Vec<Param> {
        named_children(list)
            .into_iter()
            .filter_map(|decl| {
                let variadic = match decl.kind() {
                    "parameter_declaration" => false,
                    "variadic_parameter_declaration" => true,
                    _ => return None,
                };
                let names = field_children(decl, "name")
                    .into_iter()
                    .map(|n| self.ident(n))
                    .collect();
                let ty = decl
                    .child_by_field_name("type")
                    .map(|t| self.type_expr(t))
                    .unwrap_or_else(|| TypeExpr::Other(String::new()));
                Some(Param {
                    names,
                    ty,
                    variadic,
                })
            })
            .collect()
    }

    fn value_specs(&self, decl: TSNode<'_>, spec_kind: &str) -> Vec<ValueSpec> {
        let mut specs = Vec::new();
        for child in named_children(decl) {
            if child.kind() == spec_kind {
                specs.push(self.value_spec(child));
            } else if child.kind().ends_with("_spec_list") {
                specs.extend(
                    named_children(child)
                        .into_iter()
                        .filter(|spec| spec.kind() == spec_kind)
                        .map(|spec| self.value_spec(spec)),
                );
            }
        }
        specs
    }

    fn value_spec(&self, spec: TSNode<'_>) -> ValueSpec {
        ValueSpec {
            names: field_children(spec, "name")
                .into_iter()
                .map(|n| self.ident(n))
                .collect(),
            ty: spec.child_by_field_name("type").map(|t| self.type_expr(t)),
            values: self.expr_list_field(spec, "value"),
            span: spec.to_span(),
        }
    }

    fn type_specs(&self, decl: TSNode<'_>) -> Vec<TypeSpec> {
        named_children(decl)
            .into_iter()
            .filter(|spec| matches!(spec.kind(), "type_spec" | "type_alias"))
            .filter_map(|spec| {
                let name = spec.child_by_field_name("name")?;
                let ty = spec.child_by_field_name("type")?;
                Some(TypeSpec {
                    name: self.ident(name),
                    ty: self.type_expr(ty),
                    alias: spec.kind() == "type_alias",
                })
            })
            .collect()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Statements
    // ═══════════════════════════════════════════════════════════════════════

    fn block(&self, node: TSNode<'_>) -> Block {
        Block {
            stmts: self.stmt_list(node, &[]),
            span: node.to_span(),
        }
    }

    /// Statements among `node`'s children, skipping the given child ids
    fn stmt_list(&self, node: TSNode<'_>, skip: &[usize]) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        for child in named_children(node) {
            if skip.contains(&child.id()) {
                continue;
            }
            if child.kind() == "statement_list" {
                stmts.extend(self.stmt_list(child, &[]));
            } else if let Some(stmt) = self.stmt(child) {
                stmts.push(stmt);
            }
        }
        stmts
    }

    /// Body of a `case`/`default` clause; the clause itself is the block
    fn clause_body(&self, clause: TSNode<'_>, skip: &[usize]) -> Block {
        Block {
            stmts: self.stmt_list(clause, skip),
            span: clause.to_span(),
        }
    }

    fn boxed_stmt(&self, node: Option<TSNode<'_>>) -> Option<Box<Stmt>> {
        node.and_then(|n| self.stmt(n)).map(Box::new)
    }

    fn stmt(&self, node: TSNode<'_>) -> Option<Stmt> {
        let span = node.to_span();
        let kind = match node.kind() {
            "comment" => return None,
            "var_declaration" => StmtKind::Var(self.value_specs(node, "var_spec")),
            "const_declaration" => StmtKind::Const(self.value_specs(node, "const_spec")),
            "type_declaration" => StmtKind::Type(self.type_specs(node)),
            "short_var_declaration" => StmtKind::Assign {
                lhs: self.expr_list_field(node, "left"),
                op: AssignOp::Define,
                rhs: self.expr_list_field(node, "right"),
            },
            "assignment_statement" => StmtKind::Assign {
                lhs: self.expr_list_field(node, "left"),
                op: self.assign_operator(node),
                rhs: self.expr_list_field(node, "right"),
            },
            "inc_statement" | "dec_statement" => match named_children(node).into_iter().next() {
                Some(target) => StmtKind::IncDec {
                    target: self.expr(target),
                    increment: node.kind() == "inc_statement",
                },
                None => StmtKind::Other(self.text(node).to_string()),
            },
            "expression_statement" => match named_children(node).into_iter().next() {
                Some(expr) => StmtKind::Expr(self.expr(expr)),
                None => StmtKind::Empty,
            },
            "block" => StmtKind::Block(self.block(node)),
            "if_statement" => self.if_stmt(node),
            "for_statement" => self.for_stmt(node),
            "expression_switch_statement" => self.switch_stmt(node),
            "type_switch_statement" => self.type_switch_stmt(node),
            "select_statement" => self.select_stmt(node),
            "labeled_statement" => {
                let label = node.child_by_field_name("label");
                let label_id = label.map(|l| l.id());
                let inner = named_children(node)
                    .into_iter()
                    .find(|child| Some(child.id()) != label_id)
                    .and_then(|child| self.stmt(child))
                    .unwrap_or_else(|| Stmt::new(StmtKind::Empty, span));
                StmtKind::Labeled {
                    label: label.map(|l| self.text(l).to_string()).unwrap_or_default(),
                    stmt: Box::new(inner),
                }
            }
            "return_statement" => StmtKind::Return(
                named_children(node)
                    .into_iter()
                    .next()
                    .map(|list| self.expr_list(list))
                    .unwrap_or_default(),
            ),
            "break_statement" => self.branch(node, BranchKind::Break),
            "continue_statement" => self.branch(node, BranchKind::Continue),
            "goto_statement" => self.branch(node, BranchKind::Goto),
            "fallthrough_statement" => self.branch(node, BranchKind::Fallthrough),
            "go_statement" | "defer_statement" => match named_children(node).into_iter().next() {
                Some(call) if node.kind() == "go_statement" => StmtKind::Go(self.expr(call)),
                Some(call) => StmtKind::Defer(self.expr(call)),
                None => StmtKind::Other(self.text(node).to_string()),
            },
            "send_statement" => StmtKind::Send {
                channel: self.field_expr(node, "channel"),
                value: self.field_expr(node, "value"),
            },
            "receive_statement" => self.receive_stmt(node),
            "empty_statement" => StmtKind::Empty,
            _ => StmtKind::Other(self.text(node).to_string()),
        };
        Some(Stmt::new(kind, span))
    }

    fn assign_operator(&self, node: TSNode<'_>) -> AssignOp {
        let token = match node.child_by_field_name("operator") {
            Some(op) => op.kind(),
            None => {
                let mut cursor = node.walk();
                let found = node
                    .children(&mut cursor)
                    .find(|child| !child.is_named() && child.kind().ends_with('='))
                    .map(|child| child.kind())
                    .unwrap_or("=");
                found
            }
        };
        match token {
            "=" => AssignOp::Assign,
            ":=" => AssignOp::Define,
            other => AssignOp::Compound(other.to_string()),
        }
    }

    fn branch(&self, node: TSNode<'_>, kind: BranchKind) -> StmtKind {
        StmtKind::Branch {
            kind,
            label: named_children(node)
                .into_iter()
                .next()
                .map(|label| self.text(label).to_string()),
        }
    }

    fn if_stmt(&self, node: TSNode<'_>) -> StmtKind {
        let Some(cond) = node.child_by_field_name("condition") else {
            return StmtKind::Other(self.text(node).to_string());
        };
        StmtKind::If {
            init: self.boxed_stmt(node.child_by_field_name("initializer")),
            cond: self.expr(cond),
            then: node
                .child_by_field_name("consequence")
                .map(|b| self.block(b))
                .unwrap_or_default(),
            els: self.boxed_stmt(node.child_by_field_name("alternative")),
        }
    }

    fn for_stmt(&self, node: TSNode<'_>) -> StmtKind {
        let body_node = node.child_by_field_name("body");
        let body_id = body_node.map(|b| b.id());
        let body = body_node.map(|b| self.block(b)).unwrap_or_default();
        let header = named_children(node)
            .into_iter()
            .find(|child| Some(child.id()) != body_id);

        match header {
            None => StmtKind::For {
                init: None,
                cond: None,
                post: None,
                body,
            },
            Some(clause) if clause.kind() == "for_clause" => StmtKind::For {
                init: self.boxed_stmt(clause.child_by_field_name("initializer")),
                cond: clause.child_by_field_name("condition").map(|c| self.expr(c)),
                post: self.boxed_stmt(clause.child_by_field_name("update")),
                body,
            },
            Some(clause) if clause.kind() == "range_clause" => {
                let mut left = self.expr_list_field(clause, "left").into_iter();
                StmtKind::Range {
                    key: left.next(),
                    value: left.next(),
                    define: has_token(clause, ":="),
                    subject: self.field_expr(clause, "right"),
                    body,
                }
            }
            Some(cond) => StmtKind::For {
                init: None,
                cond: Some(self.expr(cond)),
                post: None,
                body,
            },
        }
    }

    fn switch_stmt(&self, node: TSNode<'_>) -> StmtKind {
        let clauses = named_children(node)
            .into_iter()
            .filter(|c| matches!(c.kind(), "expression_case" | "default_case"))
            .map(|case| {
                let values = case.child_by_field_name("value");
                let skip: Vec<usize> = values.iter().map(|v| v.id()).collect();
                CaseClause {
                    exprs: values.map(|v| self.expr_list(v)).unwrap_or_default(),
                    body: self.clause_body(case, &skip),
                }
            })
            .collect();

        StmtKind::Switch {
            init: self.boxed_stmt(node.child_by_field_name("initializer")),
            tag: node.child_by_field_name("value").map(|v| self.expr(v)),
            clauses,
        }
    }

    fn type_switch_stmt(&self, node: TSNode<'_>) -> StmtKind {
        let clauses = named_children(node)
            .into_iter()
            .filter(|c| matches!(c.kind(), "type_case" | "default_case"))
            .map(|case| {
                let types = field_children(case, "type");
                let skip: Vec<usize> = types.iter().map(|t| t.id()).collect();
                TypeClause {
                    types: types.into_iter().map(|t| self.type_expr(t)).collect(),
                    body: self.clause_body(case, &skip),
                }
            })
            .collect();

        let binding = node
            .child_by_field_name("alias")
            .and_then(|alias| {
                if alias.kind() == "expression_list" {
                    named_children(alias).into_iter().next()
                } else {
                    Some(alias)
                }
            })
            .map(|name| self.ident(name));

        StmtKind::TypeSwitch {
            init: self.boxed_stmt(node.child_by_field_name("initializer")),
            binding,
            subject: self.field_expr(node, "value"),
            clauses,
        }
    }

    fn select_stmt(&self, node: TSNode<'_>) -> StmtKind {
        let clauses = named_children(node)
            .into_iter()
            .filter(|c| matches!(c.kind(), "communication_case" | "default_case"))
            .map(|case| {
                let comm = case.child_by_field_name("communication");
                let skip: Vec<usize> = comm.iter().map(|c| c.id()).collect();
                CommClause {
                    comm: self.boxed_stmt(comm),
                    body: self.clause_body(case, &skip),
                }
            })
            .collect();
        StmtKind::Select { clauses }
    }

    /// `v := <-ch` / `v = <-ch` / `<-ch` in a select case
    fn receive_stmt(&self, node: TSNode<'_>) -> StmtKind {
        let right = self.field_expr(node, "right");
        match node.child_by_field_name("left") {
            Some(left) => StmtKind::Assign {
                lhs: self.expr_list(left),
                op: if has_token(node, ":=") {
                    AssignOp::Define
                } else {
                    AssignOp::Assign
                },
                rhs: vec![right],
            },
            None => StmtKind::Expr(right),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Expressions
    // ═══════════════════════════════════════════════════════════════════════

    fn expr_list(&self, node: TSNode<'_>) -> Vec<Expr> {
        if node.kind() == "expression_list" {
            named_children(node)
                .into_iter()
                .map(|e| self.expr(e))
                .collect()
        } else {
            vec![self.expr(node)]
        }
    }

    fn expr_list_field(&self, node: TSNode<'_>, field: &str) -> Vec<Expr> {
        node.child_by_field_name(field)
            .map(|list| self.expr_list(list))
            .unwrap_or_default()
    }

    /// Required sub-expression; a placeholder when the tree is incomplete
    fn field_expr(&self, node: TSNode<'_>, field: &str) -> Expr {
        match node.child_by_field_name(field) {
            Some(child) => self.expr(child),
            None => Expr::new(ExprKind::Other(String::new()), Span::zero()),
        }
    }

    fn boxed_field(&self, node: TSNode<'_>, field: &str) -> Option<Box<Expr>> {
        node.child_by_field_name(field)
            .map(|child| Box::new(self.expr(child)))
    }

    pub(crate) fn expr(&self, node: TSNode<'_>) -> Expr {
        let span = node.to_span();
        let text = self.text(node);
        let kind = match node.kind() {
            "identifier" | "nil" | "true" | "false" | "iota" => ExprKind::Ident(text.to_string()),
            "int_literal" => ExprKind::IntLit(text.to_string()),
            "float_literal" | "imaginary_literal" => ExprKind::FloatLit(text.to_string()),
            "interpreted_string_literal" | "raw_string_literal" => {
                ExprKind::StringLit(text.to_string())
            }
            "rune_literal" => ExprKind::RuneLit(text.to_string()),
            "parenthesized_expression" => match named_children(node).into_iter().next() {
                Some(inner) => ExprKind::Paren(Box::new(self.expr(inner))),
                None => ExprKind::Other(text.to_string()),
            },
            "call_expression" => self.call(node),
            "type_conversion_expression" => {
                let func = match node.child_by_field_name("type") {
                    Some(ty) => Expr::new(ExprKind::Type(self.type_expr(ty)), ty.to_span()),
                    None => Expr::new(ExprKind::Other(String::new()), Span::zero()),
                };
                ExprKind::Call {
                    func: Box::new(func),
                    args: vec![self.field_expr(node, "operand")],
                    spread: false,
                }
            }
            "selector_expression" => ExprKind::Selector {
                operand: Box::new(self.field_expr(node, "operand")),
                field: node
                    .child_by_field_name("field")
                    .map(|f| self.text(f).to_string())
                    .unwrap_or_default(),
            },
            "index_expression" => ExprKind::Index {
                operand: Box::new(self.field_expr(node, "operand")),
                indices: field_children(node, "index")
                    .into_iter()
                    .map(|i| self.expr(i))
                    .collect(),
            },
            "slice_expression" => ExprKind::Slice {
                operand: Box::new(self.field_expr(node, "operand")),
                low: self.boxed_field(node, "start"),
                high: self.boxed_field(node, "end"),
                max: self.boxed_field(node, "capacity"),
            },
            "type_assertion_expression" => ExprKind::TypeAssert {
                operand: Box::new(self.field_expr(node, "operand")),
                ty: node.child_by_field_name("type").map(|t| self.type_expr(t)),
            },
            "binary_expression" => {
                let op = node
                    .child_by_field_name("operator")
                    .and_then(|op| BinaryOp::from_token(op.kind()));
                match op {
                    Some(op) => ExprKind::Binary {
                        op,
                        left: Box::new(self.field_expr(node, "left")),
                        right: Box::new(self.field_expr(node, "right")),
                    },
                    None => ExprKind::Other(text.to_string()),
                }
            }
            "unary_expression" => {
                let op = node
                    .child_by_field_name("operator")
                    .and_then(|op| UnaryOp::from_token(op.kind()));
                match op {
                    Some(op) => ExprKind::Unary {
                        op,
                        operand: Box::new(self.field_expr(node, "operand")),
                    },
                    None => ExprKind::Other(text.to_string()),
                }
            }
            "composite_literal" => {
                let ty = node.child_by_field_name("type").map(|t| self.type_expr(t));
                match node.child_by_field_name("body") {
                    Some(body) => self.literal_value(ty, body, text),
                    None => ExprKind::Composite {
                        ty,
                        elements: Vec::new(),
                        keyed: false,
                        text: text.to_string(),
                    },
                }
            }
            "literal_value" => self.literal_value(None, node, text),
            "func_literal" => ExprKind::FuncLit(Box::new(FuncLit {
                signature: self.signature(node),
                body: node
                    .child_by_field_name("body")
                    .map(|b| self.block(b))
                    .unwrap_or_default(),
                text: text.to_string(),
            })),
            kind if is_type_node(kind) => ExprKind::Type(self.type_expr(node)),
            _ => ExprKind::Other(text.to_string()),
        };
        Expr::new(kind, span)
    }

    fn call(&self, node: TSNode<'_>) -> ExprKind {
        let func = self.field_expr(node, "function");
        let mut args = Vec::new();
        let mut spread = false;

        if let Some(list) = node.child_by_field_name("arguments") {
            spread = has_token(list, "...");
            for arg in named_children(list) {
                if arg.kind() == "variadic_argument" {
                    spread = true;
                    if let Some(inner) = named_children(arg).into_iter().next() {
                        args.push(self.expr(inner));
                    }
                } else {
                    args.push(self.expr(arg));
                }
            }
        }

        ExprKind::Call {
            func: Box::new(func),
            args,
            spread,
        }
    }

    /// `{a, b}` / `{k: v}` body of a composite literal
    fn literal_value(&self, ty: Option<TypeExpr>, body: TSNode<'_>, text: &str) -> ExprKind {
        let mut elements = Vec::new();
        let mut keyed = false;

        for element in named_children(body) {
            if element.kind() == "keyed_element" {
                keyed = true;
                if let Some(value) = named_children(element).into_iter().last() {
                    elements.push(self.element(value));
                }
            } else {
                elements.push(self.element(element));
            }
        }

        ExprKind::Composite {
            ty,
            elements,
            keyed,
            text: text.to_string(),
        }
    }

    /// `literal_element` wraps an expression or a nested literal value
    fn element(&self, node: TSNode<'_>) -> Expr {
        if matches!(node.kind(), "literal_element" | "element") {
            if let Some(inner) = named_children(node).into_iter().next() {
                return self.expr(inner);
            }
        }
        self.expr(node)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Types
    // ═══════════════════════════════════════════════════════════════════════

    fn field_type(&self, node: TSNode<'_>, field: &str) -> Box<TypeExpr> {
        let ty = match node.child_by_field_name(field) {
            Some(child) => self.type_expr(child),
            None => TypeExpr::Other(String::new()),
        };
        Box::new(ty)
    }

    pub(crate) fn type_expr(&self, node: TSNode<'_>) -> TypeExpr {
        let text = self.text(node);
        match node.kind() {
            "type_identifier" | "identifier" => TypeExpr::Named {
                name: text.to_string(),
                span: node.to_span(),
            },
            "qualified_type" => TypeExpr::Qualified {
                package: node
                    .child_by_field_name("package")
                    .map(|p| self.text(p).to_string())
                    .unwrap_or_default(),
                name: node
                    .child_by_field_name("name")
                    .map(|n| self.text(n).to_string())
                    .unwrap_or_default(),
            },
            // `pkg.T` where an expression was expected
            "selector_expression" => TypeExpr::Qualified {
                package: node
                    .child_by_field_name("operand")
                    .map(|p| self.text(p).to_string())
                    .unwrap_or_default(),
                name: node
                    .child_by_field_name("field")
                    .map(|n| self.text(n).to_string())
                    .unwrap_or_default(),
            },
            "slice_type" => TypeExpr::Slice(self.field_type(node, "element")),
            "array_type" => TypeExpr::Array {
                len: node
                    .child_by_field_name("length")
                    .map(|l| self.text(l).to_string())
                    .unwrap_or_default(),
                elem: self.field_type(node, "element"),
            },
            "implicit_length_array_type" => TypeExpr::Array {
                len: "...".to_string(),
                elem: self.field_type(node, "element"),
            },
            "map_type" => TypeExpr::Map {
                key: self.field_type(node, "key"),
                value: self.field_type(node, "value"),
            },
            "channel_type" => {
                let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
                let dir = if compact.starts_with("<-chan") {
                    ChanDir::Recv
                } else if compact.starts_with("chan<-") {
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                TypeExpr::Chan {
                    dir,
                    elem: self.field_type(node, "value"),
                }
            }
            "pointer_type" => match named_children(node).into_iter().next() {
                Some(elem) => TypeExpr::Pointer(Box::new(self.type_expr(elem))),
                None => TypeExpr::Other(text.to_string()),
            },
            "function_type" => TypeExpr::Func(Box::new(self.signature(node))),
            "struct_type" => TypeExpr::Struct(text.to_string()),
            "interface_type" => TypeExpr::Interface(text.to_string()),
            "generic_type" => {
                let args = node
                    .child_by_field_name("type_arguments")
                    .map(|list| {
                        named_children(list)
                            .into_iter()
                            .map(|arg| {
                                // Newer grammars wrap each argument in `type_elem`
                                match named_children(arg).into_iter().next() {
                                    Some(inner) if arg.kind() == "type_elem" => {
                                        self.type_expr(inner)
                                    }
                                    _ => self.type_expr(arg),
                                }
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                TypeExpr::Generic {
                    base: self.field_type(node, "type"),
                    args,
                }
            }
            "parenthesized_type" | "parenthesized_expression" => {
                match named_children(node).into_iter().next() {
                    Some(inner) => self.type_expr(inner),
                    None => TypeExpr::Other(text.to_string()),
                }
            }
            _ => TypeExpr::Other(text.to_string()),
        }
    }
}
