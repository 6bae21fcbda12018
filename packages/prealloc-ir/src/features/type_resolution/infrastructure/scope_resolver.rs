//! Lexical scope walk
//!
//! One pass over a file in source order, binding names as Go would and
//! recording the class of every expression and type occurrence into a
//! `TypeInfo`. File-level types and functions are declared up front so
//! bodies can refer to them regardless of order.

use rustc_hash::{FxHashMap, FxHashSet};

use super::type_info::TypeInfo;
use crate::features::parsing::domain::{
    AssignOp, BinaryOp, Block, Expr, ExprKind, FuncDecl, GoFile, Param, Signature, Stmt,
    StmtKind, TypeExpr, UnaryOp, ValueSpec,
};
use crate::features::type_resolution::domain::{
    classify, predeclared_type, BasicKind, TypeClass,
};
use crate::features::type_resolution::ports::TypeOracle;
use crate::shared::models::Span;

#[derive(Debug, Clone)]
enum Binding {
    Value(TypeClass),
    Type(TypeClass),
    /// Top-level function with the class of its single result
    Func(TypeClass),
}

type Scope = FxHashMap<String, Binding>;

pub struct ScopeResolver<'f> {
    scopes: Vec<Scope>,
    /// File-level type declarations, resolved on first use
    pending_types: FxHashMap<&'f str, &'f TypeExpr>,
    resolving: FxHashSet<&'f str>,
    info: TypeInfo,
}

impl<'f> ScopeResolver<'f> {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
            pending_types: FxHashMap::default(),
            resolving: FxHashSet::default(),
            info: TypeInfo::new(),
        }
    }

    /// Resolve every function body and package-level declaration of a file
    pub fn resolve_file(file: &'f GoFile) -> TypeInfo {
        let mut resolver = Self::new();
        resolver.declare_package(file);
        for func in &file.functions {
            resolver.func_decl(func);
        }
        tracing::trace!(file = %file.path, entries = resolver.info.len(), "Types resolved");
        resolver.info
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Scopes
    // ═══════════════════════════════════════════════════════════════════════

    fn push(&mut self) {
        self.scopes.push(Scope::default());
    }

    fn pop(&mut self) {
        // The package scope is never popped
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    fn bind(&mut self, name: &str, binding: Binding) {
        if name == "_" {
            return;
        }
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), binding);
        }
    }

    fn declared_in_current(&self, name: &str) -> bool {
        self.scopes
            .last()
            .is_some_and(|scope| scope.contains_key(name))
    }

    fn lookup(&self, name: &str) -> Option<Binding> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .cloned()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Types
    // ═══════════════════════════════════════════════════════════════════════

    fn declare_package(&mut self, file: &'f GoFile) {
        for stmt in &file.globals {
            if let StmtKind::Type(specs) = &stmt.kind {
                for spec in specs {
                    self.pending_types.insert(spec.name.name.as_str(), &spec.ty);
                }
            }
        }
        let names: Vec<&'f str> = self.pending_types.keys().copied().collect();
        for name in names {
            self.package_type(name);
        }

        for func in file.functions.iter().filter(|f| f.receiver.is_none()) {
            let result = self.single_result(&func.signature);
            self.bind(&func.name, Binding::Func(result));
        }

        for stmt in &file.globals {
            if matches!(stmt.kind, StmtKind::Var(_) | StmtKind::Const(_)) {
                self.stmt(stmt);
            }
        }
    }

    /// Underlying class of a package-level type; cycles resolve to `Unknown`
    fn package_type(&mut self, name: &str) -> Option<TypeClass> {
        if let Some(Binding::Type(class)) = self.scopes.first().and_then(|s| s.get(name)) {
            return Some(class.clone());
        }
        let (&key, &ty) = self.pending_types.get_key_value(name)?;
        if !self.resolving.insert(key) {
            return Some(TypeClass::Unknown);
        }
        let class = self.resolve_type(ty);
        self.resolving.remove(key);

        if let Some(scope) = self.scopes.first_mut() {
            scope.insert(key.to_string(), Binding::Type(class.clone()));
        }
        Some(class)
    }

    fn lookup_type(&mut self, name: &str) -> TypeClass {
        match self.lookup(name) {
            Some(Binding::Type(class)) => return class,
            Some(_) => return TypeClass::Unknown,
            None => {}
        }
        if let Some(class) = self.package_type(name) {
            return class;
        }
        predeclared_type(name).unwrap_or(TypeClass::Unknown)
    }

    fn resolve_type(&mut self, ty: &TypeExpr) -> TypeClass {
        classify(ty, &mut |name, span| {
            let class = self.lookup_type(name);
            self.info.record_type(span, &class);
            class
        })
    }

    fn single_result(&mut self, signature: &Signature) -> TypeClass {
        match signature.results.as_slice() {
            [only] if only.names.len() <= 1 => self.param_class(only),
            _ => TypeClass::Unknown,
        }
    }

    fn param_class(&mut self, param: &Param) -> TypeClass {
        if param.variadic {
            return TypeClass::Slice;
        }
        self.resolve_type(&param.ty)
    }

    fn bind_signature(&mut self, signature: &Signature) {
        for param in signature.params.iter().chain(&signature.results) {
            let class = self.param_class(param);
            for name in &param.names {
                self.bind(&name.name, Binding::Value(class.clone()));
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Statements
    // ═══════════════════════════════════════════════════════════════════════

    fn func_decl(&mut self, func: &FuncDecl) {
        let Some(body) = &func.body else {
            return;
        };
        self.push();
        if let Some(receiver) = &func.receiver {
            let class = self.param_class(receiver);
            for name in &receiver.names {
                self.bind(&name.name, Binding::Value(class.clone()));
            }
        }
        self.bind_signature(&func.signature);
        self.stmts(&body.stmts);
        self.pop();
    }

    fn block(&mut self, block: &Block) {
        self.push();
        self.stmts(&block.stmts);
        self.pop();
    }

    fn stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.stmt(stmt);
        }
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Var(specs) => {
                for spec in specs {
                    self.value_spec(spec);
                }
            }
            StmtKind::Const(specs) => {
                let mut previous = TypeClass::Unknown;
                for spec in specs {
                    if spec.ty.is_none() && spec.values.is_empty() {
                        // Implicit repetition of the previous line (`iota` groups)
                        for name in &spec.names {
                            self.bind(&name.name, Binding::Value(previous.clone()));
                        }
                    } else {
                        previous = self.value_spec(spec);
                    }
                }
            }
            StmtKind::Type(specs) => {
                for spec in specs {
                    let class = self.resolve_type(&spec.ty);
                    self.info.record_type(spec.name.span, &class);
                    self.bind(&spec.name.name, Binding::Type(class));
                }
            }
            StmtKind::Assign { lhs, op, rhs } => self.assign(lhs, op, rhs),
            StmtKind::IncDec { target, .. } => {
                self.expr(target);
            }
            StmtKind::Expr(expr) | StmtKind::Go(expr) | StmtKind::Defer(expr) => {
                self.expr(expr);
            }
            StmtKind::Block(block) => self.block(block),
            StmtKind::If {
                init,
                cond,
                then,
                els,
            } => {
                self.push();
                if let Some(init) = init {
                    self.stmt(init);
                }
                self.expr(cond);
                self.block(then);
                if let Some(els) = els {
                    self.stmt(els);
                }
                self.pop();
            }
            StmtKind::For {
                init,
                cond,
                post,
                body,
            } => {
                self.push();
                if let Some(init) = init {
                    self.stmt(init);
                }
                if let Some(cond) = cond {
                    self.expr(cond);
                }
                if let Some(post) = post {
                    self.stmt(post);
                }
                self.block(body);
                self.pop();
            }
            StmtKind::Range {
                key,
                value,
                define,
                subject,
                body,
            } => {
                self.push();
                let subject_class = self.expr(subject);
                if *define {
                    let value_class = if subject_class.is_string() {
                        TypeClass::Basic(BasicKind::Int)
                    } else {
                        TypeClass::Unknown
                    };
                    let bindings = [
                        (key, subject_class.range_key()),
                        (value, value_class),
                    ];
                    for (target, class) in bindings {
                        if let Some(name) = target.as_ref().and_then(Expr::as_ident) {
                            self.bind(name, Binding::Value(class));
                        }
                    }
                }
                for target in [key, value].into_iter().flatten() {
                    self.expr(target);
                }
                self.block(body);
                self.pop();
            }
            StmtKind::Switch { init, tag, clauses } => {
                self.push();
                if let Some(init) = init {
                    self.stmt(init);
                }
                if let Some(tag) = tag {
                    self.expr(tag);
                }
                for clause in clauses {
                    self.push();
                    for expr in &clause.exprs {
                        self.expr(expr);
                    }
                    self.stmts(&clause.body.stmts);
                    self.pop();
                }
                self.pop();
            }
            StmtKind::TypeSwitch {
                init,
                binding,
                subject,
                clauses,
            } => {
                self.push();
                if let Some(init) = init {
                    self.stmt(init);
                }
                self.expr(subject);
                for clause in clauses {
                    self.push();
                    let classes: Vec<TypeClass> =
                        clause.types.iter().map(|ty| self.resolve_type(ty)).collect();
                    if let Some(binding) = binding {
                        let class = match classes.as_slice() {
                            [only] => only.clone(),
                            _ => TypeClass::Unknown,
                        };
                        self.bind(&binding.name, Binding::Value(class));
                    }
                    self.stmts(&clause.body.stmts);
                    self.pop();
                }
                self.pop();
            }
            StmtKind::Select { clauses } => {
                for clause in clauses {
                    self.push();
                    if let Some(comm) = &clause.comm {
                        self.stmt(comm);
                    }
                    self.stmts(&clause.body.stmts);
                    self.pop();
                }
            }
            StmtKind::Labeled { stmt, .. } => self.stmt(stmt),
            StmtKind::Return(exprs) => {
                for expr in exprs {
                    self.expr(expr);
                }
            }
            StmtKind::Send { channel, value } => {
                self.expr(channel);
                self.expr(value);
            }
            StmtKind::Branch { .. } | StmtKind::Empty | StmtKind::Other(_) => {}
        }
    }

    /// Bind the names of a `var`/`const` spec; returns the class of the first name
    fn value_spec(&mut self, spec: &ValueSpec) -> TypeClass {
        let values: Vec<TypeClass> = spec.values.iter().map(|v| self.expr(v)).collect();
        let declared = spec.ty.as_ref().map(|ty| self.resolve_type(ty));
        let paired = values.len() == spec.names.len();

        let mut first = None;
        for (i, name) in spec.names.iter().enumerate() {
            let class = match &declared {
                Some(class) => class.clone(),
                None if paired => values.get(i).cloned().unwrap_or(TypeClass::Unknown),
                None => TypeClass::Unknown,
            };
            first.get_or_insert_with(|| class.clone());
            self.bind(&name.name, Binding::Value(class));
        }
        first.unwrap_or(TypeClass::Unknown)
    }

    fn assign(&mut self, lhs: &[Expr], op: &AssignOp, rhs: &[Expr]) {
        let values: Vec<TypeClass> = rhs.iter().map(|e| self.expr(e)).collect();

        if *op == AssignOp::Define {
            let paired = values.len() == lhs.len();
            for (i, target) in lhs.iter().enumerate() {
                if let Some(name) = target.as_ident() {
                    // `:=` only assigns to names already declared in this scope
                    if !self.declared_in_current(name) {
                        let class = if paired {
                            values.get(i).cloned().unwrap_or(TypeClass::Unknown)
                        } else {
                            TypeClass::Unknown
                        };
                        self.bind(name, Binding::Value(class));
                    }
                }
            }
        }

        for target in lhs {
            self.expr(target);
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Expressions
    // ═══════════════════════════════════════════════════════════════════════

    fn expr(&mut self, expr: &Expr) -> TypeClass {
        let class = match &expr.kind {
            ExprKind::Ident(name) => self.ident(name, expr.span),
            ExprKind::IntLit(_) | ExprKind::RuneLit(_) => TypeClass::Basic(BasicKind::Int),
            ExprKind::FloatLit(_) => TypeClass::Basic(BasicKind::Float),
            ExprKind::StringLit(_) => TypeClass::Basic(BasicKind::String),
            ExprKind::Call { func, args, .. } => self.call(func, args),
            ExprKind::Type(ty) => {
                let class = self.resolve_type(ty);
                self.info.record_type(expr.span, &class);
                TypeClass::Unknown
            }
            ExprKind::Selector { operand, .. } => {
                self.expr(operand);
                TypeClass::Unknown
            }
            ExprKind::Index { operand, indices } => {
                let base = self.expr(operand);
                for index in indices {
                    self.expr(index);
                }
                // `List[int]` instantiates a generic type
                if let Some(class) = self.info.denoted_type(operand) {
                    self.info.record_type(expr.span, &class);
                }
                if base.is_string() {
                    TypeClass::Basic(BasicKind::Int)
                } else {
                    TypeClass::Unknown
                }
            }
            ExprKind::Slice {
                operand,
                low,
                high,
                max,
            } => {
                let base = self.expr(operand);
                for bound in [low, high, max].into_iter().flatten() {
                    self.expr(bound);
                }
                match base {
                    TypeClass::Slice | TypeClass::Array => TypeClass::Slice,
                    TypeClass::Basic(BasicKind::String) => base,
                    TypeClass::Pointer(_) if base.is_array_pointer() => TypeClass::Slice,
                    _ => TypeClass::Unknown,
                }
            }
            ExprKind::TypeAssert { operand, ty } => {
                self.expr(operand);
                match ty {
                    Some(ty) => self.resolve_type(ty),
                    None => TypeClass::Unknown,
                }
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.expr(left);
                let right = self.expr(right);
                match op {
                    op if op.is_comparison() => TypeClass::Basic(BasicKind::Bool),
                    BinaryOp::LogicalAnd | BinaryOp::LogicalOr => TypeClass::Basic(BasicKind::Bool),
                    BinaryOp::Shl | BinaryOp::Shr => left,
                    _ if left.is_known() => left,
                    _ => right,
                }
            }
            ExprKind::Unary { op, operand } => {
                let inner = self.expr(operand);
                match op {
                    UnaryOp::Addr => TypeClass::Pointer(Box::new(inner)),
                    UnaryOp::Deref => match inner {
                        TypeClass::Pointer(pointee) => *pointee,
                        _ => TypeClass::Unknown,
                    },
                    UnaryOp::Not => TypeClass::Basic(BasicKind::Bool),
                    UnaryOp::Recv => TypeClass::Unknown,
                    UnaryOp::Neg | UnaryOp::Plus | UnaryOp::Complement => inner,
                }
            }
            ExprKind::Paren(inner) => {
                let class = self.expr(inner);
                if let Some(denoted) = self.info.denoted_type(inner) {
                    self.info.record_type(expr.span, &denoted);
                }
                class
            }
            ExprKind::Composite { ty, elements, .. } => {
                for element in elements {
                    self.expr(element);
                }
                match ty {
                    Some(ty) => self.resolve_type(ty),
                    None => TypeClass::Unknown,
                }
            }
            ExprKind::FuncLit(lit) => {
                self.push();
                self.bind_signature(&lit.signature);
                self.stmts(&lit.body.stmts);
                self.pop();
                TypeClass::Func
            }
            ExprKind::Other(_) => TypeClass::Unknown,
        };

        self.info.record_value(expr.span, &class);
        class
    }

    fn ident(&mut self, name: &str, span: Span) -> TypeClass {
        match self.lookup(name) {
            Some(Binding::Value(class)) => return class,
            Some(Binding::Func(_)) => return TypeClass::Func,
            Some(Binding::Type(class)) => {
                self.info.record_type(span, &class);
                return TypeClass::Unknown;
            }
            None => {}
        }
        if let Some(class) = predeclared_type(name) {
            self.info.record_type(span, &class);
            return TypeClass::Unknown;
        }
        match name {
            "true" | "false" => TypeClass::Basic(BasicKind::Bool),
            "iota" => TypeClass::Basic(BasicKind::Int),
            _ => TypeClass::Unknown,
        }
    }

    fn call(&mut self, func: &Expr, args: &[Expr]) -> TypeClass {
        let arg_classes: Vec<TypeClass> = args.iter().map(|a| self.expr(a)).collect();
        self.expr(func);

        // Conversion: `T(x)`
        if let Some(class) = self.info.denoted_type(func) {
            return class;
        }

        match &func.unparen().kind {
            ExprKind::Ident(name) => match self.lookup(name) {
                Some(Binding::Func(result)) => result,
                Some(_) => TypeClass::Unknown,
                None => self.builtin_result(name, args, &arg_classes),
            },
            ExprKind::FuncLit(lit) => self.single_result(&lit.signature),
            _ => TypeClass::Unknown,
        }
    }

    fn builtin_result(&self, name: &str, args: &[Expr], classes: &[TypeClass]) -> TypeClass {
        let first_denoted = || args.first().and_then(|a| self.info.denoted_type(a));
        match name {
            "make" => first_denoted().unwrap_or(TypeClass::Unknown),
            "new" => TypeClass::Pointer(Box::new(first_denoted().unwrap_or(TypeClass::Unknown))),
            "len" | "cap" | "copy" => TypeClass::Basic(BasicKind::Int),
            "append" => TypeClass::Slice,
            "min" | "max" => classes
                .iter()
                .find(|c| c.is_known())
                .cloned()
                .unwrap_or(TypeClass::Unknown),
            "real" | "imag" | "complex" => TypeClass::Basic(BasicKind::Float),
            "recover" => TypeClass::Interface,
            _ => TypeClass::Unknown,
        }
    }
}

impl Default for ScopeResolver<'_> {
    fn default() -> Self {
        Self::new()
    }
}
