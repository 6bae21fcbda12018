//! Span-keyed type tables for one file

use rustc_hash::FxHashMap;

use crate::features::parsing::domain::{Expr, ExprKind, TypeExpr};
use crate::features::type_resolution::domain::{classify, TypeClass};
use crate::features::type_resolution::ports::TypeOracle;
use crate::shared::models::Span;

/// Result of resolving a file
///
/// `values` holds the class of every expression whose class is known,
/// `types` the class of every type-denoting node (named type occurrences
/// and expressions that name a type). Both are keyed by the node's span.
#[derive(Debug, Default, Clone)]
pub struct TypeInfo {
    values: FxHashMap<Span, TypeClass>,
    types: FxHashMap<Span, TypeClass>,
}

impl TypeInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_value(&mut self, span: Span, class: &TypeClass) {
        if class.is_known() {
            self.values.insert(span, class.clone());
        }
    }

    pub(crate) fn record_type(&mut self, span: Span, class: &TypeClass) {
        self.types.insert(span, class.clone());
    }

    pub fn len(&self) -> usize {
        self.values.len() + self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.types.is_empty()
    }
}

impl TypeOracle for TypeInfo {
    fn type_of(&self, expr: &Expr) -> TypeClass {
        self.values
            .get(&expr.span)
            .cloned()
            .unwrap_or(TypeClass::Unknown)
    }

    fn denoted_type(&self, expr: &Expr) -> Option<TypeClass> {
        match &expr.kind {
            ExprKind::Type(ty) => Some(self.resolve(ty)),
            ExprKind::Paren(inner) => self.denoted_type(inner),
            ExprKind::Ident(_) | ExprKind::Selector { .. } | ExprKind::Index { .. } => {
                self.types.get(&expr.span).cloned()
            }
            _ => None,
        }
    }

    fn resolve(&self, ty: &TypeExpr) -> TypeClass {
        classify(ty, &mut |_, span| {
            self.types.get(&span).cloned().unwrap_or(TypeClass::Unknown)
        })
    }
}
