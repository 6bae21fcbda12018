//! Type classes
//!
//! The analysis never needs full Go types, only which family a value
//! belongs to: can it be ranged over, what does ranging yield, is it a
//! slice. `TypeClass` is the underlying class of a type after resolving
//! named types.

mod predeclared;

pub use predeclared::{predeclared_type, PREDECLARED_TYPES};

use crate::features::parsing::domain::TypeExpr;
use crate::shared::models::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicKind {
    /// Every integer kind, including `byte`, `rune` and `uintptr`
    Int,
    /// Floating point and complex kinds
    Float,
    String,
    Bool,
    Other,
}

/// Underlying class of a Go type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeClass {
    Slice,
    Array,
    Map,
    Chan,
    Func,
    Pointer(Box<TypeClass>),
    Basic(BasicKind),
    Struct,
    Interface,
    Unknown,
}

impl TypeClass {
    pub fn is_slice(&self) -> bool {
        matches!(self, TypeClass::Slice)
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, TypeClass::Basic(BasicKind::Int))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, TypeClass::Basic(BasicKind::String))
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, TypeClass::Unknown)
    }

    /// `*[N]T`
    pub fn is_array_pointer(&self) -> bool {
        matches!(self, TypeClass::Pointer(inner) if matches!(**inner, TypeClass::Array))
    }

    /// Class of the index produced by `for k := range v` over a value of this class
    pub fn range_key(&self) -> TypeClass {
        match self {
            TypeClass::Slice | TypeClass::Array | TypeClass::Basic(BasicKind::String) => {
                TypeClass::Basic(BasicKind::Int)
            }
            TypeClass::Basic(BasicKind::Int) => TypeClass::Basic(BasicKind::Int),
            TypeClass::Pointer(_) if self.is_array_pointer() => TypeClass::Basic(BasicKind::Int),
            _ => TypeClass::Unknown,
        }
    }
}

/// Classify type syntax structurally; `named` resolves each named type
/// (`int`, `MySlice`) occurrence to its underlying class.
pub fn classify(ty: &TypeExpr, named: &mut dyn FnMut(&str, Span) -> TypeClass) -> TypeClass {
    match ty {
        TypeExpr::Named { name, span } => named(name, *span),
        // Other packages are out of reach
        TypeExpr::Qualified { .. } => TypeClass::Unknown,
        TypeExpr::Slice(_) => TypeClass::Slice,
        TypeExpr::Array { .. } => TypeClass::Array,
        TypeExpr::Map { .. } => TypeClass::Map,
        TypeExpr::Chan { .. } => TypeClass::Chan,
        TypeExpr::Pointer(elem) => TypeClass::Pointer(Box::new(classify(elem, named))),
        TypeExpr::Func(_) => TypeClass::Func,
        TypeExpr::Struct(_) => TypeClass::Struct,
        TypeExpr::Interface(_) => TypeClass::Interface,
        TypeExpr::Generic { base, .. } => classify(base, named),
        TypeExpr::Other(_) => TypeClass::Unknown,
    }
}
