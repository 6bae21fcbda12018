//! Go's predeclared types

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use super::{BasicKind, TypeClass};

lazy_static! {
    /// Universe-scope type names and their classes
    pub static ref PREDECLARED_TYPES: FxHashMap<&'static str, TypeClass> = {
        let mut m = FxHashMap::default();

        for name in [
            "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16", "uint32",
            "uint64", "uintptr", "byte", "rune",
        ] {
            m.insert(name, TypeClass::Basic(BasicKind::Int));
        }
        for name in ["float32", "float64", "complex64", "complex128"] {
            m.insert(name, TypeClass::Basic(BasicKind::Float));
        }
        m.insert("string", TypeClass::Basic(BasicKind::String));
        m.insert("bool", TypeClass::Basic(BasicKind::Bool));

        // Interfaces
        m.insert("error", TypeClass::Interface);
        m.insert("any", TypeClass::Interface);
        m.insert("comparable", TypeClass::Interface);

        m
    };
}

/// Class of a predeclared type name
pub fn predeclared_type(name: &str) -> Option<TypeClass> {
    PREDECLARED_TYPES.get(name).cloned()
}
