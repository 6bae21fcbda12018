//! Type Resolution Feature
//!
//! Classifies expressions and declared types of one Go file without
//! leaving it: predeclared types, package-level and local type
//! declarations, and whatever can be inferred from literals, builtins and
//! declared function results. Anything from another package is `Unknown`.
//!
//! ## Structure
//! - `domain/` - TypeClass, predeclared types
//! - `ports/` - TypeOracle trait
//! - `infrastructure/` - ScopeResolver, TypeInfo

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::{BasicKind, TypeClass};
pub use infrastructure::{ScopeResolver, TypeInfo};
pub use ports::TypeOracle;
