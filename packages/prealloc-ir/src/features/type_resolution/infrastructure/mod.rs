//! Type resolution infrastructure

mod scope_resolver;
mod type_info;

pub use scope_resolver::ScopeResolver;
pub use type_info::TypeInfo;
