//! Loop bound infrastructure

mod bound_resolver;

pub use bound_resolver::LoopBoundResolver;
