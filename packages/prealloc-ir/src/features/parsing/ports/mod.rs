//! Parsing ports (interfaces)

mod parser;
mod span_ext;

pub use parser::GoParser;
pub use span_ext::SpanExt;
