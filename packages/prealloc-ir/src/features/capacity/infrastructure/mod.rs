//! Capacity infrastructure

mod expr_lowering;

pub use expr_lowering::lower_expr;
