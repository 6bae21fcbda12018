use crate::features::parsing::domain::{Expr, TypeExpr};
use crate::features::type_resolution::domain::TypeClass;

/// Answers type questions about nodes of one parsed file
pub trait TypeOracle: Send + Sync {
    /// Class of the value an expression evaluates to
    fn type_of(&self, expr: &Expr) -> TypeClass;

    /// Class of the type an expression names, if it names one
    /// (`[]int`, `MySlice`, `int64` in `int64(5)`)
    fn denoted_type(&self, expr: &Expr) -> Option<TypeClass>;

    /// Class of a type written in a declaration
    fn resolve(&self, ty: &TypeExpr) -> TypeClass;
}
