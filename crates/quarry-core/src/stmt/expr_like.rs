use super::*;

/// Tests if a string expression matches a SQL `LIKE` pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprLike {
    /// NOT LIKE
    pub negate: bool,

    /// The string expression to test.
    pub expr: Box<Expr>,

    /// The pattern to match.
    pub pattern: Box<Expr>,
}

impl Expr {
    pub fn like(expr: impl Into<Self>, pattern: impl Into<Self>) -> Self {
        ExprLike {
            negate: false,
            expr: Box::new(expr.into()),
            pattern: Box::new(pattern.into()),
        }
        .into()
    }

    pub fn not_like(expr: impl Into<Self>, pattern: impl Into<Self>) -> Self {
        ExprLike {
            negate: true,
            expr: Box::new(expr.into()),
            pattern: Box::new(pattern.into()),
        }
        .into()
    }
}

impl From<ExprLike> for Expr {
    fn from(value: ExprLike) -> Self {
        Self::Like(value)
    }
}
