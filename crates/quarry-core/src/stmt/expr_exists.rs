use super::{Expr, Query};

/// Tests whether a subquery returns any rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprExists {
    /// NOT EXISTS
    pub negate: bool,

    /// The subquery to check.
    pub subquery: Box<Query>,
}

impl Expr {
    pub fn exists(subquery: impl Into<Query>) -> Expr {
        ExprExists {
            negate: false,
            subquery: Box::new(subquery.into()),
        }
        .into()
    }

    pub fn not_exists(subquery: impl Into<Query>) -> Expr {
        ExprExists {
            negate: true,
            subquery: Box::new(subquery.into()),
        }
        .into()
    }
}

impl From<ExprExists> for Expr {
    fn from(value: ExprExists) -> Self {
        Self::Exists(value)
    }
}
