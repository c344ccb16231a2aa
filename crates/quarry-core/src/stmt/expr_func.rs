use super::*;

#[derive(Debug, Clone, PartialEq)]
pub enum ExprFunc {
    /// `AVG(expr)`
    Avg(FuncAggregate),

    /// `COUNT(*)`, `COUNT(expr)` or `COUNT(DISTINCT expr)`
    Count(FuncCount),

    /// `LOWER(expr)`
    Lower(Box<Expr>),

    /// `MAX(expr)`
    Max(Box<Expr>),

    /// `MIN(expr)`
    Min(Box<Expr>),

    /// `SUM(expr)`
    Sum(FuncAggregate),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncCount {
    /// The expression to count; `None` counts rows (`COUNT(*)`)
    pub arg: Option<Box<Expr>>,

    pub distinct: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncAggregate {
    pub arg: Box<Expr>,
    pub distinct: bool,
}

impl Expr {
    pub fn count_star() -> Self {
        ExprFunc::Count(FuncCount {
            arg: None,
            distinct: false,
        })
        .into()
    }

    pub fn count(arg: impl Into<Self>, distinct: bool) -> Self {
        ExprFunc::Count(FuncCount {
            arg: Some(Box::new(arg.into())),
            distinct,
        })
        .into()
    }

    pub fn sum(arg: impl Into<Self>, distinct: bool) -> Self {
        ExprFunc::Sum(FuncAggregate {
            arg: Box::new(arg.into()),
            distinct,
        })
        .into()
    }

    pub fn avg(arg: impl Into<Self>, distinct: bool) -> Self {
        ExprFunc::Avg(FuncAggregate {
            arg: Box::new(arg.into()),
            distinct,
        })
        .into()
    }

    pub fn min(arg: impl Into<Self>) -> Self {
        ExprFunc::Min(Box::new(arg.into())).into()
    }

    pub fn max(arg: impl Into<Self>) -> Self {
        ExprFunc::Max(Box::new(arg.into())).into()
    }

    pub fn lower(arg: impl Into<Self>) -> Self {
        ExprFunc::Lower(Box::new(arg.into())).into()
    }
}

impl From<ExprFunc> for Expr {
    fn from(value: ExprFunc) -> Self {
        Self::Func(value)
    }
}
