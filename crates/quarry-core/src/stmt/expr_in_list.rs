use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprInList {
    /// NOT IN
    pub negate: bool,

    pub expr: Box<Expr>,
    pub list: Vec<Expr>,
}

impl Expr {
    pub fn in_list(lhs: impl Into<Self>, list: Vec<Self>) -> Self {
        ExprInList {
            negate: false,
            expr: Box::new(lhs.into()),
            list,
        }
        .into()
    }

    pub fn not_in_list(lhs: impl Into<Self>, list: Vec<Self>) -> Self {
        ExprInList {
            negate: true,
            expr: Box::new(lhs.into()),
            list,
        }
        .into()
    }
}

impl From<ExprInList> for Expr {
    fn from(value: ExprInList) -> Self {
        Self::InList(value)
    }
}
