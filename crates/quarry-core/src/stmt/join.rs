use super::{Expr, SourceTable};

#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// The table to join
    pub table: SourceTable,

    /// The join condition
    pub constraint: JoinOp,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JoinOp {
    Left(Expr),
}
