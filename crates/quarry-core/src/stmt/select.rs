use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    /// The projection part of the SQL query.
    pub returning: Returning,

    /// The `FROM` part of the SQL query.
    pub from: SourceTable,

    /// Joins applied to the source table, in emission order.
    pub joins: Vec<Join>,

    /// Query filter
    pub filter: Option<Expr>,

    /// GROUP BY expressions
    pub group_by: Vec<Expr>,
}

impl Select {
    pub fn new(from: impl Into<SourceTable>) -> Self {
        Self {
            returning: Returning::Star,
            from: from.into(),
            joins: vec![],
            filter: None,
            group_by: vec![],
        }
    }

    pub fn left_join(&mut self, table: SourceTable, on: impl Into<Expr>) {
        self.joins.push(Join {
            table,
            constraint: JoinOp::Left(on.into()),
        });
    }

    /// AND `expr` onto the current filter.
    pub fn and_where(&mut self, expr: impl Into<Expr>) {
        self.filter = Some(match self.filter.take() {
            Some(filter) => Expr::and(filter, expr),
            None => expr.into(),
        });
    }

    /// OR `expr` onto the current filter.
    pub fn or_where(&mut self, expr: impl Into<Expr>) {
        self.filter = Some(match self.filter.take() {
            Some(filter) => Expr::or(filter, expr),
            None => expr.into(),
        });
    }

    pub fn group_by(&mut self, expr: impl Into<Expr>) {
        self.group_by.push(expr.into());
    }
}

impl From<Select> for Query {
    fn from(value: Select) -> Self {
        Self::new(value)
    }
}
