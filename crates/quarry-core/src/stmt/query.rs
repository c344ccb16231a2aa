use super::*;

/// A SELECT statement under construction.
///
/// This is the builder object the compiler decorates: joins and predicates
/// land on the [`Select`] body, ordering and row windowing on the query
/// itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// The body of the query
    pub body: Select,

    /// ORDER BY
    pub order_by: Option<OrderBy>,

    /// LIMIT and OFFSET
    pub limit: Option<Limit>,
}

impl Query {
    pub fn new(body: impl Into<Select>) -> Self {
        Self {
            body: body.into(),
            order_by: None,
            limit: None,
        }
    }

    /// Append an ORDER BY entry, preserving input order.
    pub fn order_by(&mut self, expr: impl Into<Expr>, order: Direction) {
        let entry = OrderByExpr {
            expr: expr.into(),
            order,
        };

        match &mut self.order_by {
            Some(order_by) => order_by.exprs.push(entry),
            None => self.order_by = Some(entry.into()),
        }
    }

    pub fn set_limit(&mut self, limit: u64) {
        self.limit.get_or_insert_with(Limit::default).limit = Some(limit);
    }

    pub fn set_offset(&mut self, offset: u64) {
        self.limit.get_or_insert_with(Limit::default).offset = Some(offset);
    }
}
