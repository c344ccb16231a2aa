use super::{Comma, Formatter, Ident, Params, ToSql};

use quarry_core::stmt;

impl ToSql for &stmt::Query {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, &self.body, self.order_by.as_ref(), self.limit.as_ref());
    }
}

impl ToSql for &stmt::Select {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "SELECT ", &self.returning, " FROM ", &self.from);

        for join in &self.joins {
            match &join.constraint {
                stmt::JoinOp::Left(on) => {
                    fmt!(f, " LEFT JOIN ", &join.table, " ON ", on);
                }
            }
        }

        if let Some(filter) = &self.filter {
            fmt!(f, " WHERE ", filter);
        }

        if !self.group_by.is_empty() {
            fmt!(f, " GROUP BY ", Comma(&self.group_by));
        }
    }
}

impl ToSql for &stmt::SourceTable {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, Ident(&self.table));

        if let Some(alias) = &self.alias {
            fmt!(f, " AS ", Ident(alias));
        }
    }
}

impl ToSql for &stmt::Returning {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            stmt::Returning::Star => fmt!(f, "*"),
            stmt::Returning::Columns(columns) => fmt!(f, Comma(columns)),
        }
    }
}

impl ToSql for &stmt::SelectColumn {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let alias = self.alias.as_ref().map(|alias| (" AS ", Ident(alias)));
        fmt!(f, &self.expr, alias);
    }
}

impl ToSql for &stmt::OrderBy {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, " ORDER BY ", Comma(&self.exprs));
    }
}

impl ToSql for &stmt::OrderByExpr {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, &self.expr, " ", &self.order);
    }
}

impl ToSql for &stmt::Direction {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            stmt::Direction::Asc => fmt!(f, "ASC"),
            stmt::Direction::Desc => fmt!(f, "DESC"),
        }
    }
}

impl ToSql for &stmt::Limit {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if let Some(limit) = self.limit {
            fmt!(f, " LIMIT ", limit);
        }

        if let Some(offset) = self.offset {
            fmt!(f, " OFFSET ", offset);
        }
    }
}
