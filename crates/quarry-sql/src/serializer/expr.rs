use super::{Comma, Delimited, Formatter, Ident, Params, ToSql};

use quarry_core::stmt::{self, Expr};

/// Wraps nested boolean groups in parentheses so connective precedence
/// survives serialization.
struct Grouped<'a>(&'a Expr);

impl ToSql for Grouped<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self.0 {
            Expr::And(_) | Expr::Or(_) => fmt!(f, "(", self.0, ")"),
            _ => self.0.to_sql(f),
        }
    }
}

impl ToSql for &Expr {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Expr::And(expr) => {
                fmt!(f, Delimited(expr.operands.iter().map(Grouped), " AND "));
            }
            Expr::Between(expr) => {
                let kw = if expr.negate {
                    " NOT BETWEEN "
                } else {
                    " BETWEEN "
                };
                fmt!(f, &*expr.expr, kw, &*expr.low, " AND ", &*expr.high);
            }
            Expr::BinaryOp(expr) => {
                fmt!(f, &*expr.lhs, " ", &expr.op, " ", &*expr.rhs);
            }
            Expr::Cast(expr) => {
                fmt!(f, "CAST(", &*expr.expr, " AS ", &expr.ty, ")");
            }
            Expr::Column(expr) => {
                fmt!(f, Ident(&expr.table), ".", Ident(&expr.name));
            }
            Expr::Exists(expr) => {
                let kw = if expr.negate { "NOT EXISTS (" } else { "EXISTS (" };
                fmt!(f, kw, &*expr.subquery, ")");
            }
            Expr::Func(expr) => expr.to_sql(f),
            Expr::InList(expr) => {
                let kw = if expr.negate { " NOT IN (" } else { " IN (" };
                fmt!(f, &*expr.expr, kw, Comma(&expr.list), ")");
            }
            Expr::InSubquery(expr) => {
                let kw = if expr.negate { " NOT IN (" } else { " IN (" };
                fmt!(f, &*expr.expr, kw, &*expr.query, ")");
            }
            Expr::IsNull(expr) => {
                let kw = if expr.negate { " IS NOT NULL" } else { " IS NULL" };
                fmt!(f, &*expr.expr, kw);
            }
            Expr::Like(expr) => {
                let kw = if expr.negate { " NOT LIKE " } else { " LIKE " };
                fmt!(f, &*expr.expr, kw, &*expr.pattern);
            }
            Expr::Or(expr) => {
                fmt!(f, Delimited(expr.operands.iter().map(Grouped), " OR "));
            }
            Expr::Value(expr) => expr.to_sql(f),
        }
    }
}

impl ToSql for &stmt::ExprFunc {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        use stmt::ExprFunc::*;

        match self {
            Avg(func) => {
                let kw = if func.distinct { "AVG(DISTINCT " } else { "AVG(" };
                fmt!(f, kw, &*func.arg, ")");
            }
            Count(func) => match &func.arg {
                None => fmt!(f, "COUNT(*)"),
                Some(arg) => {
                    let kw = if func.distinct {
                        "COUNT(DISTINCT "
                    } else {
                        "COUNT("
                    };
                    fmt!(f, kw, &**arg, ")");
                }
            },
            Lower(arg) => fmt!(f, "LOWER(", &**arg, ")"),
            Max(arg) => fmt!(f, "MAX(", &**arg, ")"),
            Min(arg) => fmt!(f, "MIN(", &**arg, ")"),
            Sum(func) => {
                let kw = if func.distinct { "SUM(DISTINCT " } else { "SUM(" };
                fmt!(f, kw, &*func.arg, ")");
            }
        }
    }
}

impl ToSql for &stmt::BinaryOp {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        f.dst.push_str(match self {
            stmt::BinaryOp::Eq => "=",
            stmt::BinaryOp::Ne => "!=",
            stmt::BinaryOp::Ge => ">=",
            stmt::BinaryOp::Gt => ">",
            stmt::BinaryOp::Le => "<=",
            stmt::BinaryOp::Lt => "<",
        })
    }
}

impl ToSql for &stmt::Type {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            stmt::Type::Char(size) => fmt!(f, "CHAR(", size, ")"),
        }
    }
}
