use super::*;

/// A qualified column reference, `table.column`.
///
/// `table` is either a collection name or a join alias.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprColumn {
    pub table: String,
    pub name: String,
}

impl Expr {
    pub fn column(table: impl Into<String>, name: impl Into<String>) -> Expr {
        ExprColumn {
            table: table.into(),
            name: name.into(),
        }
        .into()
    }
}

impl From<ExprColumn> for Expr {
    fn from(value: ExprColumn) -> Self {
        Expr::Column(value)
    }
}

impl From<(&str, &str)> for ExprColumn {
    fn from(value: (&str, &str)) -> Self {
        ExprColumn {
            table: value.0.into(),
            name: value.1.into(),
        }
    }
}
