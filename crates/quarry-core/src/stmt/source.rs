/// A table appearing in a `FROM` or `JOIN` clause, optionally aliased.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTable {
    pub table: String,
    pub alias: Option<String>,
}

impl SourceTable {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            alias: None,
        }
    }

    pub fn aliased(table: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            alias: Some(alias.into()),
        }
    }

    /// The identifier columns of this table are qualified with: the alias
    /// when one is set, the table name otherwise.
    pub fn reference(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.table)
    }
}

impl From<&str> for SourceTable {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SourceTable {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
