use super::Field;

use indexmap::IndexMap;
use serde::Deserialize;

/// A named table of rows.
#[derive(Debug, Clone, Deserialize)]
pub struct Collection {
    /// The collection name
    pub name: String,

    /// The primary-key field name
    pub primary_key: String,

    /// Scalar columns, keyed by field name
    #[serde(default)]
    pub fields: IndexMap<String, Field>,
}

impl Collection {
    pub fn new(name: impl Into<String>, primary_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary_key: primary_key.into(),
            fields: IndexMap::new(),
        }
    }

    pub fn add_field(&mut self, field: Field) {
        self.fields.insert(field.name.clone(), field);
    }

    /// Builder-style variant of [`add_field`](Self::add_field), used by test
    /// fixtures.
    pub fn with_field(mut self, field: Field) -> Self {
        self.add_field(field);
        self
    }
}
