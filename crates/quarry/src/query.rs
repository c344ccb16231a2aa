use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value as Json;

/// A declarative query descriptor.
///
/// Every member is optional; the compiler applies the ones that are present
/// in a fixed order (sort, limit, offset, page, search, group, aggregate,
/// filter).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Query {
    /// Filter tree
    pub filter: Option<Filter>,

    /// Sort keys: dotted paths, `-`-prefixed for descending
    pub sort: Option<Vec<String>>,

    /// Maximum row count; `-1` means "no limit"
    pub limit: Option<i64>,

    /// Rows to skip
    pub offset: Option<i64>,

    /// 1-based page number; with `limit`, overrides `offset`
    pub page: Option<i64>,

    /// Free-text search across the root collection's scalar fields
    pub search: Option<String>,

    /// GROUP BY keys: dotted paths
    pub group: Option<Vec<String>>,

    /// Aggregate operations, keyed by operation name (`count`, `sum`, ...)
    pub aggregate: Option<IndexMap<String, Vec<String>>>,
}

/// A filter tree in its JSON wire shape.
///
/// Nodes are `{_and: [..]}` / `{_or: [..]}` connectives, `{field: {_op:
/// value}}` predicates, or `{field: Filter}` relational traversals. A
/// polymorphic field key may carry a `:scope` suffix selecting the target
/// collection.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct Filter(pub Json);

impl From<Json> for Filter {
    fn from(value: Json) -> Self {
        Self(value)
    }
}
