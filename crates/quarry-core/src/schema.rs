mod collection;
pub use collection::Collection;

mod field;
pub use field::{Field, FieldType};

mod relation;
pub use relation::{Relation, RelationInfo, RelationKind};

use indexmap::IndexMap;
use serde::Deserialize;

/// The relational schema a query is compiled against.
///
/// The schema is read-only input: it may be shared freely across concurrent
/// compilations.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Schema {
    /// Collections, keyed by name.
    pub collections: IndexMap<String, Collection>,

    /// Flat list of directed edges between collections.
    #[serde(default)]
    pub relations: Vec<Relation>,
}

impl Schema {
    /// Get a collection by name
    pub fn collection(&self, name: &str) -> Option<&Collection> {
        self.collections.get(name)
    }

    /// Get a field on a collection
    pub fn field(&self, collection: &str, field: &str) -> Option<&Field> {
        self.collection(collection)?.fields.get(field)
    }

    /// The primary key field name of a collection
    pub fn primary_key(&self, collection: &str) -> Option<&str> {
        Some(self.collection(collection)?.primary_key.as_str())
    }

    /// Resolve `field` on `parent` to a relation, deriving its kind.
    ///
    /// Scans the relation list twice: the forward orientation (the foreign
    /// key lives on `parent`) wins over the inverse orientation so that
    /// self-referential collections resolve deterministically. Returns `None`
    /// when the field is a scalar column or unknown.
    pub fn relation_info(&self, parent: &str, field: &str) -> Option<RelationInfo<'_>> {
        for relation in &self.relations {
            if relation.collection == parent && relation.field == field {
                let kind = if relation.related_collection.is_some() {
                    RelationKind::ManyToOne
                } else if relation.one_collection_field.is_some() {
                    RelationKind::AnyToOne
                } else {
                    continue;
                };

                return Some(RelationInfo { relation, kind });
            }
        }

        for relation in &self.relations {
            if relation.one_field.as_deref() != Some(field) {
                continue;
            }

            if relation.related_collection.as_deref() == Some(parent) {
                return Some(RelationInfo {
                    relation,
                    kind: RelationKind::OneToMany,
                });
            }

            if relation.one_collection_field.is_some()
                && relation
                    .one_allowed_collections
                    .iter()
                    .any(|allowed| allowed == parent)
            {
                return Some(RelationInfo {
                    relation,
                    kind: RelationKind::OneToAny,
                });
            }
        }

        None
    }
}
