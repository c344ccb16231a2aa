use serde::Deserialize;

/// A directed edge between two collections.
///
/// `collection` is always the "many" side holding the foreign key; `field`
/// names the foreign-key column. For polymorphic relations
/// `related_collection` is absent and `one_collection_field` names the
/// discriminator column storing the target collection's name.
#[derive(Debug, Clone, Deserialize)]
pub struct Relation {
    /// The collection holding the foreign key
    pub collection: String,

    /// The foreign-key column
    pub field: String,

    /// The "one" side; absent for polymorphic relations
    #[serde(default)]
    pub related_collection: Option<String>,

    /// Inverse field name on the one side
    #[serde(default)]
    pub one_field: Option<String>,

    /// Discriminator column on the many side, naming the target collection
    #[serde(default)]
    pub one_collection_field: Option<String>,

    /// Permitted target collections for polymorphic fields
    #[serde(default)]
    pub one_allowed_collections: Vec<String>,
}

impl Relation {
    pub fn new(collection: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            field: field.into(),
            related_collection: None,
            one_field: None,
            one_collection_field: None,
            one_allowed_collections: vec![],
        }
    }

    pub fn related_collection(mut self, collection: impl Into<String>) -> Self {
        self.related_collection = Some(collection.into());
        self
    }

    pub fn one_field(mut self, field: impl Into<String>) -> Self {
        self.one_field = Some(field.into());
        self
    }

    pub fn one_collection_field(mut self, field: impl Into<String>) -> Self {
        self.one_collection_field = Some(field.into());
        self
    }

    pub fn one_allowed_collections<I, S>(mut self, collections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.one_allowed_collections = collections.into_iter().map(Into::into).collect();
        self
    }
}

/// The kind of a relation, derived relative to a parent collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// The parent row references a single related row via a scalar foreign
    /// key stored on the parent.
    ManyToOne,

    /// The parent row is referenced by many child rows via a foreign key
    /// stored on the child.
    OneToMany,

    /// Polymorphic foreign key on the parent: a scalar id plus a
    /// discriminator column naming the target collection. Traversal requires
    /// an explicit scope.
    AnyToOne,

    /// Inverse of [`AnyToOne`](Self::AnyToOne): the parent row is referenced
    /// by many polymorphic children.
    OneToAny,
}

impl RelationKind {
    /// True when the relation spans multiple child rows, requiring
    /// existence-subquery semantics at the top level.
    pub fn is_to_many(self) -> bool {
        matches!(self, Self::OneToMany | Self::OneToAny)
    }
}

/// A resolved relation together with its derived kind.
#[derive(Debug, Clone, Copy)]
pub struct RelationInfo<'a> {
    pub relation: &'a Relation,
    pub kind: RelationKind,
}

impl RelationInfo<'_> {
    /// The collection a traversal of this relation lands on.
    ///
    /// `scope` is the `:scope` suffix from the path segment; it is required
    /// for [`RelationKind::AnyToOne`] and ignored otherwise.
    pub fn target_collection<'a>(&'a self, scope: Option<&'a str>) -> Option<&'a str> {
        match self.kind {
            RelationKind::ManyToOne => self.relation.related_collection.as_deref(),
            RelationKind::OneToMany | RelationKind::OneToAny => {
                Some(self.relation.collection.as_str())
            }
            RelationKind::AnyToOne => scope,
        }
    }
}
