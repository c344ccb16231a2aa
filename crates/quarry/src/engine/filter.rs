use super::{coerce, operators, AliasMap, Planner};
use crate::filter::{FilterNode, PathSegment};
use crate::query::Filter;

use quarry_core::schema::{FieldType, RelationInfo, RelationKind};
use quarry_core::stmt::{self, Expr, Returning, SelectColumn, Type, Value};
use quarry_core::{Error, Result};

use serde_json::Value as Json;
use tracing::debug;

/// Width of the textual bridge aligning polymorphic keys, mirroring the
/// join planner's cast.
const A2O_KEY_WIDTH: u32 = 255;

impl Planner<'_> {
    /// Compile a filter tree into `select`.
    ///
    /// Two passes share `alias_map`: the first plans every join the tree
    /// needs, the second emits predicates. Relational paths that fail to
    /// resolve drop their predicate silently.
    pub(crate) fn apply_filter(
        &mut self,
        collection: &str,
        select: &mut stmt::Select,
        filter: &Filter,
        alias_map: &mut AliasMap,
        in_subquery: bool,
    ) -> Result<()> {
        let Some(node) = FilterNode::parse(filter)? else {
            return Ok(());
        };

        self.collect_joins(collection, select, &node, alias_map, &mut vec![], in_subquery)?;

        let table_ref = select.from.reference().to_string();
        if let Some(expr) =
            self.compile_node(collection, &table_ref, &node, alias_map, &mut vec![], in_subquery)?
        {
            select.and_where(expr);
        }

        Ok(())
    }

    /// Pass 1: walk every branch and plan joins for multi-segment paths.
    fn collect_joins(
        &mut self,
        collection: &str,
        select: &mut stmt::Select,
        node: &FilterNode,
        alias_map: &mut AliasMap,
        prefix: &mut Vec<PathSegment>,
        in_subquery: bool,
    ) -> Result<()> {
        match node {
            FilterNode::And(arms) | FilterNode::Or(arms) => {
                for arm in arms {
                    self.collect_joins(collection, select, arm, alias_map, prefix, in_subquery)?;
                }
            }
            FilterNode::Field { segment, child } => {
                if !in_subquery {
                    let schema = self.schema;

                    let to_many = self
                        .resolve_path_collection(collection, prefix)
                        .as_deref()
                        .and_then(|current| schema.relation_info(current, &segment.field))
                        .is_some_and(|info| info.kind.is_to_many());

                    if to_many {
                        // Subquery boundary: join the chain leading up to
                        // it; the nested filter plans joins in its own scope
                        if !prefix.is_empty() {
                            self.add_join(select, alias_map, collection, prefix, in_subquery)?;
                        }
                        return Ok(());
                    }
                }

                prefix.push(segment.clone());
                self.collect_joins(collection, select, child, alias_map, prefix, in_subquery)?;
                prefix.pop();
            }
            FilterNode::Op { .. } => {
                if prefix.len() > 1 {
                    self.add_join(select, alias_map, collection, prefix, in_subquery)?;
                }
            }
        }

        Ok(())
    }

    /// Pass 2: emit the predicate expression for a node.
    fn compile_node(
        &mut self,
        collection: &str,
        table_ref: &str,
        node: &FilterNode,
        alias_map: &AliasMap,
        prefix: &mut Vec<PathSegment>,
        in_subquery: bool,
    ) -> Result<Option<Expr>> {
        match node {
            FilterNode::And(arms) => {
                let mut operands = vec![];

                for arm in arms {
                    if let Some(expr) =
                        self.compile_node(collection, table_ref, arm, alias_map, prefix, in_subquery)?
                    {
                        operands.push(expr);
                    }
                }

                Ok((!operands.is_empty()).then(|| Expr::and_from_vec(operands)))
            }
            FilterNode::Or(arms) => {
                let mut operands = vec![];

                for arm in arms {
                    if let Some(expr) =
                        self.compile_node(collection, table_ref, arm, alias_map, prefix, in_subquery)?
                    {
                        operands.push(expr);
                    }
                }

                Ok((!operands.is_empty()).then(|| Expr::or_from_vec(operands)))
            }
            FilterNode::Field { segment, child } => {
                if !in_subquery {
                    let schema = self.schema;

                    if let Some(current) = self.resolve_path_collection(collection, prefix) {
                        if let Some(info) = schema.relation_info(&current, &segment.field) {
                            if info.kind.is_to_many() {
                                // Spans multiple child rows: realized as an
                                // existence subquery to avoid multiplying
                                // rows at the top level. The parent is the
                                // builder root or the joined chain's alias.
                                let parent_ref = if prefix.is_empty() {
                                    Some(table_ref.to_string())
                                } else {
                                    let key: Vec<String> =
                                        prefix.iter().map(PathSegment::key).collect();
                                    alias_map.get(&key).map(str::to_string)
                                };

                                let Some(parent_ref) = parent_ref else {
                                    debug!(
                                        field = %segment.field,
                                        "unresolved relation chain; dropping predicate"
                                    );
                                    return Ok(None);
                                };

                                return self.compile_to_many(&current, &parent_ref, &info, child);
                            }
                        }
                    }
                }

                prefix.push(segment.clone());
                let ret =
                    self.compile_node(collection, table_ref, child, alias_map, prefix, in_subquery);
                prefix.pop();
                ret
            }
            FilterNode::Op { op, value } => {
                self.compile_leaf(collection, table_ref, prefix, op, value, alias_map)
            }
        }
    }

    /// Existence-subquery dispatch for a to-many hop.
    ///
    /// `collection` is the hop's parent collection and `table_ref` the SQL
    /// qualifier of the parent row: the builder root, or the alias of the
    /// joined chain the hop was reached through.
    fn compile_to_many(
        &mut self,
        collection: &str,
        table_ref: &str,
        info: &RelationInfo<'_>,
        child: &FilterNode,
    ) -> Result<Option<Expr>> {
        let schema = self.schema;
        let relation = info.relation;

        let Some(parent_pk) = schema.primary_key(collection) else {
            debug!(collection, "unknown parent collection; dropping predicate");
            return Ok(None);
        };

        let mut parent_key = Expr::column(table_ref, parent_pk);
        if info.kind == RelationKind::OneToAny {
            parent_key = Expr::cast(parent_key, Type::Char(A2O_KEY_WIDTH));
        }

        match child {
            FilterNode::Op { op, value } if op == "_none" => {
                let subquery = self.projection_subquery(info, collection, value)?;
                Ok(Some(Expr::not_in_subquery(parent_key, subquery)))
            }
            FilterNode::Op { op, value } if op == "_some" => {
                let subquery = self.projection_subquery(info, collection, value)?;
                Ok(Some(Expr::in_subquery(parent_key, subquery)))
            }
            _ if child.leaf_operator().is_some_and(operators::is_negative) => {
                // De Morgan through a single NOT EXISTS: the nested leaf
                // operators flip instead of negating the outer clause
                let mut nested = anchor_nested(child, relation);
                nested.invert();

                let subquery = self.correlated_subquery(info, collection, table_ref, &nested)?;
                Ok(Some(Expr::not_exists(subquery)))
            }
            _ => {
                let nested = anchor_nested(child, relation);
                let subquery = self.correlated_subquery(info, collection, table_ref, &nested)?;
                Ok(Some(Expr::exists(subquery)))
            }
        }
    }

    /// `SELECT child.fk FROM child WHERE child.fk = parent.pk`, with the
    /// nested filter compiled into it. Wrapped in EXISTS / NOT EXISTS by the
    /// caller.
    fn correlated_subquery(
        &mut self,
        info: &RelationInfo<'_>,
        parent_collection: &str,
        parent_ref: &str,
        nested: &FilterNode,
    ) -> Result<stmt::Query> {
        let schema = self.schema;
        let relation = info.relation;
        let child_collection = relation.collection.clone();

        let Some(parent_pk) = schema.primary_key(parent_collection) else {
            return Err(Error::invalid_query(format!(
                "collection `{parent_collection}` has no primary key"
            )));
        };

        let mut select = stmt::Select::new(child_collection.as_str());
        select.returning = Returning::Columns(vec![SelectColumn::new(Expr::column(
            child_collection.as_str(),
            relation.field.as_str(),
        ))]);

        match info.kind {
            RelationKind::OneToMany => {
                select.and_where(Expr::eq(
                    Expr::column(child_collection.as_str(), relation.field.as_str()),
                    Expr::column(parent_ref, parent_pk),
                ));
            }
            RelationKind::OneToAny => {
                let Some(discriminator) = relation.one_collection_field.as_deref() else {
                    return Err(Error::invalid_query(format!(
                        "relation `{}.{}` is missing its discriminator column",
                        relation.collection, relation.field,
                    )));
                };

                select.and_where(Expr::eq(
                    Expr::column(child_collection.as_str(), discriminator),
                    Value::from(parent_collection),
                ));
                select.and_where(Expr::eq(
                    Expr::column(child_collection.as_str(), relation.field.as_str()),
                    Expr::cast(
                        Expr::column(parent_ref, parent_pk),
                        Type::Char(A2O_KEY_WIDTH),
                    ),
                ));
            }
            RelationKind::ManyToOne | RelationKind::AnyToOne => {
                return Err(Error::invalid_query(
                    "single-row relations do not use existence subqueries",
                ));
            }
        }

        let mut sub_alias_map = AliasMap::default();
        self.collect_joins(
            &child_collection,
            &mut select,
            nested,
            &mut sub_alias_map,
            &mut vec![],
            true,
        )?;

        let table_ref = select.from.reference().to_string();
        if let Some(expr) = self.compile_node(
            &child_collection,
            &table_ref,
            nested,
            &sub_alias_map,
            &mut vec![],
            true,
        )? {
            select.and_where(expr);
        }

        Ok(stmt::Query::new(select))
    }

    /// `SELECT child.fk FROM child WHERE child.fk IS NOT NULL`, with the
    /// nested filter applied. The caller compares the parent primary key
    /// with IN / NOT IN.
    fn projection_subquery(
        &mut self,
        info: &RelationInfo<'_>,
        parent_collection: &str,
        nested: &Json,
    ) -> Result<stmt::Query> {
        let relation = info.relation;
        let child_collection = relation.collection.clone();

        let mut select = stmt::Select::new(child_collection.as_str());
        select.returning = Returning::Columns(vec![SelectColumn::new(Expr::column(
            child_collection.as_str(),
            relation.field.as_str(),
        ))]);

        select.and_where(Expr::is_not_null(Expr::column(
            child_collection.as_str(),
            relation.field.as_str(),
        )));

        if info.kind == RelationKind::OneToAny {
            let Some(discriminator) = relation.one_collection_field.as_deref() else {
                return Err(Error::invalid_query(format!(
                    "relation `{}.{}` is missing its discriminator column",
                    relation.collection, relation.field,
                )));
            };

            // Keys from other allowed collections must not leak through
            select.and_where(Expr::eq(
                Expr::column(child_collection.as_str(), discriminator),
                Value::from(parent_collection),
            ));
        }

        let filter = Filter::from(nested.clone());
        let mut sub_alias_map = AliasMap::default();
        self.apply_filter(
            &child_collection,
            &mut select,
            &filter,
            &mut sub_alias_map,
            true,
        )?;

        Ok(stmt::Query::new(select))
    }

    /// Inline predicate emission.
    fn compile_leaf(
        &mut self,
        collection: &str,
        table_ref: &str,
        path: &[PathSegment],
        op: &str,
        value: &Json,
        alias_map: &AliasMap,
    ) -> Result<Option<Expr>> {
        let Some((last, rest)) = path.split_last() else {
            debug!(op, "operator without a field; dropping predicate");
            return Ok(None);
        };

        let column = if rest.is_empty() {
            Expr::column(table_ref, last.field.as_str())
        } else {
            let key: Vec<String> = rest.iter().map(PathSegment::key).collect();

            match alias_map.get(&key) {
                Some(alias) => Expr::column(alias, last.field.as_str()),
                None => {
                    debug!(field = %last.field, "unresolved filter path; dropping predicate");
                    return Ok(None);
                }
            }
        };

        let ty = self.resolve_field_type(collection, path);
        let value = coerce::coerce(value, ty)?;

        let Some(operator) = operators::get(op) else {
            return Err(Error::unknown_operator(op));
        };

        Ok(Some(operator.apply(column, value)?))
    }

    /// The collection reached after walking `path` from `collection`.
    fn resolve_path_collection(&self, collection: &str, path: &[PathSegment]) -> Option<String> {
        let schema = self.schema;
        let mut current = collection.to_string();

        for segment in path {
            let info = schema.relation_info(&current, &segment.field)?;
            current = info.target_collection(segment.scope.as_deref())?.to_string();
        }

        Some(current)
    }

    /// The declared type of the field a path lands on, for value coercion.
    fn resolve_field_type(&self, collection: &str, path: &[PathSegment]) -> Option<FieldType> {
        let (last, rest) = path.split_last()?;
        let current = self.resolve_path_collection(collection, rest)?;

        self.schema.field(&current, &last.field).map(|field| field.ty)
    }
}

/// A relation-level operator (e.g. `{articles: {_null: true}}`) applies to
/// the child's foreign-key column inside the subquery.
fn anchor_nested(child: &FilterNode, relation: &quarry_core::schema::Relation) -> FilterNode {
    match child {
        FilterNode::Op { .. } => FilterNode::Field {
            segment: PathSegment {
                field: relation.field.clone(),
                scope: None,
            },
            child: Box::new(child.clone()),
        },
        other => other.clone(),
    }
}
