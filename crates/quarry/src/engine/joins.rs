use super::{AliasMap, Planner};
use crate::filter::PathSegment;

use quarry_core::schema::{RelationInfo, RelationKind, Schema};
use quarry_core::stmt::{self, Expr, SourceTable, Type, Value};
use quarry_core::{Error, Result};

use tracing::debug;

/// Width of the textual bridge used when joining polymorphic relations:
/// primary keys may be numeric while the discriminator and foreign-key
/// storage are strings.
const A2O_KEY_WIDTH: u32 = 255;

impl Planner<'_> {
    /// Walk `path` one relational hop at a time, emitting a `LEFT JOIN` per
    /// hop into `select` and recording the chosen alias in `alias_map`.
    ///
    /// Stops quietly when a segment is a scalar column or unknown (the tail
    /// of a filter path is its comparison column). A one-to-many hop at the
    /// root of a top-level context also stops the walk: the filter compiler
    /// realizes that hop as a subquery instead.
    ///
    /// A path prefix that already has an alias reuses it, so sort and filter
    /// traversals of the same path share one join.
    pub(crate) fn add_join(
        &mut self,
        select: &mut stmt::Select,
        alias_map: &mut AliasMap,
        collection: &str,
        path: &[PathSegment],
        in_subquery: bool,
    ) -> Result<()> {
        let schema = self.schema;

        let mut parent_collection = collection.to_string();
        let mut parent_ref = select.from.reference().to_string();
        let mut key: Vec<String> = vec![];

        for (hop, segment) in path.iter().enumerate() {
            let Some(info) = schema.relation_info(&parent_collection, &segment.field) else {
                // Terminal comparison column, or a field the schema does not
                // know. Either way there is nothing left to join.
                break;
            };

            if info.kind.is_to_many() && hop == 0 && !in_subquery {
                // Realized as a subquery by the filter compiler
                return Ok(());
            }

            let target = match target_collection(&info, segment, &parent_collection)? {
                Some(target) => target,
                None => break,
            };

            key.push(segment.key());

            if let Some(alias) = alias_map.get(&key) {
                parent_ref = alias.to_string();
                parent_collection = target;
                continue;
            }

            let alias = self.aliases.allocate();

            let Some(on) = join_condition(
                schema,
                &info,
                &parent_collection,
                &parent_ref,
                &target,
                &alias,
            ) else {
                debug!(
                    field = %segment.field,
                    "relation target has no resolvable primary key; dropping join"
                );
                break;
            };

            debug!(field = %segment.field, %alias, "planned join");

            select.left_join(SourceTable::aliased(target.clone(), alias.clone()), on);
            alias_map.insert(key.clone(), alias.clone());

            parent_ref = alias;
            parent_collection = target;
        }

        Ok(())
    }
}

/// The collection a hop lands on, validating the polymorphic scope.
fn target_collection(
    info: &RelationInfo<'_>,
    segment: &PathSegment,
    parent_collection: &str,
) -> Result<Option<String>> {
    if info.kind == RelationKind::AnyToOne {
        let Some(scope) = segment.scope.as_deref() else {
            return Err(Error::invalid_query(format!(
                "field `{}` on `{parent_collection}` is polymorphic and requires a collection scope",
                segment.field,
            )));
        };

        if !info
            .relation
            .one_allowed_collections
            .iter()
            .any(|allowed| allowed == scope)
        {
            return Err(Error::invalid_query(format!(
                "`{scope}` is not an allowed collection for field `{}`",
                segment.field,
            )));
        }

        return Ok(Some(scope.to_string()));
    }

    Ok(info
        .target_collection(segment.scope.as_deref())
        .map(str::to_string))
}

/// The `ON` condition for one hop, per relation kind.
fn join_condition(
    schema: &Schema,
    info: &RelationInfo<'_>,
    parent_collection: &str,
    parent_ref: &str,
    target: &str,
    alias: &str,
) -> Option<Expr> {
    let relation = info.relation;

    match info.kind {
        RelationKind::ManyToOne => {
            let target_pk = schema.primary_key(target)?;

            Some(Expr::eq(
                Expr::column(parent_ref, relation.field.as_str()),
                Expr::column(alias, target_pk),
            ))
        }
        RelationKind::AnyToOne => {
            let target_pk = schema.primary_key(target)?;
            let discriminator = relation.one_collection_field.as_deref()?;

            Some(Expr::and(
                Expr::eq(
                    Expr::column(parent_ref, discriminator),
                    Value::from(target),
                ),
                Expr::eq(
                    Expr::column(parent_ref, relation.field.as_str()),
                    Expr::cast(Expr::column(alias, target_pk), Type::Char(A2O_KEY_WIDTH)),
                ),
            ))
        }
        RelationKind::OneToMany => {
            let parent_pk = schema.primary_key(parent_collection)?;

            Some(Expr::eq(
                Expr::column(alias, relation.field.as_str()),
                Expr::column(parent_ref, parent_pk),
            ))
        }
        RelationKind::OneToAny => {
            let parent_pk = schema.primary_key(parent_collection)?;
            let discriminator = relation.one_collection_field.as_deref()?;

            Some(Expr::and(
                Expr::eq(
                    Expr::column(alias, discriminator),
                    Value::from(parent_collection),
                ),
                Expr::eq(
                    Expr::column(alias, relation.field.as_str()),
                    Expr::cast(
                        Expr::column(parent_ref, parent_pk),
                        Type::Char(A2O_KEY_WIDTH),
                    ),
                ),
            ))
        }
    }
}
