mod aggregate;
mod alias;
mod coerce;
mod filter;
mod joins;
pub(crate) mod operators;
mod search;
mod sort;

pub(crate) use alias::{AliasAllocator, AliasMap};

use crate::query::Query;
use crate::{Result, Schema};

use quarry_core::stmt;

/// Maximum nesting depth accepted for client-supplied filter trees.
///
/// Compilation recurses along the filter tree; the cap keeps hostile input
/// from exhausting the stack.
pub const MAX_FILTER_DEPTH: usize = 10;

/// Compile `query` into a fresh SELECT statement over `collection`.
pub fn compile(schema: &Schema, collection: &str, query: &Query) -> Result<stmt::Query> {
    let mut stmt = stmt::Query::new(stmt::Select::new(collection));
    apply_query(schema, collection, &mut stmt, query, false)?;
    Ok(stmt)
}

/// Decorate `stmt` with every clause `query` describes.
///
/// Clauses apply in a fixed order: sort, limit, offset, page, search, group,
/// aggregate, filter. Filter runs last so that subquery builders see a
/// statement already carrying its pagination-free context; the resulting SQL
/// semantics are order-independent.
///
/// `sub_query` marks compilation into a correlated subquery: one-to-many
/// hops are then inlined as joins instead of spawning further subqueries.
pub fn apply_query(
    schema: &Schema,
    collection: &str,
    stmt: &mut stmt::Query,
    query: &Query,
    sub_query: bool,
) -> Result<()> {
    Planner::new(schema).apply(collection, stmt, query, sub_query)
}

pub(crate) struct Planner<'a> {
    schema: &'a Schema,
    aliases: AliasAllocator,
}

impl<'a> Planner<'a> {
    pub(crate) fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            aliases: AliasAllocator::new(schema),
        }
    }

    fn apply(
        &mut self,
        collection: &str,
        stmt: &mut stmt::Query,
        query: &Query,
        sub_query: bool,
    ) -> Result<()> {
        tracing::debug!(collection, "compiling query");

        // Sort and filter compilation share one alias map so that identical
        // relational paths reuse a single join.
        let mut alias_map = AliasMap::default();

        if let Some(sort) = &query.sort {
            self.apply_sort(collection, stmt, sort, &mut alias_map, sub_query)?;
        }

        match query.limit {
            // -1 asks for no limit at all
            Some(limit) if limit >= 0 => stmt.set_limit(limit as u64),
            _ => {}
        }

        match query.offset {
            Some(offset) if offset >= 0 => stmt.set_offset(offset as u64),
            _ => {}
        }

        if let (Some(page), Some(limit)) = (query.page, query.limit) {
            if page >= 1 && limit >= 0 {
                // page wins over any explicitly provided offset
                stmt.set_offset((limit * (page - 1)) as u64);
            }
        }

        if let Some(search) = &query.search {
            self.apply_search(collection, &mut stmt.body, search);
        }

        if let Some(group) = &query.group {
            self.apply_group(collection, &mut stmt.body, group, &mut alias_map, sub_query)?;
        }

        if let Some(aggregate) = &query.aggregate {
            self.apply_aggregate(&mut stmt.body, aggregate)?;
        }

        if let Some(filter) = &query.filter {
            self.apply_filter(collection, &mut stmt.body, filter, &mut alias_map, sub_query)?;
        }

        Ok(())
    }
}
