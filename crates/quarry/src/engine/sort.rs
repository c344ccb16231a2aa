use super::{AliasMap, Planner};
use crate::filter::PathSegment;

use quarry_core::stmt::{self, Direction, Expr};
use quarry_core::Result;

use tracing::debug;

impl Planner<'_> {
    /// Emit ORDER BY entries in input order. Relational sort keys go
    /// through the join planner; keys that fail to resolve are dropped
    /// silently.
    pub(crate) fn apply_sort(
        &mut self,
        collection: &str,
        stmt: &mut stmt::Query,
        sort: &[String],
        alias_map: &mut AliasMap,
        in_subquery: bool,
    ) -> Result<()> {
        for key in sort {
            let (key, direction) = match key.strip_prefix('-') {
                Some(rest) => (rest, Direction::Desc),
                None => (key.as_str(), Direction::Asc),
            };

            let path: Vec<PathSegment> = key.split('.').map(PathSegment::parse).collect();

            let Some((last, rest)) = path.split_last() else {
                continue;
            };

            if rest.is_empty() {
                let table = stmt.body.from.reference().to_string();
                stmt.order_by(Expr::column(table, last.field.as_str()), direction);
                continue;
            }

            self.add_join(&mut stmt.body, alias_map, collection, &path, in_subquery)?;

            let map_key: Vec<String> = rest.iter().map(PathSegment::key).collect();
            match alias_map.get(&map_key) {
                Some(alias) => {
                    let expr = Expr::column(alias, last.field.as_str());
                    stmt.order_by(expr, direction);
                }
                None => debug!(key, "unresolved sort path; dropping sort key"),
            }
        }

        Ok(())
    }
}
