use super::{AliasMap, Planner};
use crate::filter::PathSegment;

use indexmap::IndexMap;
use quarry_core::stmt::{self, Expr, Returning, SelectColumn};
use quarry_core::{Error, Result};

use tracing::debug;

impl Planner<'_> {
    /// Emit GROUP BY entries. Dotted group keys join like sort keys;
    /// unresolvable entries are dropped silently.
    pub(crate) fn apply_group(
        &mut self,
        collection: &str,
        select: &mut stmt::Select,
        group: &[String],
        alias_map: &mut AliasMap,
        in_subquery: bool,
    ) -> Result<()> {
        for key in group {
            let path: Vec<PathSegment> = key.split('.').map(PathSegment::parse).collect();

            let Some((last, rest)) = path.split_last() else {
                continue;
            };

            if rest.is_empty() {
                let table = select.from.reference().to_string();
                select.group_by(Expr::column(table, last.field.as_str()));
                continue;
            }

            self.add_join(select, alias_map, collection, &path, in_subquery)?;

            let map_key: Vec<String> = rest.iter().map(PathSegment::key).collect();
            match alias_map.get(&map_key) {
                Some(alias) => {
                    let expr = Expr::column(alias, last.field.as_str());
                    select.group_by(expr);
                }
                None => debug!(key, "unresolved group path; dropping group key"),
            }
        }

        Ok(())
    }

    /// Replace the projection with aggregate columns.
    ///
    /// Aliases follow `<op>-><field>`; counting rows aliases plain `count`
    /// (or `countAll`).
    pub(crate) fn apply_aggregate(
        &self,
        select: &mut stmt::Select,
        aggregate: &IndexMap<String, Vec<String>>,
    ) -> Result<()> {
        let table = select.from.reference().to_string();
        let mut columns = vec![];

        for (op, fields) in aggregate {
            for field in fields {
                let column = || Expr::column(table.clone(), field.clone());

                let (expr, alias) = match op.as_str() {
                    "count" if field == "*" => (Expr::count_star(), "count".to_string()),
                    "count" => (Expr::count(column(), false), format!("count->{field}")),
                    "countDistinct" => {
                        (Expr::count(column(), true), format!("countDistinct->{field}"))
                    }
                    "countAll" => (Expr::count_star(), "countAll".to_string()),
                    "sum" => (Expr::sum(column(), false), format!("sum->{field}")),
                    "sumDistinct" => (Expr::sum(column(), true), format!("sumDistinct->{field}")),
                    "avg" => (Expr::avg(column(), false), format!("avg->{field}")),
                    "avgDistinct" => (Expr::avg(column(), true), format!("avgDistinct->{field}")),
                    "min" => (Expr::min(column()), format!("min->{field}")),
                    "max" => (Expr::max(column()), format!("max->{field}")),
                    _ => {
                        return Err(Error::invalid_query(format!(
                            "unknown aggregate operation `{op}`"
                        )))
                    }
                };

                columns.push(SelectColumn::aliased(expr, alias));
            }
        }

        if !columns.is_empty() {
            select.returning = Returning::Columns(columns);
        }

        Ok(())
    }
}
