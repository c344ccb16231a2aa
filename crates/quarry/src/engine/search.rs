use super::Planner;

use quarry_core::schema::FieldType;
use quarry_core::stmt::{self, Expr, Value};

impl Planner<'_> {
    /// Free-text search across every scalar field of the root collection.
    ///
    /// String fields match case-insensitively as substrings; numeric fields
    /// match when the query parses as a number; uuid fields when it parses
    /// as a UUID. All disjuncts land in one grouped conjunct on the outer
    /// WHERE.
    pub(crate) fn apply_search(&self, collection: &str, select: &mut stmt::Select, search: &str) {
        let Some(target) = self.schema.collection(collection) else {
            return;
        };

        let table = select.from.reference().to_string();
        let uuid = uuid::Uuid::parse_str(search).ok();

        let mut disjuncts = vec![];

        for field in target.fields.values() {
            let column = Expr::column(table.clone(), field.name.clone());

            match field.ty {
                FieldType::String | FieldType::Text => {
                    let pattern = format!("%{}%", search.to_lowercase());
                    disjuncts.push(Expr::like(Expr::lower(column), Value::from(pattern)));
                }
                FieldType::Integer | FieldType::BigInteger => {
                    if let Ok(number) = search.parse::<i64>() {
                        disjuncts.push(Expr::eq(column, Value::I64(number)));
                    }
                }
                FieldType::Float | FieldType::Decimal => {
                    if let Ok(number) = search.parse::<f64>() {
                        disjuncts.push(Expr::eq(column, Value::F64(number)));
                    }
                }
                FieldType::Uuid => {
                    if let Some(uuid) = uuid {
                        disjuncts.push(Expr::eq(column, Value::Uuid(uuid)));
                    }
                }
                _ => {}
            }
        }

        if !disjuncts.is_empty() {
            select.and_where(Expr::or_from_vec(disjuncts));
        }
    }
}
