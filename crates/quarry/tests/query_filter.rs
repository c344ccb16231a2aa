mod support;

use support::{compile_sql, schema};

use quarry::stmt::Value;
use quarry::Query;

use serde_json::json;

fn filter_query(filter: serde_json::Value) -> Query {
    Query {
        filter: Some(filter.into()),
        ..Query::default()
    }
}

#[test]
fn scalar_equality() {
    let schema = schema();
    let query = filter_query(json!({"status": {"_eq": "published"}}));

    let (sql, params) = compile_sql(&schema, "pages", &query);

    assert_eq!(
        sql,
        r#"SELECT * FROM "pages" WHERE "pages"."status" = ?;"#
    );
    assert_eq!(params, vec![Value::from("published")]);
}

#[test]
fn bare_scalar_is_equality_shorthand() {
    let schema = schema();
    let query = filter_query(json!({"status": "published"}));

    let (sql, params) = compile_sql(&schema, "pages", &query);

    assert_eq!(
        sql,
        r#"SELECT * FROM "pages" WHERE "pages"."status" = ?;"#
    );
    assert_eq!(params, vec![Value::from("published")]);
}

#[test]
fn in_list_with_or_short_circuit() {
    let schema = schema();

    // The empty object inside `_or` grants everything: the whole branch
    // vanishes, leaving only the `_in` predicate
    let query = filter_query(json!({
        "status": {"_in": ["a", "b"]},
        "_or": [{}, {"secret": {"_eq": true}}],
    }));

    let (sql, params) = compile_sql(&schema, "pages", &query);

    assert_eq!(
        sql,
        r#"SELECT * FROM "pages" WHERE "pages"."status" IN (?, ?);"#
    );
    assert_eq!(params, vec![Value::from("a"), Value::from("b")]);
}

#[test]
fn equality_against_null_is_is_null() {
    let schema = schema();
    let query = filter_query(json!({"status": {"_eq": null}}));

    let (sql, params) = compile_sql(&schema, "pages", &query);

    assert_eq!(sql, r#"SELECT * FROM "pages" WHERE "pages"."status" IS NULL;"#);
    assert!(params.is_empty());
}

#[test]
fn null_operator_honors_boolean_value() {
    let schema = schema();

    let query = filter_query(json!({"status": {"_null": true}}));
    let (sql, _) = compile_sql(&schema, "pages", &query);
    assert_eq!(sql, r#"SELECT * FROM "pages" WHERE "pages"."status" IS NULL;"#);

    let query = filter_query(json!({"status": {"_null": false}}));
    let (sql, _) = compile_sql(&schema, "pages", &query);
    assert_eq!(
        sql,
        r#"SELECT * FROM "pages" WHERE "pages"."status" IS NOT NULL;"#
    );
}

#[test]
fn multiple_keys_conjoin() {
    let schema = schema();
    let query = filter_query(json!({
        "status": {"_eq": "a"},
        "title": {"_contains": "x"},
    }));

    let (sql, params) = compile_sql(&schema, "pages", &query);

    assert_eq!(
        sql,
        r#"SELECT * FROM "pages" WHERE "pages"."status" = ? AND "pages"."title" LIKE ?;"#
    );
    assert_eq!(params, vec![Value::from("a"), Value::from("%x%")]);
}

#[test]
fn nested_connectives_group_with_parentheses() {
    let schema = schema();
    let query = filter_query(json!({
        "_or": [
            {"status": {"_eq": "a"}},
            {"_and": [
                {"status": {"_eq": "b"}},
                {"secret": {"_eq": false}},
            ]},
        ],
    }));

    let (sql, params) = compile_sql(&schema, "pages", &query);

    assert_eq!(
        sql,
        r#"SELECT * FROM "pages" WHERE "pages"."status" = ? OR ("pages"."status" = ? AND "pages"."secret" = FALSE);"#
    );
    assert_eq!(params, vec![Value::from("a"), Value::from("b")]);
}

#[test]
fn between_coerces_dates() {
    let schema = schema();
    let query = filter_query(json!({
        "published_on": {"_between": ["2023-01-01", "2023-02-01"]},
    }));

    let (sql, params) = compile_sql(&schema, "pages", &query);

    assert_eq!(
        sql,
        r#"SELECT * FROM "pages" WHERE "pages"."published_on" BETWEEN ? AND ?;"#
    );
    assert!(matches!(params[..], [Value::Date(_), Value::Date(_)]));
}

#[test]
fn numeric_strings_coerce() {
    let schema = schema();
    let query = filter_query(json!({"price": {"_gt": "10.5"}}));

    let (sql, params) = compile_sql(&schema, "pages", &query);

    assert_eq!(sql, r#"SELECT * FROM "pages" WHERE "pages"."price" > ?;"#);
    assert_eq!(params, vec![Value::F64(10.5)]);
}

#[test]
fn dangling_relational_path_is_dropped() {
    let schema = schema();
    let query = filter_query(json!({"missing_rel": {"name": {"_eq": "x"}}}));

    let (sql, params) = compile_sql(&schema, "pages", &query);

    assert_eq!(sql, r#"SELECT * FROM "pages";"#);
    assert!(params.is_empty());
}

#[test]
fn unknown_operator_is_an_error() {
    let schema = schema();
    let query = filter_query(json!({"status": {"_fuzzy": "x"}}));

    let err = quarry::compile(&schema, "pages", &query).unwrap_err();
    assert!(err.is_unknown_operator());
}

#[test]
fn uncoercible_value_is_an_error() {
    let schema = schema();
    let query = filter_query(json!({"published_on": {"_eq": "not a date"}}));

    let err = quarry::compile(&schema, "pages", &query).unwrap_err();
    assert!(err.is_invalid_query());
}

#[test]
fn empty_in_list_matches_nothing() {
    let schema = schema();
    let query = filter_query(json!({"status": {"_in": []}}));

    let (sql, params) = compile_sql(&schema, "pages", &query);

    assert_eq!(sql, r#"SELECT * FROM "pages" WHERE FALSE;"#);
    assert!(params.is_empty());
}

#[test]
fn query_descriptor_deserializes_from_json() {
    let schema = schema();

    let query: Query = serde_json::from_value(json!({
        "filter": {"status": {"_eq": "published"}},
        "sort": ["-created_at"],
        "limit": 10,
    }))
    .unwrap();

    let (sql, params) = compile_sql(&schema, "pages", &query);

    assert_eq!(
        sql,
        r#"SELECT * FROM "pages" WHERE "pages"."status" = ? ORDER BY "pages"."created_at" DESC LIMIT 10;"#
    );
    assert_eq!(params, vec![Value::from("published")]);
}

#[test]
fn identical_queries_compile_identically() {
    let schema = schema();
    let query = filter_query(json!({
        "author": {"name": {"_eq": "Rijk"}},
        "status": {"_in": ["a", "b"]},
    }));

    let first = compile_sql(&schema, "pages", &query);
    let second = compile_sql(&schema, "pages", &query);

    assert_eq!(first, second);
}
