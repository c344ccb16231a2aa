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
fn many_to_one_inlines_a_join() {
    let schema = schema();
    let query = filter_query(json!({"author": {"name": {"_eq": "Rijk"}}}));

    let (sql, params) = compile_sql(&schema, "pages", &query);

    assert_eq!(
        sql,
        r#"SELECT * FROM "pages" LEFT JOIN "authors" AS "aaaaa" ON "pages"."author" = "aaaaa"."id" WHERE "aaaaa"."name" = ?;"#
    );
    assert_eq!(params, vec![Value::from("Rijk")]);
}

#[test]
fn one_to_many_becomes_an_existence_subquery() {
    let schema = schema();
    let query = filter_query(json!({
        "articles": {"author": {"name": {"_eq": "Rijk"}}},
    }));

    let (sql, params) = compile_sql(&schema, "pages", &query);

    assert_eq!(
        sql,
        r#"SELECT * FROM "pages" WHERE EXISTS (SELECT "articles"."page_id" FROM "articles" LEFT JOIN "authors" AS "aaaaa" ON "articles"."author" = "aaaaa"."id" WHERE "articles"."page_id" = "pages"."id" AND "aaaaa"."name" = ?);"#
    );
    assert_eq!(params, vec![Value::from("Rijk")]);
}

#[test]
fn none_operator_emits_not_in_projection() {
    let schema = schema();
    let query = filter_query(json!({
        "articles": {"_none": {"published": {"_eq": true}}},
    }));

    let (sql, params) = compile_sql(&schema, "pages", &query);

    assert_eq!(
        sql,
        r#"SELECT * FROM "pages" WHERE "pages"."id" NOT IN (SELECT "articles"."page_id" FROM "articles" WHERE "articles"."page_id" IS NOT NULL AND "articles"."published" = TRUE);"#
    );
    assert!(params.is_empty());
}

#[test]
fn some_operator_emits_in_projection() {
    let schema = schema();
    let query = filter_query(json!({
        "articles": {"_some": {"published": {"_eq": true}}},
    }));

    let (sql, _) = compile_sql(&schema, "pages", &query);

    assert_eq!(
        sql,
        r#"SELECT * FROM "pages" WHERE "pages"."id" IN (SELECT "articles"."page_id" FROM "articles" WHERE "articles"."page_id" IS NOT NULL AND "articles"."published" = TRUE);"#
    );
}

#[test]
fn negated_operator_inverts_inside_not_exists() {
    let schema = schema();
    let query = filter_query(json!({
        "articles": {"title": {"_neq": "Draft"}},
    }));

    let (sql, params) = compile_sql(&schema, "pages", &query);

    // The nested `_neq` flips to `_eq` under a single NOT EXISTS wrapper
    assert_eq!(
        sql,
        r#"SELECT * FROM "pages" WHERE NOT EXISTS (SELECT "articles"."page_id" FROM "articles" WHERE "articles"."page_id" = "pages"."id" AND "articles"."title" = ?);"#
    );
    assert_eq!(params, vec![Value::from("Draft")]);
}

#[test]
fn nested_to_many_after_many_to_one_dispatches_a_subquery() {
    let schema = schema();
    let query = filter_query(json!({
        "author": {"articles": {"published": {"_eq": true}}},
    }));

    let (sql, params) = compile_sql(&schema, "pages", &query);

    // The o2m hop is re-dispatched against `authors`, the collection the
    // m2o hop landed on; the subquery correlates against the join alias
    assert_eq!(
        sql,
        r#"SELECT * FROM "pages" LEFT JOIN "authors" AS "aaaaa" ON "pages"."author" = "aaaaa"."id" WHERE EXISTS (SELECT "articles"."author" FROM "articles" WHERE "articles"."author" = "aaaaa"."id" AND "articles"."published" = TRUE);"#
    );
    assert!(params.is_empty());
}

#[test]
fn nested_none_after_many_to_one() {
    let schema = schema();
    let query = filter_query(json!({
        "author": {"articles": {"_none": {"published": {"_eq": true}}}},
    }));

    let (sql, params) = compile_sql(&schema, "pages", &query);

    assert_eq!(
        sql,
        r#"SELECT * FROM "pages" LEFT JOIN "authors" AS "aaaaa" ON "pages"."author" = "aaaaa"."id" WHERE "aaaaa"."id" NOT IN (SELECT "articles"."author" FROM "articles" WHERE "articles"."author" IS NOT NULL AND "articles"."published" = TRUE);"#
    );
    assert!(params.is_empty());
}

#[test]
fn nested_negated_operator_after_many_to_one() {
    let schema = schema();
    let query = filter_query(json!({
        "author": {"articles": {"title": {"_neq": "Draft"}}},
    }));

    let (sql, params) = compile_sql(&schema, "pages", &query);

    assert_eq!(
        sql,
        r#"SELECT * FROM "pages" LEFT JOIN "authors" AS "aaaaa" ON "pages"."author" = "aaaaa"."id" WHERE NOT EXISTS (SELECT "articles"."author" FROM "articles" WHERE "articles"."author" = "aaaaa"."id" AND "articles"."title" = ?);"#
    );
    assert_eq!(params, vec![Value::from("Draft")]);
}

#[test]
fn relational_predicates_inside_or_groups() {
    let schema = schema();
    let query = filter_query(json!({
        "_or": [
            {"secret": {"_eq": true}},
            {"articles": {"published": {"_eq": true}}},
        ],
    }));

    let (sql, params) = compile_sql(&schema, "pages", &query);

    assert_eq!(
        sql,
        r#"SELECT * FROM "pages" WHERE "pages"."secret" = TRUE OR EXISTS (SELECT "articles"."page_id" FROM "articles" WHERE "articles"."page_id" = "pages"."id" AND "articles"."published" = TRUE);"#
    );
    assert!(params.is_empty());
}

#[test]
fn scoped_polymorphic_join_casts_the_key() {
    let schema = schema();
    let query = filter_query(json!({
        "item:headings": {"title": {"_eq": "Intro"}},
    }));

    let (sql, params) = compile_sql(&schema, "blocks", &query);

    assert_eq!(
        sql,
        r#"SELECT * FROM "blocks" LEFT JOIN "headings" AS "aaaaa" ON "blocks"."collection" = ? AND "blocks"."item" = CAST("aaaaa"."id" AS CHAR(255)) WHERE "aaaaa"."title" = ?;"#
    );
    assert_eq!(params, vec![Value::from("headings"), Value::from("Intro")]);
}

#[test]
fn polymorphic_traversal_without_scope_fails() {
    let schema = schema();
    let query = filter_query(json!({"item": {"title": {"_eq": "Intro"}}}));

    let err = quarry::compile(&schema, "blocks", &query).unwrap_err();
    assert!(err.is_invalid_query());
}

#[test]
fn polymorphic_scope_outside_allowed_set_fails() {
    let schema = schema();
    let query = filter_query(json!({"item:pages": {"title": {"_eq": "Intro"}}}));

    let err = quarry::compile(&schema, "blocks", &query).unwrap_err();
    assert!(err.is_invalid_query());
}

#[test]
fn one_to_any_correlates_through_the_discriminator() {
    let schema = schema();
    let query = filter_query(json!({"block": {"visible": {"_eq": true}}}));

    let (sql, params) = compile_sql(&schema, "headings", &query);

    assert_eq!(
        sql,
        r#"SELECT * FROM "headings" WHERE EXISTS (SELECT "blocks"."item" FROM "blocks" WHERE "blocks"."collection" = ? AND "blocks"."item" = CAST("headings"."id" AS CHAR(255)) AND "blocks"."visible" = TRUE);"#
    );
    assert_eq!(params, vec![Value::from("headings")]);
}

#[test]
fn one_to_any_none_casts_the_parent_key() {
    let schema = schema();
    let query = filter_query(json!({"block": {"_none": {"visible": {"_eq": true}}}}));

    let (sql, params) = compile_sql(&schema, "headings", &query);

    assert_eq!(
        sql,
        r#"SELECT * FROM "headings" WHERE CAST("headings"."id" AS CHAR(255)) NOT IN (SELECT "blocks"."item" FROM "blocks" WHERE "blocks"."item" IS NOT NULL AND "blocks"."collection" = ? AND "blocks"."visible" = TRUE);"#
    );
    assert_eq!(params, vec![Value::from("headings")]);
}

#[test]
fn self_referential_relations_alias_every_hop() {
    let schema = schema();
    let query = filter_query(json!({"parent": {"name": {"_eq": "Root"}}}));

    let (sql, params) = compile_sql(&schema, "categories", &query);

    assert_eq!(
        sql,
        r#"SELECT * FROM "categories" LEFT JOIN "categories" AS "aaaaa" ON "categories"."parent" = "aaaaa"."id" WHERE "aaaaa"."name" = ?;"#
    );
    assert_eq!(params, vec![Value::from("Root")]);
}

#[test]
fn two_hop_self_reference_gets_two_aliases() {
    let schema = schema();
    let query = filter_query(json!({
        "parent": {"parent": {"name": {"_eq": "Root"}}},
    }));

    let (sql, params) = compile_sql(&schema, "categories", &query);

    assert_eq!(
        sql,
        r#"SELECT * FROM "categories" LEFT JOIN "categories" AS "aaaaa" ON "categories"."parent" = "aaaaa"."id" LEFT JOIN "categories" AS "aaaab" ON "aaaaa"."parent" = "aaaab"."id" WHERE "aaaab"."name" = ?;"#
    );
    assert_eq!(params, vec![Value::from("Root")]);
}

#[test]
fn sort_and_filter_share_one_join() {
    let schema = schema();
    let query = Query {
        sort: Some(vec!["author.name".into()]),
        filter: Some(json!({"author": {"age": {"_gt": 30}}}).into()),
        ..Query::default()
    };

    let (sql, params) = compile_sql(&schema, "pages", &query);

    assert_eq!(
        sql,
        r#"SELECT * FROM "pages" LEFT JOIN "authors" AS "aaaaa" ON "pages"."author" = "aaaaa"."id" WHERE "aaaaa"."age" > ? ORDER BY "aaaaa"."name" ASC;"#
    );
    assert_eq!(params, vec![Value::I64(30)]);
}

#[test]
fn sibling_predicates_under_one_relation_share_the_join() {
    let schema = schema();
    let query = filter_query(json!({
        "author": {"name": {"_eq": "Rijk"}},
        "status": {"_eq": "published"},
    }));

    let (sql, params) = compile_sql(&schema, "pages", &query);

    assert_eq!(
        sql,
        r#"SELECT * FROM "pages" LEFT JOIN "authors" AS "aaaaa" ON "pages"."author" = "aaaaa"."id" WHERE "aaaaa"."name" = ? AND "pages"."status" = ?;"#
    );
    assert_eq!(params, vec![Value::from("Rijk"), Value::from("published")]);
}
