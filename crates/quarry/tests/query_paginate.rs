mod support;

use support::{compile_sql, schema};

use quarry::Query;

#[test]
fn limit_and_offset() {
    let schema = schema();
    let query = Query {
        limit: Some(10),
        offset: Some(5),
        ..Query::default()
    };

    let (sql, _) = compile_sql(&schema, "pages", &query);
    assert_eq!(sql, r#"SELECT * FROM "pages" LIMIT 10 OFFSET 5;"#);
}

#[test]
fn negative_one_limit_means_no_limit() {
    let schema = schema();
    let query = Query {
        limit: Some(-1),
        ..Query::default()
    };

    let (sql, _) = compile_sql(&schema, "pages", &query);
    assert_eq!(sql, r#"SELECT * FROM "pages";"#);
}

#[test]
fn zero_limit_is_emitted() {
    let schema = schema();
    let query = Query {
        limit: Some(0),
        ..Query::default()
    };

    let (sql, _) = compile_sql(&schema, "pages", &query);
    assert_eq!(sql, r#"SELECT * FROM "pages" LIMIT 0;"#);
}

#[test]
fn page_computes_the_offset() {
    let schema = schema();
    let query = Query {
        limit: Some(10),
        page: Some(3),
        ..Query::default()
    };

    let (sql, _) = compile_sql(&schema, "pages", &query);
    assert_eq!(sql, r#"SELECT * FROM "pages" LIMIT 10 OFFSET 20;"#);
}

#[test]
fn page_overrides_an_explicit_offset() {
    let schema = schema();
    let query = Query {
        limit: Some(10),
        offset: Some(5),
        page: Some(2),
        ..Query::default()
    };

    let (sql, _) = compile_sql(&schema, "pages", &query);
    assert_eq!(sql, r#"SELECT * FROM "pages" LIMIT 10 OFFSET 10;"#);
}

#[test]
fn page_without_limit_does_nothing() {
    let schema = schema();
    let query = Query {
        page: Some(3),
        ..Query::default()
    };

    let (sql, _) = compile_sql(&schema, "pages", &query);
    assert_eq!(sql, r#"SELECT * FROM "pages";"#);
}

#[test]
fn first_page_keeps_offset_zero() {
    let schema = schema();
    let query = Query {
        limit: Some(25),
        page: Some(1),
        ..Query::default()
    };

    let (sql, _) = compile_sql(&schema, "pages", &query);
    assert_eq!(sql, r#"SELECT * FROM "pages" LIMIT 25 OFFSET 0;"#);
}
