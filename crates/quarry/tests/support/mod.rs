#![allow(dead_code)]

use quarry::schema::{Collection, Field, FieldType, Relation};
use quarry::stmt;
use quarry::{Query, Schema};

use quarry_sql::Serializer;

/// A small CMS-shaped schema: pages with an author, articles pointing back
/// at pages and authors, self-referential categories, and a polymorphic
/// `blocks.item` pointing at headings or paragraphs.
pub fn schema() -> Schema {
    let mut schema = Schema::default();

    let pages = Collection::new("pages", "id")
        .with_field(Field::new("id", FieldType::Integer))
        .with_field(Field::new("status", FieldType::String))
        .with_field(Field::new("title", FieldType::String))
        .with_field(Field::new("secret", FieldType::Boolean))
        .with_field(Field::new("price", FieldType::Float))
        .with_field(Field::new("category", FieldType::String))
        .with_field(Field::new("created_at", FieldType::DateTime))
        .with_field(Field::new("published_on", FieldType::Date))
        .with_field(Field::new("external_id", FieldType::Uuid))
        .with_field(Field::new("author", FieldType::Integer));
    schema.collections.insert("pages".into(), pages);

    let authors = Collection::new("authors", "id")
        .with_field(Field::new("id", FieldType::Integer))
        .with_field(Field::new("name", FieldType::String))
        .with_field(Field::new("age", FieldType::Integer));
    schema.collections.insert("authors".into(), authors);

    let articles = Collection::new("articles", "id")
        .with_field(Field::new("id", FieldType::Integer))
        .with_field(Field::new("page_id", FieldType::Integer))
        .with_field(Field::new("author", FieldType::Integer))
        .with_field(Field::new("title", FieldType::String))
        .with_field(Field::new("published", FieldType::Boolean));
    schema.collections.insert("articles".into(), articles);

    let categories = Collection::new("categories", "id")
        .with_field(Field::new("id", FieldType::Integer))
        .with_field(Field::new("name", FieldType::String))
        .with_field(Field::new("parent", FieldType::Integer));
    schema.collections.insert("categories".into(), categories);

    let blocks = Collection::new("blocks", "id")
        .with_field(Field::new("id", FieldType::Integer))
        .with_field(Field::new("item", FieldType::String))
        .with_field(Field::new("collection", FieldType::String))
        .with_field(Field::new("visible", FieldType::Boolean));
    schema.collections.insert("blocks".into(), blocks);

    let headings = Collection::new("headings", "id")
        .with_field(Field::new("id", FieldType::Integer))
        .with_field(Field::new("title", FieldType::String));
    schema.collections.insert("headings".into(), headings);

    let paragraphs = Collection::new("paragraphs", "id")
        .with_field(Field::new("id", FieldType::Integer))
        .with_field(Field::new("body", FieldType::Text));
    schema.collections.insert("paragraphs".into(), paragraphs);

    schema.relations.push(
        Relation::new("pages", "author")
            .related_collection("authors")
            .one_field("pages"),
    );
    schema.relations.push(
        Relation::new("articles", "page_id")
            .related_collection("pages")
            .one_field("articles"),
    );
    schema.relations.push(
        Relation::new("articles", "author")
            .related_collection("authors")
            .one_field("articles"),
    );
    schema.relations.push(
        Relation::new("categories", "parent")
            .related_collection("categories")
            .one_field("children"),
    );
    schema.relations.push(
        Relation::new("blocks", "item")
            .one_collection_field("collection")
            .one_field("block")
            .one_allowed_collections(["headings", "paragraphs"]),
    );

    schema
}

/// Compile a query and serialize it, returning the SQL text and parameters.
pub fn compile_sql(schema: &Schema, collection: &str, query: &Query) -> (String, Vec<stmt::Value>) {
    let stmt = quarry::compile(schema, collection, query).expect("compilation failed");

    let mut params = vec![];
    let sql = Serializer::new().serialize(&stmt, &mut params);

    (sql, params)
}
