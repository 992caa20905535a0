//! Integration tests over document fixtures
//!
//! Tests the full end-to-end flow: target → source → inference → rendered schema

use docschema::config::InferenceConfig;
use docschema::schema::{ClassifierPolicy, SchemaInferrer};
use docschema::source::{open_source, JsonFileSource, SourceTarget};
use docschema::{ArrayPolicy, ConflictPolicy, InferenceOutcome, ScanMode};
use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::Path;

fn fixture(dir: &Path, name: &str, body: &str) {
    let mut file = std::fs::File::create(dir.join(name)).unwrap();
    file.write_all(body.as_bytes()).unwrap();
}

async fn infer_rendered(target: &Path, collection: &str, config: &InferenceConfig) -> String {
    let mut source = open_source(target.to_str().unwrap(), collection)
        .await
        .unwrap();
    let inferrer = SchemaInferrer::from_config(config);
    match inferrer
        .infer(source.as_mut(), config.scan_mode())
        .await
        .unwrap()
    {
        InferenceOutcome::Schema(schema) => inferrer.render(&schema.tree),
        InferenceOutcome::Empty => panic!("collection '{collection}' was empty"),
    }
}

// ============================================================================
// File Source Integration Tests
// ============================================================================

#[tokio::test]
async fn test_uniform_collection() {
    let dir = tempfile::tempdir().unwrap();
    fixture(
        dir.path(),
        "users.json",
        r#"[{"name": "Ann", "age": 30}, {"age": 25, "name": "Bo"}]"#,
    );

    let text = infer_rendered(dir.path(), "users", &InferenceConfig::default()).await;
    assert_eq!(text, "{\n  age: Number,\n  name: String\n}");
}

#[tokio::test]
async fn test_array_collapse_across_documents() {
    let dir = tempfile::tempdir().unwrap();
    fixture(dir.path(), "points.jsonl", "{\"a\": [1, 2]}\n{\"a\": [3]}\n");

    let text = infer_rendered(dir.path(), "points", &InferenceConfig::default()).await;
    assert_eq!(text, "{\n  a: [\n    Number\n  ]\n}");
}

#[tokio::test]
async fn test_conflict_policies() {
    let dir = tempfile::tempdir().unwrap();
    fixture(dir.path(), "mixed.jsonl", "{\"a\": 1}\n{\"a\": \"x\"}\n");

    let union = infer_rendered(dir.path(), "mixed", &InferenceConfig::default()).await;
    assert_eq!(union, "{\n  a: Number | String\n}");

    let config = InferenceConfig::default().with_conflicts(ConflictPolicy::Mixed);
    let mixed = infer_rendered(dir.path(), "mixed", &config).await;
    assert_eq!(mixed, "{\n  a: Mixed\n}");
}

#[tokio::test]
async fn test_nested_array_of_objects() {
    let dir = tempfile::tempdir().unwrap();
    fixture(
        dir.path(),
        "orders.json",
        r#"[{"items": [{"id": 1}, {"id": 2, "qty": 3}]}]"#,
    );

    let first = infer_rendered(dir.path(), "orders", &InferenceConfig::default()).await;
    assert_eq!(first, "{\n  items: [\n    {\n      id: Number\n    }\n  ]\n}");

    let config = InferenceConfig::default().with_arrays(ArrayPolicy::All);
    let all = infer_rendered(dir.path(), "orders", &config).await;
    assert_eq!(
        all,
        "{\n  items: [\n    {\n      id: Number,\n      qty: Number\n    }\n  ]\n}"
    );
}

#[tokio::test]
async fn test_type_key_collision_and_custom_key() {
    let dir = tempfile::tempdir().unwrap();
    fixture(dir.path(), "pets.json", r#"[{"type": "dog"}]"#);

    let text = infer_rendered(dir.path(), "pets", &InferenceConfig::default()).await;
    assert_eq!(text, "{\n  type: {\n    type: String\n  }\n}");

    let config = InferenceConfig::default().with_type_key("kind");
    let text = infer_rendered(dir.path(), "pets", &config).await;
    assert_eq!(text, "{\n  type: {\n    kind: String\n  }\n}");
}

#[tokio::test]
async fn test_extended_json_collection() {
    let dir = tempfile::tempdir().unwrap();
    fixture(
        dir.path(),
        "accounts.jsonl",
        concat!(
            r#"{"_id": {"$oid": "507f1f77bcf86cd799439011"}, "opened": {"$date": {"$numberLong": "1700000000000"}}, "balance": {"$numberDecimal": "10.50"}}"#,
            "\n",
            r#"{"_id": {"$oid": "507f1f77bcf86cd799439012"}, "opened": "2024-01-15", "balance": 12}"#,
            "\n",
        ),
    );

    let default = infer_rendered(dir.path(), "accounts", &InferenceConfig::default()).await;
    assert_eq!(
        default,
        "{\n  _id: String,\n  balance: Number,\n  opened: Date\n}"
    );

    let config = InferenceConfig {
        classifier: ClassifierPolicy {
            distinct_decimal: true,
            distinct_identifier: true,
        },
        ..InferenceConfig::default()
    };
    let distinct = infer_rendered(dir.path(), "accounts", &config).await;
    assert_eq!(
        distinct,
        "{\n  _id: ObjectId,\n  balance: Decimal128 | Number,\n  opened: Date\n}"
    );
}

#[tokio::test]
async fn test_unsupported_fields_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    fixture(
        dir.path(),
        "oplog.json",
        r#"[{"op": "i", "ts": {"$timestamp": {"t": 1700000000, "i": 1}}}]"#,
    );

    let mut source = JsonFileSource::open(dir.path(), "oplog").unwrap();
    let outcome = SchemaInferrer::new()
        .infer(&mut source, ScanMode::Full)
        .await
        .unwrap();
    let schema = outcome.schema().unwrap();

    assert_eq!(schema.stats.skipped.len(), 1);
    assert_eq!(schema.stats.skipped[0].path, "ts");
    assert_eq!(
        SchemaInferrer::new().render(&schema.tree),
        "{\n  op: String\n}"
    );
}

#[tokio::test]
async fn test_empty_collection_yields_no_schema() {
    let dir = tempfile::tempdir().unwrap();
    fixture(dir.path(), "nothing.jsonl", "\n\n");

    let mut source = open_source(dir.path().to_str().unwrap(), "nothing")
        .await
        .unwrap();
    let outcome = SchemaInferrer::new()
        .infer(source.as_mut(), ScanMode::Full)
        .await
        .unwrap();
    assert!(outcome.is_empty());
}

#[tokio::test]
async fn test_sampled_uniform_collection_matches_full_scan() {
    let dir = tempfile::tempdir().unwrap();
    let body: String = (0..200)
        .map(|i| format!("{{\"id\": {i}, \"name\": \"user{i}\", \"tags\": [\"t\"]}}\n"))
        .collect();
    fixture(dir.path(), "users.jsonl", &body);

    let full = infer_rendered(dir.path(), "users", &InferenceConfig::default()).await;
    let sampled = infer_rendered(
        dir.path(),
        "users",
        &InferenceConfig::default().with_sample(20),
    )
    .await;
    assert_eq!(full, sampled);
}

#[tokio::test]
async fn test_config_file_drives_rendering() {
    let dir = tempfile::tempdir().unwrap();
    fixture(dir.path(), "users.json", r#"[{"profile": {"name": "Ann"}}]"#);
    fixture(dir.path(), "settings.yaml", "indent: 4\ntype_key: t\n");

    let config = InferenceConfig::load(dir.path().join("settings.yaml")).unwrap();
    let text = infer_rendered(dir.path(), "users", &config).await;
    assert_eq!(
        text,
        "{\n    profile: {\n        name: {\n            t: String\n        }\n    }\n}"
    );
}

#[test]
fn test_collections_and_missing_collection() {
    let dir = tempfile::tempdir().unwrap();
    fixture(dir.path(), "users.json", "[]");
    fixture(dir.path(), "events.ndjson", "");

    let target = SourceTarget::parse(dir.path().to_str().unwrap());
    let collections = tokio_test::block_on(target.list_collections()).unwrap();
    assert_eq!(collections, vec!["events", "users"]);

    let err = tokio_test::block_on(target.open("ghost")).err().unwrap();
    assert!(err.to_string().contains("ghost"));
}

// ============================================================================
// DuckDB Integration Tests
// ============================================================================

#[tokio::test]
async fn test_duckdb_table_with_nested_columns() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("shop.duckdb");

    {
        let conn = duckdb::Connection::open(&db_path).unwrap();
        conn.execute_batch(
            "CREATE TABLE orders (
                 id INTEGER,
                 customer STRUCT(name VARCHAR, vip BOOLEAN),
                 tags VARCHAR[]
             );
             INSERT INTO orders VALUES
                 (1, {'name': 'Ann', 'vip': true}, ['new', 'gift']),
                 (2, {'name': 'Bo', 'vip': false}, ['repeat']);",
        )
        .unwrap();
    }

    let target = db_path.to_str().unwrap();
    let config = InferenceConfig::default();
    let mut source = open_source(target, "orders").await.unwrap();
    let inferrer = SchemaInferrer::from_config(&config);
    let outcome = inferrer
        .infer(source.as_mut(), config.scan_mode())
        .await
        .unwrap();

    let schema = outcome.schema().unwrap();
    assert_eq!(schema.stats.documents, 2);
    assert_eq!(
        inferrer.render(&schema.tree),
        "{\n  customer: {\n    name: String,\n    vip: Boolean\n  },\n  id: Number,\n  tags: [\n    String\n  ]\n}"
    );
}
