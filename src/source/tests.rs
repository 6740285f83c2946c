//! Tests for document sources

use super::*;
use crate::error::Error;
use crate::types::DocValue;
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

// ============================================================================
// Export Parsing
// ============================================================================

#[test]
fn test_format_from_path() {
    assert_eq!(
        ExportFormat::from_path(Path::new("users.json")),
        Some(ExportFormat::Json)
    );
    assert_eq!(
        ExportFormat::from_path(Path::new("users.JSONL")),
        Some(ExportFormat::Jsonl)
    );
    assert_eq!(
        ExportFormat::from_path(Path::new("users.ndjson")),
        Some(ExportFormat::Jsonl)
    );
    assert_eq!(ExportFormat::from_path(Path::new("users.csv")), None);
    assert_eq!(ExportFormat::from_path(Path::new("users")), None);
}

#[test]
fn test_parse_json_array_with_limit() {
    let content = r#"[{"a": 1}, {"a": 2}, {"a": 3}]"#;
    let docs = parse_export(content, ExportFormat::Json, 2).unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[1]["a"], DocValue::Int(2));
}

#[test]
fn test_parse_json_single_document() {
    let docs = parse_export(r#"{"a": "x"}"#, ExportFormat::Json, 10).unwrap();
    assert_eq!(docs.len(), 1);
}

#[test]
fn test_parse_json_rejects_scalars() {
    let result = parse_export("42", ExportFormat::Json, 10);
    assert!(matches!(result, Err(Error::Decode { .. })));

    let result = parse_export("[1, 2]", ExportFormat::Json, 10);
    assert!(matches!(result, Err(Error::Decode { .. })));
}

#[test]
fn test_parse_jsonl_skips_blank_lines() {
    let content = "{\"a\": 1}\n\n  \n{\"a\": 2}\n";
    let docs = parse_export(content, ExportFormat::Jsonl, 10).unwrap();
    assert_eq!(docs.len(), 2);
}

#[test]
fn test_parse_jsonl_reports_line() {
    let content = "{\"a\": 1}\nnot json\n";
    let err = parse_export(content, ExportFormat::Jsonl, 10).unwrap_err();
    assert!(err.to_string().contains("line 2"));
}

#[test]
fn test_parse_jsonl_stops_at_limit() {
    // Lines past the limit are never parsed
    let content = "{\"a\": 1}\n{\"a\": 2}\nnot json\n";
    let docs = parse_export(content, ExportFormat::Jsonl, 2).unwrap();
    assert_eq!(docs.len(), 2);
}

#[test]
fn test_parse_extended_json() {
    let content = r#"{"_id": {"$oid": "507f1f77bcf86cd799439011"}, "at": {"$date": "2024-01-15T10:30:00Z"}}"#;
    let docs = parse_export(content, ExportFormat::Jsonl, 10).unwrap();
    assert_eq!(docs[0]["_id"].kind(), "objectId");
    assert_eq!(docs[0]["at"].kind(), "timestamp");
}

// ============================================================================
// JsonDirSource
// ============================================================================

#[tokio::test]
async fn test_connect_missing_directory() {
    let dir = TempDir::new().unwrap();
    let result = JsonDirSource::connect(dir.path().join("nope")).await;
    assert!(matches!(result, Err(Error::Connection { .. })));
}

#[tokio::test]
async fn test_connect_file_is_not_directory() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "users.json", "[]");
    let result = JsonDirSource::connect(dir.path().join("users.json")).await;
    assert!(matches!(result, Err(Error::Connection { .. })));
}

#[tokio::test]
async fn test_list_collection_names() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "users.json", "[]");
    write(dir.path(), "orders.jsonl", "");
    write(dir.path(), "events.ndjson", "");
    write(dir.path(), "users.jsonl", "");
    write(dir.path(), "README.md", "ignored");
    std::fs::create_dir(dir.path().join("nested.json")).unwrap();

    let source = JsonDirSource::connect(dir.path()).await.unwrap();
    let names = source.list_collection_names().await.unwrap();
    assert_eq!(names, vec!["events", "orders", "users"]);
}

#[tokio::test]
async fn test_sample_documents() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "users.jsonl",
        "{\"name\": \"Alice\"}\n{\"name\": \"Bob\"}\n{\"name\": \"Carol\"}\n",
    );

    let source = JsonDirSource::connect(dir.path()).await.unwrap();
    let docs = source.sample_documents("users", 2).await.unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0]["name"], DocValue::String("Alice".to_string()));
}

#[tokio::test]
async fn test_sample_unknown_collection() {
    let dir = TempDir::new().unwrap();
    let source = JsonDirSource::connect(dir.path()).await.unwrap();

    let err = source.sample_documents("ghost", 5).await.unwrap_err();
    assert!(matches!(err, Error::Sampling { .. }));
    assert!(!err.is_fatal());
}

#[tokio::test]
async fn test_sample_malformed_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "broken.json", "{not json");

    let source = JsonDirSource::connect(dir.path()).await.unwrap();
    let err = source.sample_documents("broken", 5).await.unwrap_err();
    assert!(matches!(err, Error::Sampling { ref collection, .. } if collection == "broken"));
}

// ============================================================================
// MemorySource
// ============================================================================

#[test]
fn test_memory_source() {
    let source = MemorySource::new()
        .with_json("users", vec![json!({"a": 1}), json!({"a": 2})])
        .unwrap()
        .with_json("empty", vec![])
        .unwrap();

    let names = tokio_test::block_on(source.list_collection_names()).unwrap();
    assert_eq!(names, vec!["empty", "users"]);

    let docs = tokio_test::block_on(source.sample_documents("users", 1)).unwrap();
    assert_eq!(docs.len(), 1);

    let docs = tokio_test::block_on(source.sample_documents("missing", 10)).unwrap();
    assert!(docs.is_empty());
}

#[test]
fn test_memory_source_rejects_non_objects() {
    let result = MemorySource::new().with_json("bad", vec![json!(1)]);
    assert!(result.is_err());
}
