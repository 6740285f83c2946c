//! Common types used throughout mongodb-typegen
//!
//! This module contains the document value model shared by the sources
//! and the schema inferencer.

use crate::error::{Error, Result};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// A single document: field name to value
pub type Document = BTreeMap<String, DocValue>;

/// Default name of the store's canonical identifier field
pub const DEFAULT_ID_FIELD: &str = "_id";

// ============================================================================
// Document Values
// ============================================================================

/// A dynamically typed document value.
///
/// The set of kinds is closed and mirrors what a document store hands back.
#[derive(Debug, Clone, PartialEq)]
pub enum DocValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Timestamp(DateTime<Utc>),
    /// Opaque store identifier (hex string for ObjectId)
    ObjectId(String),
    Array(Vec<DocValue>),
    Document(Document),
}

impl DocValue {
    /// Human-readable name of the value kind
    pub fn kind(&self) -> &'static str {
        match self {
            DocValue::Null => "null",
            DocValue::Bool(_) => "bool",
            DocValue::Int(_) => "int",
            DocValue::Float(_) => "float",
            DocValue::String(_) => "string",
            DocValue::Timestamp(_) => "timestamp",
            DocValue::ObjectId(_) => "objectId",
            DocValue::Array(_) => "array",
            DocValue::Document(_) => "document",
        }
    }

    /// Convert a JSON value, decoding MongoDB Extended JSON wrappers
    /// (`$oid`, `$date`, `$numberInt`, `$numberLong`, `$numberDouble`,
    /// `$numberDecimal`).
    ///
    /// Wrappers that fail to decode are kept as plain documents.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => DocValue::Null,
            Value::Bool(b) => DocValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    DocValue::Int(i)
                } else if n.is_u64() {
                    // Out of i64 range but still an integer
                    DocValue::Int(i64::MAX)
                } else {
                    DocValue::Float(n.as_f64().unwrap_or_default())
                }
            }
            Value::String(s) => DocValue::String(s),
            Value::Array(items) => DocValue::Array(items.into_iter().map(Self::from_json).collect()),
            Value::Object(map) => {
                decode_extended(&map).unwrap_or_else(|| DocValue::Document(document_from_map(map)))
            }
        }
    }
}

impl From<Value> for DocValue {
    fn from(value: Value) -> Self {
        DocValue::from_json(value)
    }
}

/// Convert a JSON value into a document. The value must be an object.
pub fn document_from_json(value: Value) -> Result<Document> {
    match value {
        Value::Object(map) => Ok(document_from_map(map)),
        other => Err(Error::decode(format!(
            "expected a JSON object, found {}",
            json_kind(&other)
        ))),
    }
}

fn document_from_map(map: Map<String, Value>) -> Document {
    map.into_iter()
        .map(|(key, value)| (key, DocValue::from_json(value)))
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// Extended JSON
// ============================================================================

fn decode_extended(map: &Map<String, Value>) -> Option<DocValue> {
    if map.len() != 1 {
        return None;
    }
    let (key, value) = map.iter().next()?;

    match key.as_str() {
        "$oid" => value.as_str().map(|s| DocValue::ObjectId(s.to_string())),
        "$date" => decode_date(value).map(DocValue::Timestamp),
        "$numberInt" | "$numberLong" => value
            .as_str()
            .and_then(|s| s.parse::<i64>().ok())
            .map(DocValue::Int),
        "$numberDouble" | "$numberDecimal" => value
            .as_str()
            .and_then(|s| s.parse::<f64>().ok())
            .map(DocValue::Float),
        _ => None,
    }
}

fn decode_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(millis_to_datetime),
        Value::Object(inner) => inner
            .get("$numberLong")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<i64>().ok())
            .and_then(millis_to_datetime),
        _ => None,
    }
}

fn millis_to_datetime(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}
