//! Source traits and types

use crate::error::Result;
use crate::types::Document;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A store that can list its collections and hand out document samples.
///
/// An empty sample means "skip this collection".
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Names of every collection in the store
    async fn list_collection_names(&self) -> Result<Vec<String>>;

    /// Up to `sample_size` documents from one collection
    async fn sample_documents(
        &self,
        collection: &str,
        sample_size: usize,
    ) -> Result<Vec<Document>>;
}

#[async_trait]
impl<T: DocumentSource + ?Sized> DocumentSource for Box<T> {
    async fn list_collection_names(&self) -> Result<Vec<String>> {
        (**self).list_collection_names().await
    }

    async fn sample_documents(
        &self,
        collection: &str,
        sample_size: usize,
    ) -> Result<Vec<Document>> {
        (**self).sample_documents(collection, sample_size).await
    }
}

/// On-disk layout of a collection export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// A JSON array of documents, or a single document
    Json,
    /// One JSON document per line (`mongoexport` default)
    Jsonl,
}

impl ExportFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(ExportFormat::Json),
            "jsonl" | "ndjson" => Some(ExportFormat::Jsonl),
            _ => None,
        }
    }
}
