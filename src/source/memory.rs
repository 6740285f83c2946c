//! In-memory document source

use super::types::DocumentSource;
use crate::error::Result;
use crate::types::{document_from_json, Document};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;

/// Collections held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    collections: BTreeMap<String, Vec<Document>>,
}

impl MemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a collection
    #[must_use]
    pub fn with_collection(mut self, name: impl Into<String>, documents: Vec<Document>) -> Self {
        self.insert(name, documents);
        self
    }

    /// Add or replace a collection from JSON documents
    pub fn with_json(self, name: impl Into<String>, documents: Vec<Value>) -> Result<Self> {
        let documents = documents
            .into_iter()
            .map(document_from_json)
            .collect::<Result<Vec<_>>>()?;
        Ok(self.with_collection(name, documents))
    }

    /// Add or replace a collection
    pub fn insert(&mut self, name: impl Into<String>, documents: Vec<Document>) {
        self.collections.insert(name.into(), documents);
    }
}

#[async_trait]
impl DocumentSource for MemorySource {
    async fn list_collection_names(&self) -> Result<Vec<String>> {
        Ok(self.collections.keys().cloned().collect())
    }

    async fn sample_documents(
        &self,
        collection: &str,
        sample_size: usize,
    ) -> Result<Vec<Document>> {
        Ok(self
            .collections
            .get(collection)
            .map(|docs| docs.iter().take(sample_size).cloned().collect())
            .unwrap_or_default())
    }
}
