//! Directory of JSON collection exports
//!
//! Each `<collection>.json`, `<collection>.jsonl` or `<collection>.ndjson`
//! file in the directory is one collection. Extended JSON wrappers written
//! by `mongoexport` are decoded into native values.

use super::types::{DocumentSource, ExportFormat};
use crate::error::{Error, Result};
use crate::types::{document_from_json, Document};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Document source backed by a directory of export files
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    root: PathBuf,
}

impl JsonDirSource {
    /// Open a directory of exports. Fails if it does not exist.
    pub async fn connect(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        let metadata = tokio::fs::metadata(&root).await.map_err(|e| {
            Error::connection(format!("Cannot open '{}': {e}", root.display()))
        })?;
        if !metadata.is_dir() {
            return Err(Error::connection(format!(
                "'{}' is not a directory",
                root.display()
            )));
        }

        tracing::info!("Using document source at {}", root.display());
        Ok(Self { root })
    }

    /// Directory being read
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map collection name to its export file.
    ///
    /// If a collection has several files, the first path in sort order
    /// wins (`users.json` before `users.jsonl`).
    async fn collection_files(&self) -> Result<BTreeMap<String, (PathBuf, ExportFormat)>> {
        let mut entries = tokio::fs::read_dir(&self.root).await.map_err(|e| {
            Error::connection(format!("Cannot list '{}': {e}", self.root.display()))
        })?;

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                paths.push(entry.path());
            }
        }
        paths.sort();

        let mut files = BTreeMap::new();
        for path in paths {
            let Some(format) = ExportFormat::from_path(&path) else {
                continue;
            };
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            files.entry(stem.to_string()).or_insert((path, format));
        }

        Ok(files)
    }
}

#[async_trait]
impl DocumentSource for JsonDirSource {
    async fn list_collection_names(&self) -> Result<Vec<String>> {
        Ok(self.collection_files().await?.into_keys().collect())
    }

    async fn sample_documents(
        &self,
        collection: &str,
        sample_size: usize,
    ) -> Result<Vec<Document>> {
        let files = self.collection_files().await?;
        let (path, format) = files
            .get(collection)
            .ok_or_else(|| Error::sampling(collection, "no export file found"))?;

        tracing::debug!("Reading {} documents from {}", sample_size, path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::sampling(collection, format!("{}: {e}", path.display())))?;

        parse_export(&content, *format, sample_size)
            .map_err(|e| Error::sampling(collection, e.to_string()))
    }
}

/// Parse the first `limit` documents of an export file
pub fn parse_export(content: &str, format: ExportFormat, limit: usize) -> Result<Vec<Document>> {
    match format {
        ExportFormat::Json => {
            let value: Value = serde_json::from_str(content)
                .map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))?;
            match value {
                Value::Array(items) => items
                    .into_iter()
                    .take(limit)
                    .map(document_from_json)
                    .collect(),
                Value::Object(_) if limit > 0 => Ok(vec![document_from_json(value)?]),
                Value::Object(_) => Ok(Vec::new()),
                _ => Err(Error::decode(
                    "expected an array of documents or a single document",
                )),
            }
        }
        ExportFormat::Jsonl => {
            let mut documents = Vec::new();

            for (line_num, line) in content.lines().enumerate() {
                if documents.len() >= limit {
                    break;
                }
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let value: Value = serde_json::from_str(line).map_err(|e| {
                    Error::decode(format!("Failed to parse JSONL at line {}: {e}", line_num + 1))
                })?;
                documents.push(document_from_json(value)?);
            }

            Ok(documents)
        }
    }
}
