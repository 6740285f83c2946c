//! Generation module
//!
//! Samples collections from a `DocumentSource`, runs schema inference and
//! emits the Python module.
//!
//! # Overview
//!
//! - `Generator` - drives sampling, inference and emission
//! - `SchemaPreview` - single-collection schema plus its definition
//! - `select_collections` - include/exclude filtering

mod types;

pub use types::{select_collections, CollectionSelection, Generated, SchemaPreview};

use crate::emit::{order, Emitter};
use crate::error::{Error, Result};
use crate::schema::{to_pascal_case, SchemaInferrer, SchemaRegistry};
use crate::source::DocumentSource;
use crate::types::Document;
use tracing::{debug, info, warn};

/// Drives generation runs against one document source
pub struct Generator<S> {
    /// Where samples come from
    source: S,
    /// Renders the inferred records
    emitter: Emitter,
}

impl<S: DocumentSource> Generator<S> {
    /// Create a generator with the default emitter
    pub fn new(source: S) -> Self {
        Self {
            source,
            emitter: Emitter::new(),
        }
    }

    /// Set the identifier field rendered as `ObjectId`
    #[must_use]
    pub fn with_id_field(mut self, id_field: impl Into<String>) -> Self {
        self.emitter = self.emitter.with_id_field(id_field);
        self
    }

    /// Get the document source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get the emitter
    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    /// Names of every collection in the source
    pub async fn list_collections(&self) -> Result<Vec<String>> {
        self.source.list_collection_names().await
    }

    /// Generate the Python module for the given collections
    pub async fn generate_definitions(
        &self,
        collection_names: &[String],
        sample_size: usize,
    ) -> Result<String> {
        Ok(self.generate(collection_names, sample_size).await?.code)
    }

    /// Generate the Python module and report what went into it.
    ///
    /// Collections that cannot be sampled or sample empty are skipped.
    /// Fails with `Error::NoOutput` if no collection produced a record.
    pub async fn generate(&self, collection_names: &[String], sample_size: usize) -> Result<Generated> {
        check_sample_size(sample_size)?;

        let mut registry = SchemaRegistry::new();
        let mut generated = Generated::default();

        for (index, name) in collection_names.iter().enumerate() {
            info!(
                "[{}/{}] Collection: {name}",
                index + 1,
                collection_names.len()
            );

            let documents = self.sample(name, sample_size).await?;
            if documents.is_empty() {
                info!("Collection '{name}' is empty or could not be read. Skipping.");
                generated.skipped.push(name.clone());
                continue;
            }

            let record_name = to_pascal_case(name);
            if !registry.claim(&record_name) {
                warn!("Record name '{record_name}' for collection '{name}' is already taken. Skipping.");
                generated.skipped.push(name.clone());
                continue;
            }

            let schema = SchemaInferrer::new(&mut registry).infer_schema(&documents, &record_name);
            registry.resolve(schema);
            generated.collections.push(name.clone());
        }

        if generated.collections.is_empty() {
            return Err(Error::NoOutput);
        }

        generated.records = order(&registry);
        generated.code = self.emitter.render_all(&registry, &generated.records);

        info!(
            "Generated {} records from {} collections",
            generated.records.len(),
            generated.collections.len()
        );
        Ok(generated)
    }

    /// Infer and render a single collection.
    ///
    /// Returns `None` if the collection sampled empty.
    pub async fn preview_schema(
        &self,
        collection_name: &str,
        sample_size: usize,
    ) -> Result<Option<SchemaPreview>> {
        check_sample_size(sample_size)?;

        let documents = self.sample(collection_name, sample_size).await?;
        if documents.is_empty() {
            return Ok(None);
        }

        let record_name = to_pascal_case(collection_name);
        let mut registry = SchemaRegistry::new();
        registry.claim(&record_name);
        let schema = SchemaInferrer::new(&mut registry).infer_schema(&documents, &record_name);
        let rendered_definition = self.emitter.render(&record_name, &schema);

        Ok(Some(SchemaPreview {
            collection: collection_name.to_string(),
            schema,
            rendered_definition,
            sampled_count: documents.len(),
        }))
    }

    /// Sample a collection. Recoverable failures are logged and come back
    /// as an empty sample.
    async fn sample(&self, collection: &str, sample_size: usize) -> Result<Vec<Document>> {
        debug!("Sampling {sample_size} documents from '{collection}'...");

        match self.source.sample_documents(collection, sample_size).await {
            Ok(documents) => {
                debug!("  -> Found {} documents.", documents.len());
                Ok(documents)
            }
            Err(e) if !e.is_fatal() => {
                warn!("Could not sample documents from collection '{collection}'. Skipping. Error: {e}");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}

fn check_sample_size(sample_size: usize) -> Result<()> {
    if sample_size == 0 {
        return Err(Error::invalid_argument("sample_size", "must be at least 1"));
    }
    Ok(())
}
