//! Schema inference from sampled documents

use super::naming::nested_record_name;
use super::registry::SchemaRegistry;
use super::types::{FieldSchema, RecordSchema, TypeSet, TypeTag};
use crate::types::{DocValue, Document};
use std::collections::BTreeMap;
use tracing::debug;

/// Per-field accumulator for one sample
#[derive(Debug, Default)]
struct FieldObservation {
    types: TypeSet,
    present_count: usize,
}

/// Schema inferrer bound to the registry of one generation run
#[derive(Debug)]
pub struct SchemaInferrer<'r> {
    registry: &'r mut SchemaRegistry,
}

impl<'r> SchemaInferrer<'r> {
    /// Create an inferrer that registers nested records in `registry`
    pub fn new(registry: &'r mut SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Infer the schema of one record shape from a sample.
    ///
    /// Nested documents are registered as their own records along the way;
    /// the returned schema itself is not stored.
    pub fn infer_schema(&mut self, documents: &[Document], record_name: &str) -> RecordSchema {
        let sample_size = documents.len();
        let mut observations: BTreeMap<String, FieldObservation> = BTreeMap::new();

        for doc in documents {
            for (key, value) in doc {
                let tag = self.infer_type(value, key, record_name);
                let observation = observations.entry(key.clone()).or_default();
                observation.present_count += 1;
                observation.types.insert(tag);
            }
        }

        let mut schema = RecordSchema::new(record_name, sample_size);
        for (key, observation) in observations {
            let mut types = observation.types;
            if types.is_empty() {
                types.insert(TypeTag::Any);
            }
            schema.fields.insert(
                key,
                FieldSchema {
                    types,
                    present_count: observation.present_count,
                    is_optional: observation.present_count < sample_size,
                },
            );
        }

        debug!(
            record = record_name,
            documents = sample_size,
            fields = schema.len(),
            "Inferred record schema"
        );
        schema
    }

    /// Infer the tag of a single value found under `field_name` in `owner`
    pub fn infer_type(&mut self, value: &DocValue, field_name: &str, owner: &str) -> TypeTag {
        match value {
            DocValue::Null => TypeTag::Any,
            DocValue::Bool(_) => TypeTag::Bool,
            DocValue::Int(_) => TypeTag::Int,
            DocValue::Float(_) => TypeTag::Float,
            DocValue::String(_) => TypeTag::Str,
            DocValue::Timestamp(_) => TypeTag::DateTime,
            DocValue::ObjectId(_) => TypeTag::ObjectId,
            DocValue::Array(items) => {
                let elements: TypeSet = items
                    .iter()
                    .map(|item| self.infer_type(item, field_name, owner))
                    .collect();
                TypeTag::list(elements)
            }
            DocValue::Document(doc) => self.infer_nested(doc, field_name, owner),
        }
    }

    fn infer_nested(&mut self, doc: &Document, field_name: &str, owner: &str) -> TypeTag {
        let name = nested_record_name(owner, field_name);

        if self.registry.claim(&name) {
            let schema = self.infer_schema(std::slice::from_ref(doc), &name);
            self.registry.resolve(schema);
        }
        self.registry.add_dependency(owner, &name);

        TypeTag::Record(name)
    }
}

/// Infer a record schema (convenience function)
pub fn infer_schema(
    documents: &[Document],
    record_name: &str,
    registry: &mut SchemaRegistry,
) -> RecordSchema {
    SchemaInferrer::new(registry).infer_schema(documents, record_name)
}

/// Infer the tag of a single value (convenience function)
pub fn infer_type(
    value: &DocValue,
    field_name: &str,
    owner: &str,
    registry: &mut SchemaRegistry,
) -> TypeTag {
    SchemaInferrer::new(registry).infer_type(value, field_name, owner)
}
