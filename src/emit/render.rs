//! TypedDict rendering

use crate::schema::{FieldSchema, RecordSchema, ResolvedType, SchemaRegistry};
use crate::types::DEFAULT_ID_FIELD;

/// First line of every generated file
pub const HEADER: &str = "# This file was auto-generated by mongodb-typegen. Do not edit manually.";

/// Imports needed by the emitted type vocabulary, in output order
pub const PREAMBLE: &[&str] = &[
    "from typing import TypedDict, List, Optional, Union, Any",
    "from datetime import datetime",
    "from bson.objectid import ObjectId",
    "try:",
    "    from typing import NotRequired",
    "except ImportError:",
    "    from typing_extensions import NotRequired",
];

/// Renders record schemas as Python `TypedDict` definitions
#[derive(Debug, Clone)]
pub struct Emitter {
    /// Field always rendered as `ObjectId`
    id_field: String,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter {
    /// Create an emitter using `_id` as the identifier field
    pub fn new() -> Self {
        Self {
            id_field: DEFAULT_ID_FIELD.to_string(),
        }
    }

    /// Set the identifier field name
    #[must_use]
    pub fn with_id_field(mut self, id_field: impl Into<String>) -> Self {
        self.id_field = id_field.into();
        self
    }

    /// Identifier field name
    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    /// Resolve a field's type, applying the identifier override
    pub fn field_type(&self, name: &str, field: &FieldSchema) -> ResolvedType {
        if name == self.id_field {
            field.resolve_as_identifier()
        } else {
            field.resolve()
        }
    }

    /// Render one record as a functional-syntax `TypedDict`
    pub fn render(&self, name: &str, schema: &RecordSchema) -> String {
        if schema.is_empty() {
            return format!("{name} = TypedDict(\"{name}\", {{}})");
        }

        let fields: Vec<String> = schema
            .fields
            .iter()
            .map(|(field_name, field)| {
                format!(
                    "    {}: {}",
                    python_str_literal(field_name),
                    self.field_type(field_name, field)
                )
            })
            .collect();

        format!(
            "{name} = TypedDict(\"{name}\", {{\n{}\n}})",
            fields.join(",\n")
        )
    }

    /// Render the complete module: header, imports, then every resolved
    /// record in the given order.
    pub fn render_all(&self, registry: &SchemaRegistry, order: &[String]) -> String {
        let blocks: Vec<String> = order
            .iter()
            .filter_map(|name| registry.get(name).map(|schema| self.render(name, schema)))
            .collect();

        let mut out = String::new();
        out.push_str(HEADER);
        out.push_str("\n\n");
        out.push_str(&PREAMBLE.join("\n"));
        out.push_str("\n\n\n");
        out.push_str(&blocks.join("\n\n\n"));
        out.push('\n');
        out
    }
}

/// Quote a string the way Python's `repr` does
pub fn python_str_literal(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
