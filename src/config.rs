//! Configuration for generation runs
//!
//! Settings can come from a YAML or JSON file and are overridden by CLI
//! flags. Every field has a default, so an empty file is valid.

use crate::error::{Error, Result};
use crate::types::DEFAULT_ID_FIELD;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Largest sample the `generate` command accepts
pub const MAX_SAMPLE_SIZE: usize = 10_000;

/// Largest sample the `preview` command accepts
pub const MAX_PREVIEW_SAMPLE_SIZE: usize = 1_000;

/// Generator settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypegenConfig {
    /// Directory of collection exports
    pub source: Option<PathBuf>,

    /// Output file for generated code
    pub out: PathBuf,

    /// Documents sampled per collection by `generate`
    pub sample_size: usize,

    /// Documents sampled by `preview`
    pub preview_sample_size: usize,

    /// Collections to process (empty = all)
    pub collections: Vec<String>,

    /// Collections to leave out
    pub exclude: Vec<String>,

    /// Field always typed as `ObjectId`
    pub id_field: String,
}

impl Default for TypegenConfig {
    fn default() -> Self {
        Self {
            source: None,
            out: PathBuf::from("generated_models.py"),
            sample_size: 100,
            preview_sample_size: 10,
            collections: Vec::new(),
            exclude: Vec::new(),
            id_field: DEFAULT_ID_FIELD.to_string(),
        }
    }
}

impl TypegenConfig {
    /// Load from a `.yaml`/`.yml` or `.json` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file '{}': {e}", path.display()))
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json_str(&contents)?
        } else {
            Self::from_yaml_str(&contents)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        check_range("sample_size", self.sample_size, MAX_SAMPLE_SIZE)?;
        check_range(
            "preview_sample_size",
            self.preview_sample_size,
            MAX_PREVIEW_SAMPLE_SIZE,
        )?;
        if self.id_field.is_empty() {
            return Err(Error::invalid_argument("id_field", "must not be empty"));
        }
        Ok(())
    }
}

fn check_range(field: &str, value: usize, max: usize) -> Result<()> {
    if (1..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::invalid_argument(
            field,
            format!("{value} is not in 1..={max}"),
        ))
    }
}
