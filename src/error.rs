//! Error types for mongodb-typegen
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for mongodb-typegen
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for '{field}': {message}")]
    InvalidArgument { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Source Errors
    // ============================================================================
    #[error("Could not connect to document source: {message}")]
    Connection { message: String },

    #[error("Could not sample documents from collection '{collection}': {message}")]
    Sampling { collection: String, message: String },

    #[error("Collection '{collection}' not found")]
    CollectionNotFound { collection: String },

    #[error("Collection '{collection}' is empty")]
    EmptyCollection { collection: String },

    #[error("Failed to decode document: {message}")]
    Decode { message: String },

    // ============================================================================
    // Generation Errors
    // ============================================================================
    #[error("No collections to process")]
    NoCollections,

    #[error("Generation finished with no output")]
    NoOutput,

    #[error("Output file '{path}' already exists (use --force to overwrite)")]
    OutputExists { path: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a sampling error for a collection
    pub fn sampling(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Sampling {
            collection: collection.into(),
            message: message.into(),
        }
    }

    /// Create a collection-not-found error
    pub fn collection_not_found(collection: impl Into<String>) -> Self {
        Self::CollectionNotFound {
            collection: collection.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Whether this error aborts the whole run.
    ///
    /// Sampling and decode failures only cost the affected collection.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::Sampling { .. } | Error::Decode { .. })
    }
}

/// Result type alias for mongodb-typegen
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
