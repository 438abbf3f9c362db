//! Document store interface.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to create a directory.
    #[error("Failed to create directory '{path}': {source}")]
    CreateDir {
        /// The path that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to write a file.
    #[error("Failed to write file '{path}': {source}")]
    WriteFile {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to take the lock guarding a document.
    #[error("Failed to lock '{path}': {source}")]
    Lock {
        /// The lock file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A stored document could not be parsed.
    #[error("Failed to parse document '{path}': {source}")]
    ParseJson {
        /// The document path.
        path: String,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// Failed to serialize a document.
    #[error("Failed to serialize document: {0}")]
    SerializeJson(#[from] serde_json::Error),

    /// The document path is empty or contains an invalid segment.
    #[error("Invalid document path '{0}'")]
    InvalidPath(String),

    /// The document is not a JSON object.
    #[error("Document '{0}' is not an object")]
    NotAnObject(String),

    /// The field to increment holds something other than an integer.
    #[error("Field '{field}' of document '{path}' is not an integer")]
    NotANumber {
        /// The document path.
        path: String,
        /// The offending field.
        field: String,
    },

    /// The backend could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// A store of JSON documents addressed by slash-separated paths.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    /// Reads the document at `path`, or `None` if it does not exist.
    async fn get(&self, path: &str) -> Result<Option<Value>>;

    /// Writes `document` at `path`, replacing any existing document.
    async fn set(&self, path: &str, document: Value) -> Result<()>;

    /// Writes `document` at `path` only if nothing is stored there.
    ///
    /// Returns true if this call created the document.
    async fn create(&self, path: &str, document: Value) -> Result<bool>;

    /// Atomically adds `by` to the integer `field` of the document at `path`.
    ///
    /// A missing document or field counts as zero. Returns the new value.
    async fn increment(&self, path: &str, field: &str, by: i64) -> Result<i64>;
}

/// Applies an increment to an in-memory document.
pub(crate) fn apply_increment(
    path: &str,
    document: &mut Value,
    field: &str,
    by: i64,
) -> Result<i64> {
    let object = document
        .as_object_mut()
        .ok_or_else(|| StoreError::NotAnObject(path.to_string()))?;

    let current = match object.get(field) {
        None | Some(Value::Null) => 0,
        Some(value) => value.as_i64().ok_or_else(|| StoreError::NotANumber {
            path: path.to_string(),
            field: field.to_string(),
        })?,
    };

    let next = current.saturating_add(by);
    object.insert(field.to_string(), Value::from(next));
    Ok(next)
}

/// Returns an empty JSON object.
pub(crate) fn empty_document() -> Value {
    Value::Object(Map::new())
}

/// Splits a document path into validated segments.
pub(crate) fn path_segments(path: &str) -> Result<Vec<&str>> {
    let segments: Vec<&str> = path.split('/').collect();
    let valid = segments.iter().all(|segment| {
        !segment.is_empty() && *segment != "." && *segment != ".." && !segment.contains('\\')
    });
    if valid {
        Ok(segments)
    } else {
        Err(StoreError::InvalidPath(path.to_string()))
    }
}
