//! In-memory document store.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::Value;

use crate::store::{DocumentStore, Result, apply_increment, empty_document, path_segments};

/// A document store held in a concurrent hash map.
///
/// Each operation runs under the shard lock of its path, so creates and
/// increments are atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: DashMap<String, Value>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, path: &str) -> Result<Option<Value>> {
        path_segments(path)?;
        Ok(self.documents.get(path).map(|entry| entry.value().clone()))
    }

    async fn set(&self, path: &str, document: Value) -> Result<()> {
        path_segments(path)?;
        self.documents.insert(path.to_string(), document);
        Ok(())
    }

    async fn create(&self, path: &str, document: Value) -> Result<bool> {
        path_segments(path)?;
        match self.documents.entry(path.to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(entry) => {
                entry.insert(document);
                Ok(true)
            }
        }
    }

    async fn increment(&self, path: &str, field: &str, by: i64) -> Result<i64> {
        path_segments(path)?;
        let mut entry = self
            .documents
            .entry(path.to_string())
            .or_insert_with(empty_document);
        apply_increment(path, entry.value_mut(), field, by)
    }
}
