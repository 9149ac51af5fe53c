//! Document store
//!
//! Named collections of JSON documents keyed by string ids. Every write replaces a whole
//! document under a single lock, so a document is never observed half-written.

use std::{collections::BTreeMap, sync::Arc};

use rustc_hash::FxHashMap;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A stored document.
pub type Document = Value;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable")]
    Unavailable,

    #[error("write rejected: {0}")]
    Rejected(String),

    #[error("malformed document {id}")]
    Malformed {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Default)]
struct Collections {
    documents: FxHashMap<String, BTreeMap<String, Document>>,
    offline: bool,
    read_only: bool,
}

impl Collections {
    fn readable(&self) -> Result<&Self, StoreError> {
        if self.offline {
            return Err(StoreError::Unavailable);
        }

        Ok(self)
    }

    fn writable(&mut self) -> Result<&mut Self, StoreError> {
        if self.offline {
            return Err(StoreError::Unavailable);
        }

        if self.read_only {
            return Err(StoreError::Rejected("store is read-only".to_string()));
        }

        Ok(self)
    }
}

/// Shared handle to the document store. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct Db {
    inner: Arc<RwLock<Collections>>,
}

impl Db {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a document.
    ///
    /// # Errors
    ///
    /// Returns an error when the store is unavailable.
    pub async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let guard = self.inner.read().await;

        Ok(guard
            .readable()?
            .documents
            .get(collection)
            .and_then(|documents| documents.get(id))
            .cloned())
    }

    /// Create or replace a document.
    ///
    /// # Errors
    ///
    /// Returns an error when the store is unavailable or rejects the write.
    pub async fn set(&self, collection: &str, id: &str, document: Document) -> Result<(), StoreError> {
        let mut guard = self.inner.write().await;

        guard
            .writable()?
            .documents
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), document);

        Ok(())
    }

    /// Delete a document, returning whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error when the store is unavailable or rejects the write.
    pub async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let mut guard = self.inner.write().await;

        Ok(guard
            .writable()?
            .documents
            .get_mut(collection)
            .and_then(|documents| documents.remove(id))
            .is_some())
    }

    /// Read, modify and write one document under a single write lock.
    ///
    /// `apply` receives the current document, if any, and returns its replacement; `None`
    /// deletes it. Concurrent updates to the same document are serialized.
    ///
    /// # Errors
    ///
    /// Returns an error when the store is unavailable, rejects the write, or `apply` fails.
    /// Nothing is written when `apply` fails.
    pub async fn update<F>(&self, collection: &str, id: &str, apply: F) -> Result<(), StoreError>
    where
        F: FnOnce(Option<&Document>) -> Result<Option<Document>, StoreError> + Send,
    {
        let mut guard = self.inner.write().await;

        let documents = guard
            .writable()?
            .documents
            .entry(collection.to_string())
            .or_default();

        match apply(documents.get(id))? {
            Some(document) => {
                documents.insert(id.to_string(), document);
            }
            None => {
                documents.remove(id);
            }
        }

        Ok(())
    }

    /// Create a document under a newly assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error when the store is unavailable or rejects the write.
    pub async fn add(&self, collection: &str, document: Document) -> Result<String, StoreError> {
        let mut guard = self.inner.write().await;

        let documents = guard
            .writable()?
            .documents
            .entry(collection.to_string())
            .or_default();

        let id = Uuid::now_v7().to_string();

        documents.insert(id.clone(), document);

        Ok(id)
    }

    /// All documents in a collection, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error when the store is unavailable.
    pub async fn list(&self, collection: &str) -> Result<Vec<(String, Document)>, StoreError> {
        self.select(collection, |_| true).await
    }

    /// Documents whose top-level `field` equals `value`, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error when the store is unavailable.
    pub async fn find_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<(String, Document)>, StoreError> {
        self.select(collection, |document| document.get(field) == Some(value))
            .await
    }

    async fn select(
        &self,
        collection: &str,
        predicate: impl Fn(&Document) -> bool,
    ) -> Result<Vec<(String, Document)>, StoreError> {
        let guard = self.inner.read().await;

        Ok(guard
            .readable()?
            .documents
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|(_, document)| predicate(document))
                    .map(|(id, document)| (id.clone(), document.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    #[cfg(test)]
    pub(crate) async fn set_offline(&self, offline: bool) {
        self.inner.write().await.offline = offline;
    }

    #[cfg(test)]
    pub(crate) async fn set_read_only(&self, read_only: bool) {
        self.inner.write().await.read_only = read_only;
    }
}

/// Serialize a record into a document.
///
/// # Errors
///
/// Returns [`StoreError::Rejected`] when the record cannot be represented as JSON.
pub fn encode<T: Serialize>(record: &T) -> Result<Document, StoreError> {
    serde_json::to_value(record).map_err(|error| StoreError::Rejected(error.to_string()))
}

/// Deserialize a stored document into a record.
///
/// # Errors
///
/// Returns [`StoreError::Malformed`] when the document does not match the record.
pub fn decode<T: DeserializeOwned>(id: &str, document: Document) -> Result<T, StoreError> {
    serde_json::from_value(document).map_err(|source| StoreError::Malformed {
        id: id.to_string(),
        source,
    })
}
