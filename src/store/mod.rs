pub mod business;
pub mod employees;

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::error;

use crate::error::Error;

/// In-process keyed document store: named collections of JSON documents.
/// The store API mirrors a document database (upsert/insert/get/remove by
/// key), which is the only seam the domain code relies on.
#[derive(Clone, Default)]
pub struct Bucket {
    collections: Arc<RwLock<HashMap<String, HashMap<String, Value>>>>,
}

impl Bucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the document unconditionally.
    pub async fn upsert<T: Serialize>(&self, collection: &str, key: &str, doc: &T) -> Result<()> {
        let value = serde_json::to_value(doc).context("failed to encode document")?;
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }

    /// Write the document only if the key is free; `false` means it existed.
    pub async fn insert<T: Serialize>(
        &self,
        collection: &str,
        key: &str,
        doc: &T,
    ) -> Result<bool> {
        let value = serde_json::to_value(doc).context("failed to encode document")?;
        let mut collections = self.collections.write().await;
        let col = collections.entry(collection.to_string()).or_default();
        if col.contains_key(key) {
            return Ok(false);
        }
        col.insert(key.to_string(), value);
        Ok(true)
    }

    pub async fn get<T: DeserializeOwned>(&self, collection: &str, key: &str) -> Result<Option<T>> {
        let collections = self.collections.read().await;
        let Some(value) = collections.get(collection).and_then(|col| col.get(key)) else {
            return Ok(None);
        };
        let doc = serde_json::from_value(value.clone())
            .with_context(|| format!("corrupt document {collection}/{key}"))?;
        Ok(Some(doc))
    }

    /// `false` when there was nothing to remove.
    pub async fn remove(&self, collection: &str, key: &str) -> Result<bool> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(collection)
            .and_then(|col| col.remove(key))
            .is_some())
    }

    /// Every document of a collection, ordered by key.
    pub async fn all<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<(String, T)>> {
        let collections = self.collections.read().await;
        let Some(col) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut keys: Vec<&String> = col.keys().collect();
        keys.sort();

        let mut docs = Vec::with_capacity(keys.len());
        for key in keys {
            let doc = serde_json::from_value(col[key].clone())
                .with_context(|| format!("corrupt document {collection}/{key}"))?;
            docs.push((key.clone(), doc));
        }
        Ok(docs)
    }
}

/// Storage failures surface as retryable errors; nothing in the domain layer
/// commits partially, so a replay is always safe.
pub fn storage_err(err: anyhow::Error) -> Error {
    error!(error = %err, "storage operation failed");
    Error::transient(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_refuses_to_overwrite() {
        let bucket = Bucket::new();
        assert!(bucket.insert("c", "k", &1u32).await.unwrap());
        assert!(!bucket.insert("c", "k", &2u32).await.unwrap());
        assert_eq!(bucket.get::<u32>("c", "k").await.unwrap(), Some(1));
    }

    #[tokio::test]
    async fn upsert_get_remove_round_trip() {
        let bucket = Bucket::new();
        bucket.upsert("c", "k", &"doc").await.unwrap();
        assert_eq!(
            bucket.get::<String>("c", "k").await.unwrap(),
            Some("doc".to_string())
        );
        assert!(bucket.remove("c", "k").await.unwrap());
        assert!(!bucket.remove("c", "k").await.unwrap());
        assert_eq!(bucket.get::<String>("c", "k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn all_returns_documents_in_key_order() {
        let bucket = Bucket::new();
        bucket.upsert("c", "b", &2u32).await.unwrap();
        bucket.upsert("c", "a", &1u32).await.unwrap();
        let docs = bucket.all::<u32>("c").await.unwrap();
        assert_eq!(docs, vec![("a".to_string(), 1), ("b".to_string(), 2)]);
    }
}
