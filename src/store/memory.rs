//! In-memory store backend for testing.
//!
//! Unlike a canned mock, this backend evaluates query filters against its
//! documents, so pipeline tests exercise real matching behavior without a
//! running mongod.

use async_trait::async_trait;
use std::sync::RwLock;

use super::{Document, StoreClient};
use crate::error::{AskdbError, Result};
use crate::query::QueryFilter;

/// An in-memory store client holding documents in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<Vec<Document>>,
}

impl MemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given documents.
    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: RwLock::new(documents),
        }
    }
}

#[async_trait]
impl StoreClient for MemoryStore {
    async fn count(&self) -> Result<u64> {
        let documents = self
            .documents
            .read()
            .map_err(|_| AskdbError::internal("store lock poisoned"))?;
        Ok(documents.len() as u64)
    }

    async fn insert_many(&self, documents: Vec<Document>) -> Result<usize> {
        let inserted = documents.len();
        let mut stored = self
            .documents
            .write()
            .map_err(|_| AskdbError::internal("store lock poisoned"))?;
        stored.extend(documents);
        Ok(inserted)
    }

    async fn find(&self, filter: &QueryFilter) -> Result<Vec<Document>> {
        let documents = self
            .documents
            .read()
            .map_err(|_| AskdbError::internal("store lock poisoned"))?;

        Ok(documents
            .iter()
            .filter(|doc| filter.matches(doc))
            .map(|doc| {
                let mut projected = doc.clone();
                projected.remove("_id");
                projected
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product(name: &str, price: i64) -> Document {
        json!({"Name": name, "Price": price})
            .as_object()
            .unwrap()
            .clone()
    }

    #[tokio::test]
    async fn test_count_and_insert() {
        let store = MemoryStore::new();
        assert_eq!(store.count().await.unwrap(), 0);

        let inserted = store
            .insert_many(vec![product("A", 60), product("B", 40)])
            .await
            .unwrap();

        assert_eq!(inserted, 2);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_find_applies_filter() {
        let store = MemoryStore::with_documents(vec![product("A", 60), product("B", 40)]);
        let filter = QueryFilter::parse(r#"{"Price": {"$gt": 50}}"#).unwrap();

        let results = store.find(&filter).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].get("Name"), Some(&json!("A")));
    }

    #[tokio::test]
    async fn test_empty_filter_returns_all_documents() {
        let store = MemoryStore::with_documents(vec![product("A", 60), product("B", 40)]);

        let results = store.find(&QueryFilter::empty()).await.unwrap();

        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_find_strips_internal_id() {
        let mut doc = product("A", 60);
        doc.insert("_id".to_string(), json!("abc123"));
        let store = MemoryStore::with_documents(vec![doc]);

        let results = store.find(&QueryFilter::empty()).await.unwrap();

        assert_eq!(results.len(), 1);
        assert!(!results[0].contains_key("_id"));
        assert!(results[0].contains_key("Name"));
    }

    #[tokio::test]
    async fn test_find_preserves_insertion_order() {
        let store = MemoryStore::with_documents(vec![
            product("C", 10),
            product("A", 30),
            product("B", 20),
        ]);

        let results = store.find(&QueryFilter::empty()).await.unwrap();

        let names: Vec<_> = results.iter().map(|d| d.get("Name").unwrap()).collect();
        assert_eq!(names, vec![&json!("C"), &json!("A"), &json!("B")]);
    }
}
