//! Document store abstraction for askdb.
//!
//! Provides a trait-based interface over the collection so the pipeline can
//! run against MongoDB or an in-memory backend interchangeably.

mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use async_trait::async_trait;

use crate::config::StoreConfig;
use crate::error::Result;
use crate::query::QueryFilter;

/// A schema-free key-value record in the store.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Trait defining the interface for document store clients.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Returns the number of documents in the collection.
    async fn count(&self) -> Result<u64>;

    /// Bulk-inserts documents, returning how many were inserted.
    async fn insert_many(&self, documents: Vec<Document>) -> Result<usize>;

    /// Finds all documents matching the filter, in collection order, with
    /// the internal `_id` field stripped.
    ///
    /// The empty filter matches every document.
    async fn find(&self, filter: &QueryFilter) -> Result<Vec<Document>>;
}

/// Connects to the configured MongoDB collection.
///
/// This is the central factory function for store connections.
pub async fn connect(config: &StoreConfig) -> Result<Box<dyn StoreClient>> {
    let client = MongoStore::connect(config).await?;
    Ok(Box::new(client))
}
