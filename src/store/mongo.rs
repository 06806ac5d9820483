//! MongoDB store backend.
//!
//! Wraps the official mongodb driver; documents cross the boundary as JSON
//! objects and are converted to and from BSON at the edge.

use async_trait::async_trait;
use futures::StreamExt;
use mongodb::bson::{self, doc, Document as BsonDocument};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use serde_json::Value;

use super::{Document, StoreClient};
use crate::config::StoreConfig;
use crate::error::{AskdbError, Result};
use crate::query::QueryFilter;

/// MongoDB-backed store client.
pub struct MongoStore {
    collection: Collection<BsonDocument>,
}

impl MongoStore {
    /// Connects to the configured database and collection.
    ///
    /// Pings the server so connection failures surface here rather than on
    /// the first real operation.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let options = ClientOptions::parse(&config.url)
            .await
            .map_err(store_err)?;
        let client = Client::with_options(options).map_err(store_err)?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(store_err)?;

        let collection = client
            .database(&config.database)
            .collection::<BsonDocument>(&config.collection);

        Ok(Self { collection })
    }
}

#[async_trait]
impl StoreClient for MongoStore {
    async fn count(&self) -> Result<u64> {
        self.collection
            .count_documents(doc! {})
            .await
            .map_err(store_err)
    }

    async fn insert_many(&self, documents: Vec<Document>) -> Result<usize> {
        if documents.is_empty() {
            return Ok(0);
        }

        let bson_docs = documents
            .into_iter()
            .map(json_to_bson)
            .collect::<Result<Vec<_>>>()?;

        let result = self
            .collection
            .insert_many(bson_docs)
            .await
            .map_err(store_err)?;

        Ok(result.inserted_ids.len())
    }

    async fn find(&self, filter: &QueryFilter) -> Result<Vec<Document>> {
        let filter_doc = json_to_bson(filter.as_map().clone())?;

        let mut cursor = self
            .collection
            .find(filter_doc)
            .projection(doc! { "_id": 0 })
            .await
            .map_err(store_err)?;

        let mut documents = Vec::new();
        while let Some(item) = cursor.next().await {
            let doc = item.map_err(store_err)?;
            documents.push(bson_to_json(doc)?);
        }

        Ok(documents)
    }
}

fn store_err(e: mongodb::error::Error) -> AskdbError {
    AskdbError::store(e.to_string())
}

/// Converts a JSON object to a BSON document.
fn json_to_bson(map: Document) -> Result<BsonDocument> {
    bson::to_document(&Value::Object(map))
        .map_err(|e| AskdbError::store(format!("JSON to BSON conversion failed: {e}")))
}

/// Converts a BSON document back to a JSON object.
fn bson_to_json(doc: BsonDocument) -> Result<Document> {
    let value = serde_json::to_value(&doc)
        .map_err(|e| AskdbError::store(format!("BSON to JSON conversion failed: {e}")))?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(AskdbError::internal("BSON document was not a JSON object")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> Document {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_json_to_bson_round_trip() {
        let original = as_map(json!({
            "Name": "Widget",
            "Price": 60,
            "Rating": 4.5,
            "InStock": true
        }));

        let bson_doc = json_to_bson(original.clone()).unwrap();
        let round_tripped = bson_to_json(bson_doc).unwrap();

        assert_eq!(round_tripped.get("Name"), Some(&json!("Widget")));
        assert_eq!(round_tripped.get("Price"), Some(&json!(60)));
        assert_eq!(round_tripped.get("Rating"), Some(&json!(4.5)));
        assert_eq!(round_tripped.get("InStock"), Some(&json!(true)));
    }

    #[test]
    fn test_filter_converts_with_operators() {
        let filter = QueryFilter::parse(r#"{"Price": {"$gt": 50}}"#).unwrap();
        let bson_doc = json_to_bson(filter.as_map().clone()).unwrap();

        let inner = bson_doc.get_document("Price").unwrap();
        assert!(inner.contains_key("$gt"));
    }

    #[test]
    fn test_empty_filter_converts_to_empty_document() {
        let bson_doc = json_to_bson(QueryFilter::empty().as_map().clone()).unwrap();
        assert!(bson_doc.is_empty());
    }
}
