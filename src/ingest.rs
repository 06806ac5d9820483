//! CSV ingestion into the document store.
//!
//! Loads a delimited file with a header row into the collection. The load is
//! idempotent per run: if the collection already holds any document it is a
//! no-op. Cell values are untyped in the file, so each one is inferred as
//! integer, float, boolean, or string.

use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{AskdbError, Result};
use crate::store::{Document, StoreClient};

/// Loads the CSV file into the store unless it is already populated.
///
/// Returns the number of inserted documents (0 when skipped). Read errors
/// propagate; the caller treats them as fatal.
pub async fn load_csv(store: &dyn StoreClient, path: &Path) -> Result<usize> {
    if store.count().await? > 0 {
        warn!("Data already exists in the store. Skipping import.");
        return Ok(0);
    }

    let documents = read_csv(path)?;
    let inserted = store.insert_many(documents).await?;
    info!("{inserted} records successfully loaded into the store.");
    Ok(inserted)
}

/// Reads all rows of a CSV file into schema-free documents.
///
/// Column names come from the header row; they are not validated. Empty
/// cells are omitted from the document.
pub fn read_csv(path: &Path) -> Result<Vec<Document>> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| AskdbError::ingest(format!("Failed to open {}: {e}", path.display())))?;

    let headers = reader
        .headers()
        .map_err(|e| AskdbError::ingest(format!("Failed to read header row: {e}")))?
        .clone();

    let mut documents = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| AskdbError::ingest(format!("Malformed CSV row: {e}")))?;

        let mut doc = Document::new();
        for (header, cell) in headers.iter().zip(record.iter()) {
            if cell.is_empty() {
                continue;
            }
            doc.insert(header.to_string(), infer_value(cell));
        }
        documents.push(doc);
    }

    Ok(documents)
}

/// Infers a typed JSON value from a CSV cell.
fn infer_value(cell: &str) -> Value {
    if let Ok(i) = cell.parse::<i64>() {
        return Value::from(i);
    }
    if let Ok(f) = cell.parse::<f64>() {
        if let Some(number) = serde_json::Number::from_f64(f) {
            return Value::Number(number);
        }
    }
    match cell.to_lowercase().as_str() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(cell.to_string()),
    }
}
