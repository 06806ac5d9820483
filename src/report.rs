//! Result persistence: per-question CSV files and the query log.

use serde_json::Value;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{AskdbError, Result};
use crate::query::QueryFilter;
use crate::store::Document;

/// Writes result documents to a CSV file, overwriting any existing file.
///
/// The header is the union of document keys in first-seen order; fields a
/// document lacks are rendered empty. An empty result set writes nothing and
/// returns false.
pub fn write_results(documents: &[Document], path: &Path) -> Result<bool> {
    if documents.is_empty() {
        warn!("No results to save for {}. Skipping.", path.display());
        return Ok(false);
    }

    let headers = collect_headers(documents);

    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AskdbError::output(format!("Failed to create {}: {e}", path.display())))?;

    writer
        .write_record(&headers)
        .map_err(|e| AskdbError::output(format!("Failed to write header: {e}")))?;

    for doc in documents {
        let row: Vec<String> = headers
            .iter()
            .map(|h| doc.get(h).map(render_value).unwrap_or_default())
            .collect();
        writer
            .write_record(&row)
            .map_err(|e| AskdbError::output(format!("Failed to write row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AskdbError::output(format!("Failed to flush {}: {e}", path.display())))?;

    info!("Results saved to {}", path.display());
    Ok(true)
}

/// Collects the union of document keys in first-seen order.
fn collect_headers(documents: &[Document]) -> Vec<String> {
    let mut headers = Vec::new();
    for doc in documents {
        for key in doc.keys() {
            if !headers.iter().any(|h| h == key) {
                headers.push(key.clone());
            }
        }
    }
    headers
}

/// Renders a JSON value as a CSV cell.
fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        // Numbers, booleans, and the odd nested value keep their JSON form.
        other => other.to_string(),
    }
}

/// Append-only log of successfully generated queries, fresh per run.
pub struct QueryLog {
    file: File,
}

impl QueryLog {
    /// Creates (or truncates) the log file.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .map_err(|e| AskdbError::output(format!("Failed to create {}: {e}", path.display())))?;
        Ok(Self { file })
    }

    /// Appends one generated query, numbered 1-based.
    pub fn record(&mut self, index: usize, filter: &QueryFilter) -> Result<()> {
        writeln!(self.file, "Query {}: {}", index, filter.to_canonical_string())
            .map_err(|e| AskdbError::output(format!("Failed to write query log: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_empty_results_write_no_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("result_1.csv");

        let written = write_results(&[], &path).unwrap();

        assert!(!written);
        assert!(!path.exists());
    }

    #[test]
    fn test_writes_header_plus_data_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("result_1.csv");
        let documents = vec![
            doc(json!({"Name": "Widget", "Price": 60})),
            doc(json!({"Name": "Gadget", "Price": 40})),
        ];

        assert!(write_results(&documents, &path).unwrap());

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Name,Price");
        assert_eq!(lines[1], "Widget,60");
        assert_eq!(lines[2], "Gadget,40");
    }

    #[test]
    fn test_header_is_union_in_first_seen_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("result_1.csv");
        let documents = vec![
            doc(json!({"Name": "Widget", "Price": 60})),
            doc(json!({"Name": "Gadget", "Rating": 4.5})),
        ];

        write_results(&documents, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], "Name,Price,Rating");
        assert_eq!(lines[1], "Widget,60,");
        assert_eq!(lines[2], "Gadget,,4.5");
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("result_1.csv");
        std::fs::write(&path, "stale,content\n1,2\n3,4\n").unwrap();

        write_results(&[doc(json!({"Name": "Widget"}))], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("stale"));
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&json!("Nike")), "Nike");
        assert_eq!(render_value(&json!(60)), "60");
        assert_eq!(render_value(&json!(4.5)), "4.5");
        assert_eq!(render_value(&json!(true)), "true");
        assert_eq!(render_value(&json!(null)), "");
    }

    #[test]
    fn test_query_log_records_and_truncates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("queries_generated.txt");
        std::fs::write(&path, "Query 9: leftover from a previous run\n").unwrap();

        let mut log = QueryLog::create(&path).unwrap();
        let first = QueryFilter::parse(r#"{"Price": {"$gt": 50}}"#).unwrap();
        let third = QueryFilter::parse(r#"{"Rating": {"$gte": 4.5}}"#).unwrap();
        log.record(1, &first).unwrap();
        log.record(3, &third).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("leftover"));
        assert_eq!(
            content,
            "Query 1: {\"Price\":{\"$gt\":50}}\nQuery 3: {\"Rating\":{\"$gte\":4.5}}\n"
        );
    }
}
