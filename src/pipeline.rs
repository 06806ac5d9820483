//! The question-processing pipeline.
//!
//! Orchestrates the full sequence per question: prompt construction, model
//! invocation, validation, query execution, and result persistence. The
//! store and model handles are passed in explicitly; the pipeline owns no
//! global state.

use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{AskdbError, Result};
use crate::ingest;
use crate::llm::{build_query_prompt, LlmClient};
use crate::query::QueryFilter;
use crate::report::{write_results, QueryLog};
use crate::store::StoreClient;

/// Name of the generated-query log file.
pub const QUERY_LOG_FILE: &str = "queries_generated.txt";

/// The built-in example questions, processed when no ad-hoc question is
/// given.
pub fn default_questions() -> Vec<String> {
    vec![
        "Find all products with a rating below 4.5 that have more than 200 reviews and are \
         offered by the brand 'Nike' or 'Sony'."
            .to_string(),
        "Which products in the Electronics category have a rating of 4.5 or higher and are in \
         stock?"
            .to_string(),
        "List products launched after January 1, 2022, in the Home & Kitchen or Sports \
         categories with a discount of 10% or more, sorted by price in descending order."
            .to_string(),
    ]
}

/// Outcome counters for a pipeline run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Questions that produced a valid query and were executed.
    pub processed: usize,
    /// Questions skipped because no valid query was generated.
    pub skipped: usize,
    /// Result files actually written (empty result sets write none).
    pub files_written: usize,
}

/// Runs the full pipeline: load the CSV once, then process each question in
/// order.
///
/// A CSV load failure is fatal. Model and store failures are per-question:
/// the question is skipped (model error or unparseable output) or proceeds
/// with an empty result set (store error), and the run continues.
pub async fn run(
    store: &dyn StoreClient,
    llm: &dyn LlmClient,
    input: &Path,
    questions: &[String],
    output_dir: &Path,
) -> Result<RunSummary> {
    ingest::load_csv(store, input).await?;

    let mut log = QueryLog::create(&output_dir.join(QUERY_LOG_FILE))?;
    let mut summary = RunSummary::default();

    for (i, question) in questions.iter().enumerate() {
        let index = i + 1;
        info!("Processing question {index}: {question}");

        let prompt = build_query_prompt(question);
        info!("Calling the model to generate a query...");

        let raw = match llm.generate(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Question {index} failed: {e}");
                summary.skipped += 1;
                continue;
            }
        };
        debug!("Raw model output: {raw}");

        let filter = QueryFilter::from_response(&raw);
        if filter.is_empty() {
            warn!("Question {index} failed! No valid query generated.");
            summary.skipped += 1;
            continue;
        }

        log.record(index, &filter)?;
        info!("Generated query {index}: {filter}");

        // Store errors are swallowed here: log and continue with no rows.
        let results = match store.find(&filter).await {
            Ok(results) => {
                info!("{} matching records found", results.len());
                results
            }
            Err(e) => {
                warn!("Error executing query: {e}");
                Vec::new()
            }
        };

        let result_path = output_dir.join(format!("result_{index}.csv"));
        if write_results(&results, &result_path)? {
            summary.files_written += 1;
        }
        summary.processed += 1;
    }

    let csv_files = list_csv_files(output_dir)?;
    info!("CSV files generated: {csv_files:?}");
    info!("All questions processed.");

    Ok(summary)
}

/// Lists the CSV files present in the output directory, sorted by name.
///
/// A post-run sanity check, logged only.
pub fn list_csv_files(dir: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| AskdbError::output(format!("Failed to read {}: {e}", dir.display())))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| AskdbError::output(format!("Failed to read dir entry: {e}")))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".csv") {
            files.push(name);
        }
    }
    files.sort();
    Ok(files)
}
