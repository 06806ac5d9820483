//! Error types for askdb.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for askdb operations.
#[derive(Error, Debug)]
pub enum AskdbError {
    /// Store errors (connection refused, insert failed, bad filter, etc.)
    #[error("Store error: {0}")]
    Store(String),

    /// LLM errors (server unreachable, timeouts, bad responses, etc.)
    #[error("LLM error: {0}")]
    Llm(String),

    /// Query validation errors (model output is not a JSON filter, etc.)
    #[error("Query error: {0}")]
    Query(String),

    /// CSV ingest errors (missing file, malformed rows, etc.)
    #[error("Ingest error: {0}")]
    Ingest(String),

    /// Output errors (query log or result file could not be written)
    #[error("Output error: {0}")]
    Output(String),

    /// Configuration errors (invalid config file, unknown provider, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AskdbError {
    /// Creates a store error with the given message.
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Creates an LLM error with the given message.
    pub fn llm(msg: impl Into<String>) -> Self {
        Self::Llm(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates an ingest error with the given message.
    pub fn ingest(msg: impl Into<String>) -> Self {
        Self::Ingest(msg.into())
    }

    /// Creates an output error with the given message.
    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Store(_) => "Store Error",
            Self::Llm(_) => "LLM Error",
            Self::Query(_) => "Query Error",
            Self::Ingest(_) => "Ingest Error",
            Self::Output(_) => "Output Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using AskdbError.
pub type Result<T> = std::result::Result<T, AskdbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_store() {
        let err = AskdbError::store("Cannot connect to localhost:27017");
        assert_eq!(
            err.to_string(),
            "Store error: Cannot connect to localhost:27017"
        );
        assert_eq!(err.category(), "Store Error");
    }

    #[test]
    fn test_error_display_llm() {
        let err = AskdbError::llm("Request timed out");
        assert_eq!(err.to_string(), "LLM error: Request timed out");
        assert_eq!(err.category(), "LLM Error");
    }

    #[test]
    fn test_error_display_query() {
        let err = AskdbError::query("model output is not a JSON object");
        assert_eq!(
            err.to_string(),
            "Query error: model output is not a JSON object"
        );
        assert_eq!(err.category(), "Query Error");
    }

    #[test]
    fn test_error_display_ingest() {
        let err = AskdbError::ingest("sample_data.csv not found");
        assert_eq!(err.to_string(), "Ingest error: sample_data.csv not found");
        assert_eq!(err.category(), "Ingest Error");
    }

    #[test]
    fn test_error_display_output() {
        let err = AskdbError::output("failed to write result_1.csv");
        assert_eq!(err.to_string(), "Output error: failed to write result_1.csv");
        assert_eq!(err.category(), "Output Error");
    }

    #[test]
    fn test_error_display_config() {
        let err = AskdbError::config("unknown LLM provider 'gpt'");
        assert_eq!(
            err.to_string(),
            "Configuration error: unknown LLM provider 'gpt'"
        );
        assert_eq!(err.category(), "Configuration Error");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AskdbError>();
    }
}
