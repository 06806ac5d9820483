//! Configuration management for askdb.
//!
//! Handles loading configuration from a TOML file, with store and LLM
//! settings falling back to built-in defaults when absent.

use crate::error::{AskdbError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for askdb.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Document store configuration.
    #[serde(default)]
    pub store: StoreConfig,

    /// LLM provider configuration.
    #[serde(default)]
    pub llm: LlmConfig,
}

/// Document store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// MongoDB connection URI.
    #[serde(default = "default_store_url")]
    pub url: String,

    /// Database name.
    #[serde(default = "default_database")]
    pub database: String,

    /// Collection name.
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_store_url() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database() -> String {
    "askdb".to_string()
}

fn default_collection() -> String {
    "products".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: default_store_url(),
            database: default_database(),
            collection: default_collection(),
        }
    }
}

/// LLM provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// LLM provider: "ollama" or "mock".
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Base URL of the local model server.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model name (e.g., "llama2:7b-chat").
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_provider() -> String {
    "ollama".to_string()
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama2:7b-chat".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Returns the default config file path (working directory).
    pub fn default_path() -> PathBuf {
        PathBuf::from("askdb.toml")
    }

    /// Loads configuration from a TOML file.
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| AskdbError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            AskdbError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.store.url, "mongodb://localhost:27017");
        assert_eq!(config.store.database, "askdb");
        assert_eq!(config.store.collection, "products");
        assert_eq!(config.llm.provider, "ollama");
        assert_eq!(config.llm.timeout_secs, 120);
    }

    #[test]
    fn test_parse_full_toml() {
        let content = r#"
[store]
url = "mongodb://db-host:27017"
database = "inventory"
collection = "items"

[llm]
provider = "ollama"
base_url = "http://model-host:11434"
model = "mistral:7b"
timeout_secs = 30
"#;
        let config = Config::parse_toml(content, Path::new("askdb.toml")).unwrap();

        assert_eq!(config.store.url, "mongodb://db-host:27017");
        assert_eq!(config.store.database, "inventory");
        assert_eq!(config.store.collection, "items");
        assert_eq!(config.llm.model, "mistral:7b");
        assert_eq!(config.llm.timeout_secs, 30);
    }

    #[test]
    fn test_parse_partial_toml_uses_defaults() {
        let content = r#"
[llm]
model = "llama3:8b"
"#;
        let config = Config::parse_toml(content, Path::new("askdb.toml")).unwrap();

        assert_eq!(config.store.url, "mongodb://localhost:27017");
        assert_eq!(config.llm.model, "llama3:8b");
        assert_eq!(config.llm.provider, "ollama");
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = Config::parse_toml("not [valid toml", Path::new("askdb.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("askdb.toml"));
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let config = Config::load_from_file(Path::new("/nonexistent/askdb.toml")).unwrap();
        assert_eq!(config.store.database, "askdb");
    }
}
