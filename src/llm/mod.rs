//! LLM integration for askdb.
//!
//! Provides the client trait, provider selection, and implementations for
//! generating query filters from natural-language questions.

pub mod mock;
pub mod ollama;
pub mod parser;
pub mod prompt;

pub use mock::MockLlmClient;
pub use ollama::{OllamaClient, OllamaConfig};
pub use parser::extract_json;
pub use prompt::build_query_prompt;

use async_trait::async_trait;
use std::str::FromStr;

use crate::config::LlmConfig;
use crate::error::Result;

/// Trait for LLM clients that can generate completions.
///
/// The interface is a single text-in/text-out call; the pipeline awaits it
/// immediately, so there is no streaming.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generates a completion for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// LLM provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmProvider {
    /// Local Ollama instance.
    #[default]
    Ollama,
    /// Mock client for testing (no model server required).
    Mock,
}

impl LlmProvider {
    /// Returns the provider as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::Mock => "mock",
        }
    }
}

impl FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "mock" => Ok(Self::Mock),
            _ => Err(format!("Unknown LLM provider: {}", s)),
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Creates an LLM client for the given provider and configuration.
///
/// This is the central factory function for model clients.
pub fn create_client(provider: LlmProvider, config: &LlmConfig) -> Result<Box<dyn LlmClient>> {
    match provider {
        LlmProvider::Ollama => {
            let ollama_config = OllamaConfig::new(config.model.clone())
                .with_url(config.base_url.clone())
                .with_timeout(config.timeout_secs);
            Ok(Box::new(OllamaClient::new(ollama_config)?))
        }
        LlmProvider::Mock => Ok(Box::new(MockLlmClient::new())),
    }
}
