//! Mock LLM client for testing.
//!
//! Provides deterministic responses based on input patterns.

use async_trait::async_trait;

use crate::error::Result;
use crate::llm::LlmClient;

/// Mock LLM client that returns canned responses based on input patterns.
///
/// Used for unit testing without a running model server.
#[derive(Debug, Clone, Default)]
pub struct MockLlmClient {
    /// Custom response mappings (pattern -> response).
    custom_responses: Vec<(String, String)>,
}

impl MockLlmClient {
    /// Creates a new mock client with default responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a custom response mapping.
    ///
    /// When the prompt contains `pattern`, the mock will return `response`.
    pub fn with_response(
        mut self,
        pattern: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        self.custom_responses
            .push((pattern.into(), response.into()));
        self
    }

    /// Generates a mock response based on the prompt.
    ///
    /// Patterns are matched against the interpolated question, not the whole
    /// prompt: the template's worked examples would otherwise match every
    /// request.
    fn mock_response(&self, prompt: &str) -> String {
        let prompt_lower = extract_question(prompt).to_lowercase();

        // Check custom responses first
        for (pattern, response) in &self.custom_responses {
            if prompt_lower.contains(&pattern.to_lowercase()) {
                return response.clone();
            }
        }

        // Default pattern matching
        if prompt_lower.contains("price is greater than 50") {
            return r#"{"Price": {"$gt": 50}}"#.to_string();
        }

        if prompt_lower.contains("rating of 4.5 or higher") && prompt_lower.contains("in stock") {
            return r#"{"Category": "Electronics", "Rating": {"$gte": 4.5}, "InStock": true}"#
                .to_string();
        }

        if prompt_lower.contains("rating below 4.5") && prompt_lower.contains("200 reviews") {
            return concat!(
                r#"{"Rating": {"$lt": 4.5}, "Reviews": {"$gt": 200}, "#,
                r#""$or": [{"Brand": "Nike"}, {"Brand": "Sony"}]}"#
            )
            .to_string();
        }

        if prompt_lower.contains("launched after january 1, 2022") {
            return concat!(
                r#"{"LaunchDate": {"$gt": "2022-01-01"}, "#,
                r#""$or": [{"Category": "Home & Kitchen"}, {"Category": "Sports"}], "#,
                r#""Discount": {"$gte": 10}}"#
            )
            .to_string();
        }

        "I don't understand that question. Could you please rephrase it?".to_string()
    }
}

/// Pulls the quoted question out of a full query-generation prompt.
///
/// Falls back to the whole input when it is not template-shaped, so tests
/// can pass bare questions directly.
fn extract_question(prompt: &str) -> &str {
    prompt
        .split("Now generate a MongoDB query for:")
        .nth(1)
        .and_then(|tail| tail.split('"').nth(1))
        .unwrap_or(prompt)
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        Ok(self.mock_response(prompt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::prompt::build_query_prompt;

    #[tokio::test]
    async fn test_mock_returns_price_filter() {
        let client = MockLlmClient::new();
        let prompt = build_query_prompt("Find products where price is greater than 50");

        let response = client.generate(&prompt).await.unwrap();

        assert_eq!(response, r#"{"Price": {"$gt": 50}}"#);
    }

    #[tokio::test]
    async fn test_mock_covers_default_questions() {
        let client = MockLlmClient::new();

        for question in crate::pipeline::default_questions() {
            let prompt = build_query_prompt(&question);
            let response = client.generate(&prompt).await.unwrap();
            assert!(
                response.trim_start().starts_with('{'),
                "no canned filter for: {question}"
            );
        }
    }

    #[tokio::test]
    async fn test_mock_returns_unknown_response() {
        let client = MockLlmClient::new();

        let response = client
            .generate("What is the meaning of life?")
            .await
            .unwrap();

        assert!(response.contains("don't understand"));
    }

    #[tokio::test]
    async fn test_mock_custom_response() {
        let client =
            MockLlmClient::new().with_response("discounted", r#"{"Discount": {"$gt": 0}}"#);

        let response = client
            .generate("List all discounted products")
            .await
            .unwrap();

        assert_eq!(response, r#"{"Discount": {"$gt": 0}}"#);
    }

    #[test]
    fn test_extract_question_from_template() {
        let prompt = build_query_prompt("Find something specific");
        assert_eq!(extract_question(&prompt), "Find something specific");
    }

    #[test]
    fn test_extract_question_falls_back_to_bare_input() {
        assert_eq!(extract_question("just a question"), "just a question");
    }

    #[test]
    fn test_template_examples_do_not_leak_into_matching() {
        let client = MockLlmClient::new();
        // The template's worked examples mention prices and ratings; an
        // unrelated question must still fall through to the default answer.
        let prompt = build_query_prompt("What is the meaning of life?");
        let response = client.mock_response(&prompt);
        assert!(response.contains("don't understand"));
    }

    #[tokio::test]
    async fn test_mock_case_insensitive() {
        let client = MockLlmClient::new();

        let response = client
            .generate("FIND PRODUCTS WHERE PRICE IS GREATER THAN 50")
            .await
            .unwrap();

        assert_eq!(response, r#"{"Price": {"$gt": 50}}"#);
    }
}
