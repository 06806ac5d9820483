//! Prompt construction for query generation.
//!
//! Builds the fixed instructional template the model is asked to complete.
//! The worked examples are hardcoded; they are not derived from the actual
//! collection schema.

/// Prompt template for MongoDB filter generation.
const QUERY_PROMPT_TEMPLATE: &str = r#"You are an AI assistant trained to generate MongoDB queries.
ONLY return the MongoDB query in JSON format. Do NOT add explanations.

## Example Queries:

**Example Input:** Find products where price is greater than 50
**Expected Output (JSON):**
{
    "Price": {"$gt": 50}
}

**Example Input:** Find all products with rating 4.5 or higher
**Expected Output (JSON):**
{
    "Rating": {"$gte": 4.5}
}

Now generate a MongoDB query for:
"{question}"

**Return JSON only! No extra text.**"#;

/// Builds the query-generation prompt for a user question.
pub fn build_query_prompt(question: &str) -> String {
    QUERY_PROMPT_TEMPLATE.replace("{question}", question)
}
