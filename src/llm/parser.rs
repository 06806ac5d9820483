//! Response parsing for LLM outputs.
//!
//! Models are instructed to return bare JSON, but frequently wrap it in
//! markdown code fences or surround it with chatter anyway. This module
//! extracts the JSON candidate; actual validation happens in
//! [`crate::query::QueryFilter`].

/// Extracts the JSON candidate from a raw LLM response.
///
/// Tried in order:
/// - a ```json code block
/// - a ``` code block with no language specifier
/// - the substring from the first `{` to the last `}`
/// - the trimmed response as-is
pub fn extract_json(response: &str) -> String {
    if let Some(block) = extract_code_block(response, "json") {
        return block.trim().to_string();
    }

    if let Some(block) = extract_code_block(response, "") {
        return block.trim().to_string();
    }

    if let (Some(start), Some(end)) = (response.find('{'), response.rfind('}')) {
        if start < end {
            return response[start..=end].to_string();
        }
    }

    response.trim().to_string()
}

/// Extracts content from a markdown code block with the specified language.
///
/// Pass an empty string for `lang` to match blocks without a language
/// specifier.
fn extract_code_block(text: &str, lang: &str) -> Option<String> {
    let start_pattern = if lang.is_empty() {
        "```".to_string()
    } else {
        format!("```{}", lang)
    };

    // Find the start of the code block
    let start_idx = text.find(&start_pattern)?;

    // Find the newline after the opening fence
    let content_start = text[start_idx + start_pattern.len()..]
        .find('\n')
        .map(|i| start_idx + start_pattern.len() + i + 1)?;

    // For generic blocks, make sure it's not actually a language-specific block
    if lang.is_empty() {
        let after_fence = &text[start_idx + 3..content_start - 1];
        // If there's text after ``` before the newline, it's a language specifier
        if !after_fence.trim().is_empty() {
            return None;
        }
    }

    // Find the closing fence
    let end_idx = text[content_start..].find("```")?;

    Some(text[content_start..content_start + end_idx].to_string())
}
