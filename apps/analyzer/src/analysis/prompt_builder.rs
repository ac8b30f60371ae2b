use crate::analysis::prompts::FEATURE_SENTIMENT_PROMPT;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{ChatMessage, ChatRequest};

/// Renders the extraction prompt for one review into a request ready to send.
///
/// The review is substituted last so review text that happens to contain
/// `{format_instructions}` is never expanded.
pub fn build(review_text: &str, formatting_instructions: &str) -> ChatRequest {
    debug_assert!(!review_text.trim().is_empty(), "blank reviews are filtered on input");

    let prompt = FEATURE_SENTIMENT_PROMPT
        .replace("{format_instructions}", formatting_instructions)
        .replace("{review}", review_text);

    ChatRequest {
        messages: vec![ChatMessage::system(JSON_ONLY_SYSTEM), ChatMessage::user(prompt)],
    }
}
