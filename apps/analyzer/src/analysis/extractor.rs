//! Response extraction: turns free model text into a schema-shaped document.

use serde_json::Value;
use thiserror::Error;

use crate::llm_client::LlmResponse;
use crate::models::AnalysisResult;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("response is not valid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("response JSON is not an object")]
    NotAnObject,

    #[error("response has no \"features\" key")]
    MissingFeatures,

    #[error("\"features\" is not a list")]
    FeaturesNotAList,
}

/// Strips a surrounding code fence (```` ``` ```` with an optional language tag) from
/// model output. Text without fences is returned trimmed.
pub fn strip_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest
        .trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        .trim();
    rest.strip_suffix("```").map(str::trim_end).unwrap_or(rest)
}

/// Parses a model response as a JSON object.
///
/// Only syntax and the top-level object shape are checked here; whether the
/// document carries a usable `features` list is for the caller to decide.
pub fn extract(raw: &LlmResponse) -> Result<AnalysisResult, ParseError> {
    match serde_json::from_str::<Value>(strip_fences(&raw.content))? {
        Value::Object(document) => Ok(AnalysisResult::from_document(document)),
        _ => Err(ParseError::NotAnObject),
    }
}
