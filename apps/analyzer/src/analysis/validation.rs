//! Post-parse structural checks on an extracted document.
//!
//! The model is prompted into the schema, not forced into it. `require_features`
//! is always enforced; per-entry conformance is governed by `SentimentPolicy`.

use std::str::FromStr;

use serde_json::Value;
use tracing::warn;

use crate::analysis::extractor::ParseError;
use crate::models::analysis::FEATURES_KEY;
use crate::models::{AnalysisResult, Review, Sentiment};

/// What to do with feature entries that do not match `{feature, sentiment}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SentimentPolicy {
    /// Keep off-schema entries as the model emitted them, with a warning.
    #[default]
    Lenient,
    /// Drop off-schema entries before the result is stored or logged.
    Strict,
}

impl FromStr for SentimentPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(SentimentPolicy::Lenient),
            "strict" => Ok(SentimentPolicy::Strict),
            other => Err(format!("expected 'lenient' or 'strict', got '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub off_schema: usize,
    pub removed: usize,
}

/// Rejects documents that do not expose a `features` list.
pub fn require_features(result: &AnalysisResult) -> Result<(), ParseError> {
    match result.document().get(FEATURES_KEY) {
        None => Err(ParseError::MissingFeatures),
        Some(Value::Array(_)) => Ok(()),
        Some(_) => Err(ParseError::FeaturesNotAList),
    }
}

/// Applies `policy` to every feature entry, logging each off-schema one.
pub fn apply_policy(
    policy: SentimentPolicy,
    result: &mut AnalysisResult,
    review: &Review,
) -> ValidationReport {
    let Some(entries) = result.features_mut() else {
        return ValidationReport::default();
    };

    let mut report = ValidationReport::default();
    entries.retain(|entry| {
        let Some(issue) = entry_issue(entry) else {
            return true;
        };
        report.off_schema += 1;
        match policy {
            SentimentPolicy::Lenient => {
                warn!("Review line {}: passing through off-schema entry {entry} ({issue})", review.line);
                true
            }
            SentimentPolicy::Strict => {
                warn!("Review line {}: dropping off-schema entry {entry} ({issue})", review.line);
                report.removed += 1;
                false
            }
        }
    });
    report
}

fn entry_issue(entry: &Value) -> Option<String> {
    let Some(object) = entry.as_object() else {
        return Some("entry is not an object".to_string());
    };
    if !object.get("feature").is_some_and(Value::is_string) {
        return Some("missing feature name".to_string());
    }
    match object.get("sentiment").and_then(Value::as_str) {
        None => Some("missing sentiment".to_string()),
        Some(s) if Sentiment::from_str(s).is_err() => Some(format!(
            "sentiment '{s}' is not one of positive, negative, neutral"
        )),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result_from(value: Value) -> AnalysisResult {
        match value {
            Value::Object(map) => AnalysisResult::from_document(map),
            other => panic!("expected object, got {other}"),
        }
    }

    fn review() -> Review {
        Review::from_line(1, "Screen is ok, price is whatever.").unwrap()
    }

    fn mixed() -> AnalysisResult {
        result_from(json!({
            "features": [
                {"feature": "screen", "sentiment": "neutral"},
                {"feature": "price", "sentiment": "mixed"},
                {"sentiment": "positive"},
                "battery"
            ]
        }))
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("strict".parse::<SentimentPolicy>(), Ok(SentimentPolicy::Strict));
        assert_eq!(" Lenient ".parse::<SentimentPolicy>(), Ok(SentimentPolicy::Lenient));
        assert!("loose".parse::<SentimentPolicy>().is_err());
    }

    #[test]
    fn test_require_features_accepts_list() {
        assert!(require_features(&result_from(json!({"features": []}))).is_ok());
    }

    #[test]
    fn test_require_features_rejects_missing_key() {
        let err = require_features(&result_from(json!({"aspects": []}))).unwrap_err();
        assert!(matches!(err, ParseError::MissingFeatures));
    }

    #[test]
    fn test_require_features_rejects_non_list() {
        let err = require_features(&result_from(json!({"features": "battery"}))).unwrap_err();
        assert!(matches!(err, ParseError::FeaturesNotAList));
    }

    #[test]
    fn test_lenient_passes_everything_through() {
        let mut result = mixed();
        let report = apply_policy(SentimentPolicy::Lenient, &mut result, &review());
        assert_eq!(report, ValidationReport { off_schema: 3, removed: 0 });
        assert_eq!(result.features().unwrap().len(), 4);
    }

    #[test]
    fn test_strict_drops_off_schema_entries() {
        let mut result = mixed();
        let report = apply_policy(SentimentPolicy::Strict, &mut result, &review());
        assert_eq!(report, ValidationReport { off_schema: 3, removed: 3 });
        assert_eq!(
            result.features().unwrap(),
            &vec![json!({"feature": "screen", "sentiment": "neutral"})]
        );
    }

    #[test]
    fn test_strict_is_case_sensitive() {
        let mut result = result_from(json!({
            "features": [{"feature": "camera", "sentiment": "Negative"}]
        }));
        let report = apply_policy(SentimentPolicy::Strict, &mut result, &review());
        assert_eq!(report.removed, 1);
        assert!(result.features().unwrap().is_empty());
    }

    #[test]
    fn test_conforming_document_is_untouched() {
        let mut result = result_from(json!({
            "features": [{"feature": "camera", "sentiment": "negative"}]
        }));
        let before = result.clone();
        let report = apply_policy(SentimentPolicy::Strict, &mut result, &review());
        assert_eq!(report, ValidationReport::default());
        assert_eq!(result, before);
    }
}
