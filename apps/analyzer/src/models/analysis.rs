use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key holding the list of extracted features.
pub const FEATURES_KEY: &str = "features";
/// Key holding the original review text attached after parsing.
pub const REVIEW_KEY: &str = "review";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sentiment::ALL
            .into_iter()
            .find(|sentiment| sentiment.as_str() == s)
            .ok_or_else(|| format!("unknown sentiment '{s}'"))
    }
}

/// One `{feature, sentiment}` pair as declared by the output schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSentiment {
    pub feature: String,
    pub sentiment: Sentiment,
}

/// The parsed, schema-shaped document for one review.
///
/// Kept as a JSON object rather than a fixed struct: the model is prompted into the
/// schema but not forced into it, so extra keys and (under the lenient policy)
/// off-schema entries are carried through to the store and output log untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnalysisResult(Map<String, Value>);

impl AnalysisResult {
    pub fn from_document(document: Map<String, Value>) -> Self {
        Self(document)
    }

    pub fn document(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn features(&self) -> Option<&Vec<Value>> {
        self.0.get(FEATURES_KEY).and_then(Value::as_array)
    }

    pub fn features_mut(&mut self) -> Option<&mut Vec<Value>> {
        self.0.get_mut(FEATURES_KEY).and_then(Value::as_array_mut)
    }

    /// Entries that conform to `{feature: string, sentiment: enum}`.
    pub fn typed_features(&self) -> Vec<FeatureSentiment> {
        self.features()
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|e| serde_json::from_value(e.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Attaches provenance: the original review text, overwriting any `review` key
    /// the model may have emitted.
    pub fn attach_review(&mut self, text: &str) {
        self.0
            .insert(REVIEW_KEY.to_string(), Value::String(text.to_string()));
    }

    pub fn review(&self) -> Option<&str> {
        self.0.get(REVIEW_KEY).and_then(Value::as_str)
    }

    /// Compact single-line JSON rendering used for the output log.
    pub fn to_log_line(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }
}
