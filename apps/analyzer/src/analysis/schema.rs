//! Output schema declaration and its prompt-facing rendering.

use serde_json::{json, Value};

use crate::models::analysis::FEATURES_KEY;
use crate::models::Sentiment;

/// Declares the shape every analysis result must take:
/// `{"features": [{"feature": string, "sentiment": "positive" | "negative" | "neutral"}]}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentSchema;

impl SentimentSchema {
    /// JSON Schema for the expected document.
    pub fn json_schema(&self) -> Value {
        let sentiments: Vec<&str> = Sentiment::ALL.iter().map(Sentiment::as_str).collect();
        json!({
            "type": "object",
            "properties": {
                FEATURES_KEY: {
                    "type": "array",
                    "description": "Every product feature mentioned in the review, in order of appearance.",
                    "items": {
                        "type": "object",
                        "properties": {
                            "feature": {
                                "type": "string",
                                "description": "The product feature the reviewer talks about."
                            },
                            "sentiment": {
                                "type": "string",
                                "enum": sentiments,
                                "description": "The sentiment of the review towards this feature. It can be either positive, negative or neutral."
                            }
                        },
                        "required": ["feature", "sentiment"]
                    }
                }
            },
            "required": [FEATURES_KEY]
        })
    }

    /// Natural-language formatting instructions embedding the schema.
    /// Pure: identical output on every call.
    pub fn formatting_instructions(&self) -> String {
        let schema = serde_json::to_string_pretty(&self.json_schema()).unwrap_or_default();
        format!(
            "The output should be formatted as a JSON instance that conforms to the JSON schema below.\n\
             \n\
             As an example, for the review \"Battery life is great but the camera is poor.\" the object \
             {{\"features\": [{{\"feature\": \"battery life\", \"sentiment\": \"positive\"}}, \
             {{\"feature\": \"camera\", \"sentiment\": \"negative\"}}]}} is a well-formatted instance. \
             The object {{\"properties\": {{\"features\": []}}}} is not.\n\
             \n\
             Every \"sentiment\" value must be exactly one of: {}.\n\
             \n\
             Here is the output schema:\n\
             ```\n\
             {schema}\n\
             ```",
            Sentiment::ALL
                .iter()
                .map(|s| format!("\"{s}\""))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
