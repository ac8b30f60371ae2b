// Feature-sentiment extraction prompt. `{format_instructions}` and `{review}` are
// substituted by the prompt builder.

pub const FEATURE_SENTIMENT_PROMPT: &str = r#"Format the user product review into the schema provided to you.

Extract every product feature the user mentions and whether the user liked it or not.
Label each feature's sentiment as either positive, negative or neutral.
There can be multiple features in a single review.

{format_instructions}

Only give the JSON object with "features" as the key and a list of objects containing
"feature" and the corresponding "sentiment". No other text.

The review:

{review}"#;
