// Per-review analysis: schema → prompt → model → extraction → validation.
// All model calls go through the `ChatModel` seam in llm_client.

pub mod extractor;
pub mod pipeline;
pub mod prompt_builder;
pub mod prompts;
pub mod schema;
pub mod validation;
