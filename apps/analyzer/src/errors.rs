use std::fmt;

use thiserror::Error;

use crate::analysis::extractor::ParseError;
use crate::llm_client::LlmError;

/// Lifecycle of one review: `Prompted → Invoked → Extracted → Stored`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Prompted,
    Invoked,
    Extracted,
    Stored,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Why a single review contributed nothing to the batch.
///
/// Every variant is recoverable: the pipeline logs it and moves to the next review.
/// Prompt building cannot fail, and store failures are absorbed by the store sink,
/// so only the `Invoked` and `Extracted` transitions produce a `ReviewError`.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("model invocation failed: {0}")]
    Invocation(#[from] LlmError),

    #[error("response could not be parsed: {0}")]
    Parse(#[from] ParseError),
}

impl ReviewError {
    /// The transition that failed.
    pub fn stage(&self) -> Stage {
        match self {
            ReviewError::Invocation(_) => Stage::Invoked,
            ReviewError::Parse(_) => Stage::Extracted,
        }
    }
}
