//! Review pipeline: runs every review through prompt → invoke → extract → store.
//!
//! Reviews are processed one at a time in input order. A review that fails at any
//! stage is logged and skipped; it never aborts the batch. Store outcomes do not
//! affect the returned results.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::analysis::extractor::extract;
use crate::analysis::prompt_builder;
use crate::analysis::schema::SentimentSchema;
use crate::analysis::validation::{apply_policy, require_features, SentimentPolicy};
use crate::errors::{ReviewError, Stage};
use crate::llm_client::ChatModel;
use crate::models::{AnalysisResult, Review};
use crate::store::StoreSink;

/// A review that produced no result.
#[derive(Debug)]
pub struct ReviewFailure {
    pub line: usize,
    pub error: ReviewError,
}

/// Outcome of one run. `results` keeps input order, successes only.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub results: Vec<AnalysisResult>,
    pub failures: Vec<ReviewFailure>,
    pub store_failures: usize,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.results.len() + self.failures.len()
    }
}

pub struct ReviewPipeline {
    model: Arc<dyn ChatModel>,
    sink: StoreSink,
    policy: SentimentPolicy,
    format_instructions: String,
}

impl ReviewPipeline {
    pub fn new(model: Arc<dyn ChatModel>, sink: StoreSink, policy: SentimentPolicy) -> Self {
        Self {
            model,
            sink,
            policy,
            format_instructions: SentimentSchema.formatting_instructions(),
        }
    }

    pub async fn run(&self, reviews: &[Review]) -> BatchReport {
        info!(
            "Analyzing {} reviews with model {} ({:?} validation)",
            reviews.len(),
            self.model.model(),
            self.policy
        );

        let mut report = BatchReport::default();

        for review in reviews {
            let result = match self.analyze(review).await {
                Ok(result) => result,
                Err(e) => {
                    error!(
                        "Failed to analyze review line {} ({:?}) at {}: {e}",
                        review.line,
                        review.preview(),
                        e.stage()
                    );
                    report.failures.push(ReviewFailure {
                        line: review.line,
                        error: e,
                    });
                    continue;
                }
            };

            if self.sink.store(&result).await {
                debug!("Review line {} {}", review.line, Stage::Stored);
            } else {
                report.store_failures += 1;
            }
            report.results.push(result);
        }

        info!(
            "Batch complete: {} reviews, {} analyzed, {} failed, {} not stored",
            report.total(),
            report.results.len(),
            report.failures.len(),
            report.store_failures
        );
        report
    }

    /// Runs one review up to (not including) the store.
    pub async fn analyze(&self, review: &Review) -> Result<AnalysisResult, ReviewError> {
        let request = prompt_builder::build(&review.text, &self.format_instructions);
        debug!("Review line {} {}: {:?}", review.line, Stage::Prompted, request.messages);

        let response = self.model.invoke(&request).await?;
        debug!("Review line {} {}: {}", review.line, Stage::Invoked, response.content);
        if let Some(usage) = &response.usage {
            debug!(
                "Review line {}: prompt_tokens={}, completion_tokens={}",
                review.line, usage.prompt_tokens, usage.completion_tokens
            );
        }

        let mut result = extract(&response)?;
        require_features(&result)?;
        debug!("Review line {} {}", review.line, Stage::Extracted);

        let validation = apply_policy(self.policy, &mut result, review);
        if validation.off_schema > 0 {
            warn!(
                "Review line {}: {} off-schema entries, {} removed",
                review.line, validation.off_schema, validation.removed
            );
        }

        result.attach_review(&review.text);
        info!(
            "Review line {} analyzed ({} conforming features): {}",
            review.line,
            result.typed_features().len(),
            result.to_log_line()
        );
        Ok(result)
    }
}
