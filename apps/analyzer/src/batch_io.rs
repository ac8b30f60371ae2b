//! Input list and output log.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::models::{AnalysisResult, Review};

/// Reads one review per line, skipping lines that are blank after trimming.
pub async fn read_reviews(path: &Path) -> Result<Vec<Review>> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read reviews from {}", path.display()))?;
    let reviews = parse_reviews(&contents);
    info!("Read {} reviews from {}", reviews.len(), path.display());
    Ok(reviews)
}

pub fn parse_reviews(contents: &str) -> Vec<Review> {
    contents
        .lines()
        .enumerate()
        .filter_map(|(i, line)| Review::from_line(i + 1, line))
        .collect()
}

/// Writes one JSON line per result, replacing any previous log.
pub async fn write_output_log(path: &Path, results: &[AnalysisResult]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let body: String = results
        .iter()
        .map(|r| format!("{}\n", r.to_log_line()))
        .collect();
    tokio::fs::write(path, body)
        .await
        .with_context(|| format!("Failed to write output log {}", path.display()))?;

    info!("Wrote {} results to {}", results.len(), path.display());
    Ok(())
}
