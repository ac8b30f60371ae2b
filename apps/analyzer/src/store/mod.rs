//! Persistence of analysis results.
//!
//! `StoreSink` is what the pipeline talks to: fire-and-forget, never fails.
//! `ResultStore` is the backend seam; `PgResultStore` is the production backend.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info};

use crate::models::AnalysisResult;

pub mod postgres;

pub use postgres::PgResultStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn insert(&self, result: &AnalysisResult) -> Result<(), StoreError>;
}

pub struct StoreSink {
    store: Arc<dyn ResultStore>,
}

impl StoreSink {
    pub fn new(store: Arc<dyn ResultStore>) -> Self {
        Self { store }
    }

    /// Inserts one result. Failures are logged with the attempted document and
    /// reported only through the returned flag; nothing is retried.
    pub async fn store(&self, result: &AnalysisResult) -> bool {
        match self.store.insert(result).await {
            Ok(()) => {
                info!("Stored result: {}", result.to_log_line());
                true
            }
            Err(e) => {
                error!("Failed to store result {}: {e}", result.to_log_line());
                false
            }
        }
    }
}
