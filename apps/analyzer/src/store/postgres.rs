use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::AnalysisResult;
use crate::store::{ResultStore, StoreError};

/// Stores each result as a JSONB document row.
///
/// The table name comes from configuration and is validated there as a plain SQL
/// identifier before it is interpolated into statements.
pub struct PgResultStore {
    pool: PgPool,
    table: String,
}

impl PgResultStore {
    pub fn new(pool: PgPool, table: impl Into<String>) -> Self {
        Self {
            pool,
            table: table.into(),
        }
    }

    /// Creates the results table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(&create_table_sql(&self.table))
            .execute(&self.pool)
            .await?;
        info!("Store table '{}' ready", self.table);
        Ok(())
    }
}

#[async_trait]
impl ResultStore for PgResultStore {
    async fn insert(&self, result: &AnalysisResult) -> Result<(), StoreError> {
        sqlx::query(&insert_sql(&self.table))
            .bind(Uuid::new_v4())
            .bind(result.review().unwrap_or_default())
            .bind(Json(result))
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

fn create_table_sql(table: &str) -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table} (
            id          UUID PRIMARY KEY,
            review      TEXT NOT NULL,
            document    JSONB NOT NULL,
            analyzed_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#
    )
}

fn insert_sql(table: &str) -> String {
    format!("INSERT INTO {table} (id, review, document) VALUES ($1, $2, $3)")
}
