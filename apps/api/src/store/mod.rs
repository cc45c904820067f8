//! Append-only log of past analyses.
//!
//! Access goes through the narrow `ResultStore` trait so the backing engine
//! can be swapped without touching the pipeline. The production backend is a
//! single SQLite table; one INSERT per append, no UPDATE or DELETE paths.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::info;

use crate::models::analysis::{AnalysisResult, HistoryEntry};

#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Records one completed analysis. Atomic: either the full row lands or
    /// nothing does.
    async fn append(&self, result: &AnalysisResult) -> Result<()>;

    /// Returns at most `limit` entries, newest first.
    async fn recent(&self, limit: i64) -> Result<Vec<HistoryEntry>>;
}

pub struct SqliteResultStore {
    pool: SqlitePool,
}

impl SqliteResultStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResultStore for SqliteResultStore {
    async fn append(&self, result: &AnalysisResult) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO analysis_results
                (filename, skills, job_description, match_percentage, analysis_date)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&result.filename)
        .bind(result.skills.join(","))
        .bind(&result.job_description)
        .bind(result.match_percentage)
        .bind(result.analysis_date)
        .execute(&self.pool)
        .await?;

        info!("Analysis saved for file: {}", result.filename);
        Ok(())
    }

    async fn recent(&self, limit: i64) -> Result<Vec<HistoryEntry>> {
        let entries = sqlx::query_as::<_, HistoryEntry>(
            r#"
            SELECT id, filename, skills, job_description, match_percentage, analysis_date
            FROM analysis_results
            ORDER BY analysis_date DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
