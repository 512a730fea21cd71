//! PostgreSQL implementation of the audit log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use super::score_from_db;
use crate::domain::entities::{CheckRecord, NewAuditEntry};
use crate::domain::repositories::AuditRepository;
use crate::error::AppError;

/// PostgreSQL repository for the append-only `analysis_logs` table.
pub struct PgAuditRepository {
    pool: Arc<PgPool>,
}

impl PgAuditRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LogRow {
    input: String,
    source_label: String,
    verdict: String,
    score: i16,
    flags: Vec<String>,
    created_at: DateTime<Utc>,
}

impl From<LogRow> for CheckRecord {
    fn from(row: LogRow) -> Self {
        CheckRecord {
            created_at: row.created_at,
            headline: None,
            url: None,
            input: Some(row.input),
            score: score_from_db(row.score),
            source_label: row.source_label,
            flags: row.flags,
            verdict: row.verdict,
        }
    }
}

#[async_trait]
impl AuditRepository for PgAuditRepository {
    async fn append(&self, entry: NewAuditEntry) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO analysis_logs
                (user_id, input, input_type, domain, source_label, verdict, score, flags)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(entry.user_id)
        .bind(&entry.input)
        .bind(entry.input_kind.as_str())
        .bind(&entry.domain)
        .bind(entry.source_label.as_str())
        .bind(entry.verdict.as_str())
        .bind(i16::from(entry.score))
        .bind(&entry.flags)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn recent(&self, limit: i64) -> Result<Vec<CheckRecord>, AppError> {
        let rows = sqlx::query_as::<_, LogRow>(
            r#"
            SELECT input, source_label, verdict, score, flags, created_at
            FROM analysis_logs
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_by_verdict(&self) -> Result<Vec<(String, i64)>, AppError> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT verdict, COUNT(*)::BIGINT
            FROM analysis_logs
            GROUP BY verdict
            ORDER BY verdict
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
