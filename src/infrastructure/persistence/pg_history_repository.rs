//! PostgreSQL implementation of the per-user history.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use super::score_from_db;
use crate::domain::entities::{CheckRecord, InputKind, NewAuditEntry};
use crate::domain::repositories::HistoryRepository;
use crate::error::AppError;

/// PostgreSQL repository for the `checks` table.
pub struct PgHistoryRepository {
    pool: Arc<PgPool>,
}

impl PgHistoryRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CheckRow {
    headline: Option<String>,
    url: Option<String>,
    input: Option<String>,
    source_label: String,
    verdict: String,
    score: i16,
    flags: Vec<String>,
    created_at: DateTime<Utc>,
}

impl From<CheckRow> for CheckRecord {
    fn from(row: CheckRow) -> Self {
        CheckRecord {
            created_at: row.created_at,
            headline: row.headline,
            url: row.url,
            input: row.input,
            score: score_from_db(row.score),
            source_label: row.source_label,
            flags: row.flags,
            verdict: row.verdict,
        }
    }
}

#[async_trait]
impl HistoryRepository for PgHistoryRepository {
    async fn append(&self, user_id: i64, entry: NewAuditEntry) -> Result<(), AppError> {
        let (headline, url) = match entry.input_kind {
            InputKind::Url => (None, Some(entry.input)),
            InputKind::Headline => (Some(entry.input), None),
        };

        sqlx::query(
            r#"
            INSERT INTO checks
                (user_id, headline, url, domain, source_label, verdict, score, flags)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user_id)
        .bind(headline)
        .bind(url)
        .bind(&entry.domain)
        .bind(entry.source_label.as_str())
        .bind(entry.verdict.as_str())
        .bind(i16::from(entry.score))
        .bind(&entry.flags)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn recent_for_user(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<CheckRecord>, AppError> {
        let rows = sqlx::query_as::<_, CheckRow>(
            r#"
            SELECT headline, url, input, source_label, verdict, score, flags, created_at
            FROM checks
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
