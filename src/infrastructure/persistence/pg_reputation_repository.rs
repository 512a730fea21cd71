//! PostgreSQL implementation of the reputation repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewReputation, ReputationRecord, TrustLabel};
use crate::domain::repositories::ReputationRepository;
use crate::error::AppError;

/// PostgreSQL repository for the `sources` table.
pub struct PgReputationRepository {
    pool: Arc<PgPool>,
}

impl PgReputationRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SourceRow {
    id: i64,
    domain: String,
    label: String,
    notes: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SourceRow> for ReputationRecord {
    fn from(row: SourceRow) -> Self {
        // The CHECK constraint keeps labels valid; anything else reads as Unknown.
        let label = row.label.parse().unwrap_or(TrustLabel::Unknown);

        ReputationRecord {
            id: row.id,
            domain: row.domain,
            label,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ReputationRepository for PgReputationRepository {
    async fn find_by_domain(&self, domain: &str) -> Result<Option<ReputationRecord>, AppError> {
        let row = sqlx::query_as::<_, SourceRow>(
            r#"
            SELECT id, domain, label, notes, created_at, updated_at
            FROM sources
            WHERE domain = $1
            "#,
        )
        .bind(domain)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn upsert(&self, record: NewReputation) -> Result<ReputationRecord, AppError> {
        let row = sqlx::query_as::<_, SourceRow>(
            r#"
            INSERT INTO sources (domain, label, notes)
            VALUES ($1, $2, $3)
            ON CONFLICT (domain) DO UPDATE SET
                label      = EXCLUDED.label,
                notes      = EXCLUDED.notes,
                updated_at = NOW()
            RETURNING id, domain, label, notes, created_at, updated_at
            "#,
        )
        .bind(&record.domain)
        .bind(record.label.as_str())
        .bind(&record.notes)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn list(&self) -> Result<Vec<ReputationRecord>, AppError> {
        let rows = sqlx::query_as::<_, SourceRow>(
            r#"
            SELECT id, domain, label, notes, created_at, updated_at
            FROM sources
            ORDER BY domain
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, domain: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM sources WHERE domain = $1")
            .bind(domain)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
