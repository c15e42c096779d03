//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink, OwnerFilter, PrincipalId};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for link storage and retrieval.
///
/// Each method is a single statement, so writes are atomic and cancelling a
/// call never leaves a partial record behind. The click counter is advanced
/// with `clicks = clicks + 1` inside the `UPDATE`, which Postgres serialises
/// per row.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    code: String,
    long_url: String,
    short_url: String,
    owner_id: Option<String>,
    clicks: i64,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(
            row.id,
            row.code,
            row.long_url,
            row.short_url,
            row.owner_id.map(PrincipalId::from),
            row.clicks,
            row.created_at,
        )
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (code, long_url, short_url, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, code, long_url, short_url, owner_id, clicks, created_at
            "#,
        )
        .bind(new_link.code)
        .bind(new_link.long_url)
        .bind(new_link.short_url)
        .bind(new_link.owner_id.map(PrincipalId::into_inner))
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, code, long_url, short_url, owner_id, clicks, created_at
            FROM links
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn find_by_long_url(
        &self,
        long_url: &str,
        owner: OwnerFilter,
    ) -> Result<Option<Link>, AppError> {
        let row = match owner {
            OwnerFilter::Any => {
                sqlx::query_as::<_, LinkRow>(
                    r#"
                    SELECT id, code, long_url, short_url, owner_id, clicks, created_at
                    FROM links
                    WHERE long_url = $1
                    ORDER BY created_at, id
                    LIMIT 1
                    "#,
                )
                .bind(long_url)
                .fetch_optional(self.pool.as_ref())
                .await?
            }
            OwnerFilter::Exactly(Some(owner_id)) => {
                sqlx::query_as::<_, LinkRow>(
                    r#"
                    SELECT id, code, long_url, short_url, owner_id, clicks, created_at
                    FROM links
                    WHERE long_url = $1 AND owner_id = $2
                    ORDER BY created_at, id
                    LIMIT 1
                    "#,
                )
                .bind(long_url)
                .bind(owner_id.into_inner())
                .fetch_optional(self.pool.as_ref())
                .await?
            }
            OwnerFilter::Exactly(None) => {
                sqlx::query_as::<_, LinkRow>(
                    r#"
                    SELECT id, code, long_url, short_url, owner_id, clicks, created_at
                    FROM links
                    WHERE long_url = $1 AND owner_id IS NULL
                    ORDER BY created_at, id
                    LIMIT 1
                    "#,
                )
                .bind(long_url)
                .fetch_optional(self.pool.as_ref())
                .await?
            }
        };

        Ok(row.map(Link::from))
    }

    async fn increment_clicks(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            UPDATE links
            SET clicks = clicks + 1
            WHERE code = $1
            RETURNING id, code, long_url, short_url, owner_id, clicks, created_at
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn list_by_owner(&self, owner: &PrincipalId) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, code, long_url, short_url, owner_id, clicks, created_at
            FROM links
            WHERE owner_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(owner.as_str())
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
