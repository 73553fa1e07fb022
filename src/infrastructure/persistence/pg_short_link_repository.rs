//! PostgreSQL implementation of short link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;

const RETURNING_COLUMNS: &str = "id, slug, destination, custom, created_at";

#[derive(Debug, sqlx::FromRow)]
struct ShortLinkRow {
    id: i64,
    slug: String,
    destination: String,
    custom: bool,
    created_at: DateTime<Utc>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(row: ShortLinkRow) -> Self {
        ShortLink::new(row.id, row.slug, row.destination, row.custom, row.created_at)
    }
}

/// PostgreSQL repository for short links.
///
/// Uniqueness is enforced by the `index_short_links_on_slug_lower` index, so
/// concurrent inserts of `GitHub` and `github` cannot both succeed.
pub struct PgShortLinkRepository {
    pool: Arc<PgPool>,
}

impl PgShortLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Applies the bundled migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

#[async_trait]
impl ShortLinkRepository for PgShortLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let sql = format!(
            "INSERT INTO short_links (slug, destination, custom) VALUES ($1, $2, $3) \
             RETURNING {RETURNING_COLUMNS}"
        );

        let row = sqlx::query_as::<_, ShortLinkRow>(&sql)
            .bind(&new_link.slug)
            .bind(&new_link.destination)
            .bind(new_link.custom)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| match AppError::from(e) {
                AppError::SlugTaken(_) => AppError::SlugTaken(new_link.slug.clone()),
                other => other,
            })?;

        Ok(row.into())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ShortLink>, AppError> {
        let sql = format!(
            "SELECT {RETURNING_COLUMNS} FROM short_links WHERE LOWER(slug) = LOWER($1)"
        );

        let row = sqlx::query_as::<_, ShortLinkRow>(&sql)
            .bind(slug)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(ShortLink::from))
    }

    async fn max_assigned_id(&self) -> Result<i64, AppError> {
        let max_id: i64 = sqlx::query_scalar("SELECT COALESCE(MAX(id), 0) FROM short_links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(max_id)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<ShortLink>, AppError> {
        let sql = format!(
            "SELECT {RETURNING_COLUMNS} FROM short_links \
             ORDER BY created_at DESC, id DESC LIMIT $1"
        );

        let rows = sqlx::query_as::<_, ShortLinkRow>(&sql)
            .bind(limit)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(ShortLink::from).collect())
    }
}
