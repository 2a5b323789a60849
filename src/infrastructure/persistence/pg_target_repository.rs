//! PostgreSQL implementation of the target repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::domain::entities::{NewTarget, ObjectType, SlugTarget};
use crate::domain::repositories::TargetRepository;
use crate::error::AppError;

const TARGET_COLUMNS: &str = "id, object_type, object_id, taxonomy, url, title, status, slug, \
                              campaign_term, focus_keyword, created_at, updated_at";

/// PostgreSQL repository for targets and their slugs.
///
/// Queries are bound at runtime so the crate builds without a live
/// database; the migration in `migrations/` defines the schema.
pub struct PgTargetRepository {
    pool: Arc<PgPool>,
}

impl PgTargetRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn target_from_row(row: &PgRow) -> Result<SlugTarget, AppError> {
    let object_type: String = row.try_get("object_type")?;
    let status: String = row.try_get("status")?;

    Ok(SlugTarget {
        id: row.try_get("id")?,
        object_type: object_type.parse().map_err(|_| {
            AppError::internal("Unknown object type", json!({ "object_type": object_type }))
        })?,
        object_id: row.try_get("object_id")?,
        taxonomy: row.try_get("taxonomy")?,
        url: row.try_get("url")?,
        title: row.try_get("title")?,
        status: status
            .parse()
            .map_err(|_| AppError::internal("Unknown status", json!({ "status": status })))?,
        slug: row.try_get("slug")?,
        campaign_term: row.try_get("campaign_term")?,
        focus_keyword: row.try_get("focus_keyword")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl TargetRepository for PgTargetRepository {
    async fn upsert(&self, new_target: NewTarget) -> Result<SlugTarget, AppError> {
        let sql = format!(
            r#"
            INSERT INTO targets (object_type, object_id, taxonomy, url, title, status,
                                 campaign_term, focus_keyword)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (object_type, object_id) DO UPDATE SET
                taxonomy = EXCLUDED.taxonomy,
                url = EXCLUDED.url,
                title = EXCLUDED.title,
                status = EXCLUDED.status,
                campaign_term = EXCLUDED.campaign_term,
                focus_keyword = EXCLUDED.focus_keyword,
                updated_at = now()
            RETURNING {TARGET_COLUMNS}
            "#
        );

        let row = sqlx::query(&sql)
            .bind(new_target.object_type.as_str())
            .bind(new_target.object_id)
            .bind(&new_target.taxonomy)
            .bind(&new_target.url)
            .bind(&new_target.title)
            .bind(new_target.status.as_str())
            .bind(&new_target.campaign_term)
            .bind(&new_target.focus_keyword)
            .fetch_one(self.pool.as_ref())
            .await?;

        target_from_row(&row)
    }

    async fn find(
        &self,
        object_type: ObjectType,
        object_id: i64,
    ) -> Result<Option<SlugTarget>, AppError> {
        let sql = format!(
            "SELECT {TARGET_COLUMNS} FROM targets WHERE object_type = $1 AND object_id = $2"
        );

        let row = sqlx::query(&sql)
            .bind(object_type.as_str())
            .bind(object_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.as_ref().map(target_from_row).transpose()
    }

    async fn list_with_slugs(&self) -> Result<Vec<SlugTarget>, AppError> {
        let sql = format!(
            r#"
            SELECT {TARGET_COLUMNS} FROM targets
            WHERE slug IS NOT NULL AND slug <> '' AND status <> 'trash'
            "#
        );

        let rows = sqlx::query(&sql).fetch_all(self.pool.as_ref()).await?;
        rows.iter().map(target_from_row).collect()
    }

    async fn list_missing_slugs(
        &self,
        allowed_types: &[ObjectType],
        allowed_taxonomies: &[String],
    ) -> Result<Vec<SlugTarget>, AppError> {
        let types: Vec<String> = allowed_types.iter().map(|t| t.as_str().to_string()).collect();
        let sql = format!(
            r#"
            SELECT {TARGET_COLUMNS} FROM targets
            WHERE (slug IS NULL OR slug = '')
              AND status <> 'trash'
              AND object_type = ANY($1)
              AND (object_type <> 'term' OR taxonomy = ANY($2))
            ORDER BY id
            "#
        );

        let rows = sqlx::query(&sql)
            .bind(&types)
            .bind(allowed_taxonomies)
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.iter().map(target_from_row).collect()
    }

    async fn set_slug(
        &self,
        object_type: ObjectType,
        object_id: i64,
        slug: &str,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE targets SET slug = $3, updated_at = now() \
             WHERE object_type = $1 AND object_id = $2",
        )
        .bind(object_type.as_str())
        .bind(object_id)
        .bind(slug)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
