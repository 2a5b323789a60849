//! PostgreSQL implementation of the hit counter repository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::domain::entities::{ObjectType, Platform};
use crate::domain::repositories::{HitCounts, HitRepository};
use crate::error::AppError;

/// PostgreSQL repository for hit counters.
///
/// The per-object total lives in the row whose `platform` is the empty
/// string; per-platform counts use the platform key.
pub struct PgHitRepository {
    pool: Arc<PgPool>,
}

impl PgHitRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HitRepository for PgHitRepository {
    async fn increment(
        &self,
        object_type: ObjectType,
        object_id: i64,
        platform: Option<Platform>,
    ) -> Result<i64, AppError> {
        let platform_key = platform.map(|p| p.key()).unwrap_or("");

        let row = sqlx::query(
            r#"
            INSERT INTO hits (object_type, object_id, platform, hits)
            VALUES ($1, $2, $3, 1)
            ON CONFLICT (object_type, object_id, platform)
            DO UPDATE SET hits = hits.hits + 1
            RETURNING hits
            "#,
        )
        .bind(object_type.as_str())
        .bind(object_id)
        .bind(platform_key)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.try_get("hits")?)
    }

    async fn counts(
        &self,
        object_type: ObjectType,
        object_id: i64,
    ) -> Result<HitCounts, AppError> {
        let rows = sqlx::query(
            "SELECT platform, hits FROM hits WHERE object_type = $1 AND object_id = $2",
        )
        .bind(object_type.as_str())
        .bind(object_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut counts = HitCounts::default();
        for row in rows {
            let platform: String = row.try_get("platform")?;
            let hits: i64 = row.try_get("hits")?;
            if platform.is_empty() {
                counts.total = hits;
            } else if let Ok(p) = platform.parse::<Platform>() {
                counts.by_platform.push((p, hits));
            }
        }

        Ok(counts)
    }
}
