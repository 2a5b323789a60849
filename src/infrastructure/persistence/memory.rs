//! In-memory repository implementations.
//!
//! Back hermetic integration tests and storage-free development runs with
//! the same trait surface as the PostgreSQL repositories, including the
//! unique-slug backstop.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::domain::entities::{NewTarget, ObjectType, Platform, SlugTarget};
use crate::domain::repositories::{HitCounts, HitRepository, TargetRepository};
use crate::error::AppError;

/// In-memory target store keyed by `(object_type, object_id)`.
#[derive(Default)]
pub struct InMemoryTargetRepository {
    targets: RwLock<HashMap<(ObjectType, i64), SlugTarget>>,
    next_id: AtomicI64,
}

impl InMemoryTargetRepository {
    pub fn new() -> Self {
        Self {
            targets: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl TargetRepository for InMemoryTargetRepository {
    async fn upsert(&self, new_target: NewTarget) -> Result<SlugTarget, AppError> {
        let mut targets = self.targets.write().await;
        let key = (new_target.object_type, new_target.object_id);
        let now = Utc::now();

        let target = match targets.get(&key) {
            Some(existing) => SlugTarget {
                taxonomy: new_target.taxonomy,
                url: new_target.url,
                title: new_target.title,
                status: new_target.status,
                campaign_term: new_target.campaign_term,
                focus_keyword: new_target.focus_keyword,
                updated_at: now,
                ..existing.clone()
            },
            None => SlugTarget {
                id: self.next_id.fetch_add(1, Ordering::SeqCst),
                object_type: new_target.object_type,
                object_id: new_target.object_id,
                taxonomy: new_target.taxonomy,
                url: new_target.url,
                title: new_target.title,
                status: new_target.status,
                slug: None,
                campaign_term: new_target.campaign_term,
                focus_keyword: new_target.focus_keyword,
                created_at: now,
                updated_at: now,
            },
        };

        targets.insert(key, target.clone());
        Ok(target)
    }

    async fn find(
        &self,
        object_type: ObjectType,
        object_id: i64,
    ) -> Result<Option<SlugTarget>, AppError> {
        let targets = self.targets.read().await;
        Ok(targets.get(&(object_type, object_id)).cloned())
    }

    async fn list_with_slugs(&self) -> Result<Vec<SlugTarget>, AppError> {
        let targets = self.targets.read().await;
        Ok(targets
            .values()
            .filter(|t| t.has_slug() && t.status.is_resolvable())
            .cloned()
            .collect())
    }

    async fn list_missing_slugs(
        &self,
        allowed_types: &[ObjectType],
        allowed_taxonomies: &[String],
    ) -> Result<Vec<SlugTarget>, AppError> {
        let targets = self.targets.read().await;
        let mut missing: Vec<SlugTarget> = targets
            .values()
            .filter(|t| !t.has_slug() && t.status.is_resolvable())
            .filter(|t| allowed_types.contains(&t.object_type))
            .filter(|t| {
                t.object_type != ObjectType::Term
                    || t.taxonomy
                        .as_ref()
                        .is_some_and(|tax| allowed_taxonomies.contains(tax))
            })
            .cloned()
            .collect();
        missing.sort_by_key(|t| t.id);
        Ok(missing)
    }

    async fn set_slug(
        &self,
        object_type: ObjectType,
        object_id: i64,
        slug: &str,
    ) -> Result<bool, AppError> {
        let mut targets = self.targets.write().await;

        // Same backstop the partial unique index provides in Postgres.
        let taken = targets.values().any(|t| {
            t.slug.as_deref() == Some(slug)
                && !slug.is_empty()
                && (t.object_type, t.object_id) != (object_type, object_id)
        });
        if taken {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "targets_slug_key" }),
            ));
        }

        match targets.get_mut(&(object_type, object_id)) {
            Some(target) => {
                target.slug = Some(slug.to_string());
                target.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// In-memory hit counters keyed by `(object_type, object_id, platform)`.
#[derive(Default)]
pub struct InMemoryHitRepository {
    counters: RwLock<HashMap<(ObjectType, i64, Option<Platform>), i64>>,
}

impl InMemoryHitRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HitRepository for InMemoryHitRepository {
    async fn increment(
        &self,
        object_type: ObjectType,
        object_id: i64,
        platform: Option<Platform>,
    ) -> Result<i64, AppError> {
        let mut counters = self.counters.write().await;
        let count = counters
            .entry((object_type, object_id, platform))
            .or_insert(0);
        *count += 1;
        Ok(*count)
    }

    async fn counts(
        &self,
        object_type: ObjectType,
        object_id: i64,
    ) -> Result<HitCounts, AppError> {
        let counters = self.counters.read().await;
        let mut result = HitCounts::default();
        for ((ot, id, platform), hits) in counters.iter() {
            if (*ot, *id) != (object_type, object_id) {
                continue;
            }
            match platform {
                None => result.total = *hits,
                Some(p) => result.by_platform.push((*p, *hits)),
            }
        }
        Ok(result)
    }
}
