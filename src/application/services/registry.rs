//! In-process slug registry with cache-backed lookups.

use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::entities::{SlugEntry, SlugTarget};
use crate::domain::repositories::TargetRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Authoritative map from slug to [`SlugEntry`].
///
/// The map is loaded lazily from storage on first use and kept current by
/// the slug services; individual lookups are additionally served from the
/// shared cache under `slug:{slug}` so warm entries skip the map entirely
/// across process restarts.
pub struct SlugRegistry {
    repo: Arc<dyn TargetRepository>,
    cache: Arc<dyn CacheService>,
    map: RwLock<Option<HashMap<String, SlugEntry>>>,
}

impl SlugRegistry {
    pub fn new(repo: Arc<dyn TargetRepository>, cache: Arc<dyn CacheService>) -> Self {
        Self {
            repo,
            cache,
            map: RwLock::new(None),
        }
    }

    async fn ensure_loaded(&self) -> Result<(), AppError> {
        if self.map.read().await.is_some() {
            return Ok(());
        }

        let targets = self.repo.list_with_slugs().await?;
        let mut guard = self.map.write().await;
        // A concurrent loader may have won the write race.
        if guard.is_none() {
            let mut map = HashMap::with_capacity(targets.len());
            for target in &targets {
                if let Some(slug) = target.slug.as_deref() {
                    map.insert(slug.to_string(), SlugEntry::from_target(target));
                }
            }
            debug!(entries = map.len(), "slug registry loaded");
            *guard = Some(map);
        }
        Ok(())
    }

    /// Looks a slug up, trying the cache before the registry map. Map hits
    /// are written back to the cache.
    pub async fn lookup(&self, slug: &str) -> Result<Option<SlugEntry>, AppError> {
        let cache_key = format!("slug:{slug}");

        if let Ok(Some(cached)) = self.cache.get(&cache_key).await {
            match serde_json::from_str::<SlugEntry>(&cached) {
                Ok(entry) => return Ok(Some(entry)),
                Err(e) => warn!(key = %cache_key, error = %e, "discarding malformed cache entry"),
            }
        }

        self.ensure_loaded().await?;
        let entry = self
            .map
            .read()
            .await
            .as_ref()
            .and_then(|m| m.get(slug))
            .cloned();

        if let Some(entry) = &entry {
            if let Ok(serialized) = serde_json::to_string(entry) {
                let _ = self.cache.set(&cache_key, &serialized, None).await;
            }
        }

        Ok(entry)
    }

    /// Whether a slug is already claimed. Consults the map only; generation
    /// must not seed the cache with probe slugs.
    pub async fn contains(&self, slug: &str) -> Result<bool, AppError> {
        self.ensure_loaded().await?;
        Ok(self
            .map
            .read()
            .await
            .as_ref()
            .is_some_and(|m| m.contains_key(slug)))
    }

    /// Persists a slug assignment and publishes it to the map.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the target row vanished
    /// - [`AppError::Conflict`] if a concurrent writer claimed the slug first
    pub async fn add(&self, target: &SlugTarget, slug: &str) -> Result<(), AppError> {
        let updated = self
            .repo
            .set_slug(target.object_type, target.object_id, slug)
            .await?;
        if !updated {
            return Err(AppError::not_found(
                "Target not found",
                json!({
                    "object_type": target.object_type,
                    "object_id": target.object_id,
                }),
            ));
        }

        self.ensure_loaded().await?;
        if let Some(map) = self.map.write().await.as_mut() {
            map.insert(slug.to_string(), SlugEntry::from_target(target));
        }
        let _ = self.cache.invalidate(&format!("slug:{slug}")).await;
        Ok(())
    }

    /// Withdraws a slug from the map, used when a rename supersedes it.
    /// Cached redirect paths for the old slug age out on their own TTL.
    pub async fn remove(&self, slug: &str) {
        if let Some(map) = self.map.write().await.as_mut() {
            map.remove(slug);
        }
        let _ = self.cache.invalidate(&format!("slug:{slug}")).await;
    }

    /// Drops the memoized map so the next lookup reloads from storage.
    pub async fn invalidate(&self) {
        *self.map.write().await = None;
    }
}
