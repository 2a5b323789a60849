//! Vanity path resolution.
//!
//! Turns an unmatched request path like `/ab12cd34-f` into a decorated
//! destination URL, or decides the request is not a vanity redirect at all.

use metrics::counter;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::application::services::SlugRegistry;
use crate::domain::entities::{ObjectType, Platform};
use crate::domain::repositories::TargetRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::slug::validate_slug;
use crate::utils::utm::{UtmConfig, append_query, query_string};

/// Where a resolved vanity path leads. Serialized under `redirect:{path}`
/// so warm paths skip the registry entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedirectTarget {
    pub object_type: ObjectType,
    pub object_id: i64,
    pub platform: Platform,
    /// Destination URL with UTM decoration already applied.
    pub url: String,
}

/// Outcome of resolving a request path.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Redirect handling is disabled; pass the request through untouched.
    NotApplicable,
    /// The path does not have the shape of a vanity link.
    ParseFailed,
    /// The path parses but its slug is unknown or its target has no URL.
    ResolveMiss,
    /// The path maps to a live destination.
    Resolved(RedirectTarget),
}

/// Resolves vanity paths to redirect targets.
pub struct RedirectResolver {
    registry: Arc<SlugRegistry>,
    repo: Arc<dyn TargetRepository>,
    cache: Arc<dyn CacheService>,
    utm: UtmConfig,
    enabled: bool,
}

/// Splits a candidate path into `(slug, platform)`.
///
/// A vanity path is a single segment whose last dash separates the slug
/// from a one-letter platform suffix. Slugs may themselves contain dashes,
/// so the split is on the last dash only.
fn parse_vanity_path(path: &str) -> Option<(&str, Platform)> {
    let candidate = path.strip_prefix('/').unwrap_or(path);
    if candidate.is_empty() || candidate.contains('/') {
        return None;
    }

    let (slug, letter) = candidate.rsplit_once('-')?;
    let platform = Platform::from_suffix(&format!("-{letter}"))?;
    validate_slug(slug).ok()?;
    Some((slug, platform))
}

impl RedirectResolver {
    pub fn new(
        registry: Arc<SlugRegistry>,
        repo: Arc<dyn TargetRepository>,
        cache: Arc<dyn CacheService>,
        utm: UtmConfig,
        enabled: bool,
    ) -> Self {
        Self {
            registry,
            repo,
            cache,
            utm,
            enabled,
        }
    }

    /// Resolves a request path.
    ///
    /// Walks disabled -> cache -> parse -> registry -> decorate, caching the
    /// final target under `redirect:{path}`. A warm path skips parsing
    /// entirely; only paths that once parsed are ever cached.
    pub async fn resolve(&self, path: &str) -> Result<Resolution, AppError> {
        if !self.enabled {
            return Ok(Resolution::NotApplicable);
        }

        let cache_key = format!("redirect:{path}");
        if let Ok(Some(cached)) = self.cache.get(&cache_key).await {
            if let Ok(target) = serde_json::from_str::<RedirectTarget>(&cached) {
                counter!("redirects_resolved_total").increment(1);
                return Ok(Resolution::Resolved(target));
            }
        }

        let Some((slug, platform)) = parse_vanity_path(path) else {
            return Ok(Resolution::ParseFailed);
        };

        let Some(entry) = self.registry.lookup(slug).await? else {
            debug!(slug, "no registry entry for slug");
            counter!("redirects_missed_total").increment(1);
            return Ok(Resolution::ResolveMiss);
        };

        if entry.url.is_empty() {
            debug!(slug, "registry entry has no destination URL");
            counter!("redirects_missed_total").increment(1);
            return Ok(Resolution::ResolveMiss);
        }

        let term = self
            .repo
            .find(entry.object_type, entry.object_id)
            .await?
            .map(|t| t.primary_keyword().to_string())
            .unwrap_or_default();

        let url = append_query(&entry.url, &query_string(platform, &term, &self.utm));
        let target = RedirectTarget {
            object_type: entry.object_type,
            object_id: entry.object_id,
            platform,
            url,
        };

        if let Ok(serialized) = serde_json::to_string(&target) {
            let _ = self.cache.set(&cache_key, &serialized, None).await;
        }

        counter!("redirects_resolved_total").increment(1);
        Ok(Resolution::Resolved(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{NewTarget, ObjectStatus};
    use crate::infrastructure::cache::{CacheResult, NullCache};
    use crate::infrastructure::persistence::InMemoryTargetRepository;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MapCache(Mutex<HashMap<String, String>>);

    #[async_trait]
    impl CacheService for MapCache {
        async fn get(&self, key: &str) -> CacheResult<Option<String>> {
            Ok(self.0.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str, _ttl_seconds: Option<u64>) -> CacheResult<()> {
            self.0
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn invalidate(&self, key: &str) -> CacheResult<()> {
            self.0.lock().unwrap().remove(key);
            Ok(())
        }

        async fn health_check(&self) -> bool {
            true
        }
    }

    fn utm_config() -> UtmConfig {
        UtmConfig {
            utm_id: "socialized".to_string(),
            campaign: "socialized".to_string(),
            site_name: "Example Site".to_string(),
        }
    }

    async fn resolver_with_post(enabled: bool) -> RedirectResolver {
        let repo = Arc::new(InMemoryTargetRepository::new());
        repo.upsert(NewTarget {
            object_type: ObjectType::Post,
            object_id: 42,
            taxonomy: None,
            url: "https://site.example/hello-world".to_string(),
            title: "Hello World".to_string(),
            status: ObjectStatus::Published,
            campaign_term: Some("launch week".to_string()),
            focus_keyword: None,
        })
        .await
        .unwrap();
        repo.set_slug(ObjectType::Post, 42, "ab12cd34").await.unwrap();

        let cache: Arc<dyn CacheService> = Arc::new(NullCache);
        let registry = Arc::new(SlugRegistry::new(repo.clone(), cache.clone()));
        RedirectResolver::new(registry, repo, cache, utm_config(), enabled)
    }

    #[test]
    fn test_parse_vanity_path() {
        assert_eq!(
            parse_vanity_path("/ab12cd34-f"),
            Some(("ab12cd34", Platform::Facebook))
        );
        // Dashed slugs split on the last dash.
        assert_eq!(
            parse_vanity_path("/ab-12-t"),
            Some(("ab-12", Platform::Twitter))
        );
        assert_eq!(parse_vanity_path("/ab12cd34-z"), None);
        assert_eq!(parse_vanity_path("/ab12cd34"), None);
        assert_eq!(parse_vanity_path("/a/b-f"), None);
        assert_eq!(parse_vanity_path("/"), None);
        assert_eq!(parse_vanity_path("/-f"), None);
    }

    #[tokio::test]
    async fn test_resolve_known_slug() {
        let resolver = resolver_with_post(true).await;
        let resolution = resolver.resolve("/ab12cd34-f").await.unwrap();

        let Resolution::Resolved(target) = resolution else {
            panic!("expected Resolved, got {resolution:?}");
        };
        assert_eq!(target.platform, Platform::Facebook);
        assert!(target.url.starts_with("https://site.example/hello-world?"));
        assert!(target.url.contains("utm_source=facebook"));
        assert!(target.url.contains("utm_medium=social"));
        assert!(target.url.contains("utm_term=launch%20week"));
    }

    #[tokio::test]
    async fn test_resolve_unknown_slug_is_miss() {
        let resolver = resolver_with_post(true).await;
        let resolution = resolver.resolve("/zzzzzzzz-f").await.unwrap();
        assert_eq!(resolution, Resolution::ResolveMiss);
    }

    #[tokio::test]
    async fn test_resolve_unparseable_path() {
        let resolver = resolver_with_post(true).await;
        assert_eq!(
            resolver.resolve("/about-us/team").await.unwrap(),
            Resolution::ParseFailed
        );
    }

    #[tokio::test]
    async fn test_resolve_disabled() {
        let resolver = resolver_with_post(false).await;
        assert_eq!(
            resolver.resolve("/ab12cd34-f").await.unwrap(),
            Resolution::NotApplicable
        );
    }

    #[tokio::test]
    async fn test_warm_cache_short_circuits_the_registry() {
        let repo = Arc::new(InMemoryTargetRepository::new());
        let cache: Arc<dyn CacheService> = Arc::new(MapCache::default());

        let cached = RedirectTarget {
            object_type: ObjectType::Post,
            object_id: 42,
            platform: Platform::Facebook,
            url: "https://site.example/hello-world?utm_source=facebook".to_string(),
        };
        cache
            .set(
                "redirect:/ab12cd34-f",
                &serde_json::to_string(&cached).unwrap(),
                None,
            )
            .await
            .unwrap();

        let registry = Arc::new(SlugRegistry::new(repo.clone(), cache.clone()));
        let resolver = RedirectResolver::new(registry, repo, cache, utm_config(), true);

        // The repository is empty; the cached entry alone resolves the path.
        assert_eq!(
            resolver.resolve("/ab12cd34-f").await.unwrap(),
            Resolution::Resolved(cached)
        );
    }

    #[tokio::test]
    async fn test_resolve_target_without_url_is_miss() {
        let repo = Arc::new(InMemoryTargetRepository::new());
        repo.upsert(NewTarget {
            object_type: ObjectType::Post,
            object_id: 1,
            taxonomy: None,
            url: String::new(),
            title: "Unroutable".to_string(),
            status: ObjectStatus::Published,
            campaign_term: None,
            focus_keyword: None,
        })
        .await
        .unwrap();
        repo.set_slug(ObjectType::Post, 1, "nourl123").await.unwrap();

        let cache: Arc<dyn CacheService> = Arc::new(NullCache);
        let registry = Arc::new(SlugRegistry::new(repo.clone(), cache.clone()));
        let resolver = RedirectResolver::new(registry, repo, cache, utm_config(), true);

        assert_eq!(
            resolver.resolve("/nourl123-f").await.unwrap(),
            Resolution::ResolveMiss
        );
    }
}
