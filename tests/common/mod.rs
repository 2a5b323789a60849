#![allow(dead_code)]

use std::sync::Arc;
use tokio::sync::mpsc;
use vanity_links::application::services::{
    AuthService, RedirectResolver, SlugRegistry, SlugService, StatsService, TargetService,
};
use vanity_links::domain::entities::{NewTarget, ObjectStatus, ObjectType};
use vanity_links::domain::hit_event::HitEvent;
use vanity_links::domain::repositories::TargetRepository;
use vanity_links::infrastructure::cache::{CacheService, NullCache};
use vanity_links::infrastructure::persistence::{InMemoryHitRepository, InMemoryTargetRepository};
use vanity_links::state::AppState;
use vanity_links::utils::utm::UtmConfig;

pub const ADMIN_TOKEN: &str = "test-admin-token";
pub const BASE_URL: &str = "https://s.example.com";

/// Everything a handler test needs: the state plus direct repository
/// handles for seeding and the hit event receiver for assertions.
pub struct TestContext {
    pub state: AppState,
    pub targets: Arc<InMemoryTargetRepository>,
    pub hits: Arc<InMemoryHitRepository>,
    pub hit_rx: mpsc::Receiver<HitEvent>,
}

pub fn create_test_state() -> TestContext {
    create_test_state_with(true)
}

pub fn create_test_state_with(redirects_enabled: bool) -> TestContext {
    let targets = Arc::new(InMemoryTargetRepository::new());
    let hits = Arc::new(InMemoryHitRepository::new());
    let cache: Arc<dyn CacheService> = Arc::new(NullCache);
    let (hit_tx, hit_rx) = mpsc::channel(100);

    let allowed_types = ObjectType::ALL.to_vec();
    let allowed_taxonomies = vec!["category".to_string(), "post_tag".to_string()];
    let utm = UtmConfig {
        utm_id: "socialized".to_string(),
        campaign: "socialized".to_string(),
        site_name: "Example Site".to_string(),
    };

    let registry = Arc::new(SlugRegistry::new(targets.clone(), cache.clone()));

    let state = AppState {
        targets: Arc::new(TargetService::new(
            targets.clone(),
            registry.clone(),
            allowed_types.clone(),
            allowed_taxonomies.clone(),
            BASE_URL.to_string(),
            utm.clone(),
            redirects_enabled,
        )),
        slugs: Arc::new(SlugService::new(
            targets.clone(),
            registry.clone(),
            allowed_types,
            allowed_taxonomies,
        )),
        resolver: Arc::new(RedirectResolver::new(
            registry,
            targets.clone(),
            cache.clone(),
            utm,
            redirects_enabled,
        )),
        stats: Arc::new(StatsService::new(hits.clone(), targets.clone())),
        auth: Arc::new(AuthService::new(ADMIN_TOKEN)),
        cache,
        hit_tx,
    };

    TestContext {
        state,
        targets,
        hits,
        hit_rx,
    }
}

pub fn new_post(object_id: i64, url: &str) -> NewTarget {
    NewTarget {
        object_type: ObjectType::Post,
        object_id,
        taxonomy: None,
        url: url.to_string(),
        title: format!("Post {object_id}"),
        status: ObjectStatus::Published,
        campaign_term: None,
        focus_keyword: None,
    }
}

pub async fn seed_post(ctx: &TestContext, object_id: i64, url: &str) {
    ctx.targets.upsert(new_post(object_id, url)).await.unwrap();
}

pub async fn seed_slugged_post(ctx: &TestContext, object_id: i64, url: &str, slug: &str) {
    seed_post(ctx, object_id, url).await;
    ctx.targets
        .set_slug(ObjectType::Post, object_id, slug)
        .await
        .unwrap();
}
