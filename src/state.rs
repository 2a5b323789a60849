//! Shared application state injected into all handlers.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{
    AuthService, RedirectResolver, SlugService, StatsService, TargetService,
};
use crate::domain::hit_event::HitEvent;
use crate::infrastructure::cache::CacheService;

#[derive(Clone)]
pub struct AppState {
    pub targets: Arc<TargetService>,
    pub slugs: Arc<SlugService>,
    pub resolver: Arc<RedirectResolver>,
    pub stats: Arc<StatsService>,
    pub auth: Arc<AuthService>,
    pub cache: Arc<dyn CacheService>,
    pub hit_tx: mpsc::Sender<HitEvent>,
}
