//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health`  - Health check: DB, cache, hit queue (public)
//! - `/api/*`       - Admin API (Bearer token required)
//! - anything else  - Vanity redirect fallback (public)
//!
//! The redirect handler is the router fallback rather than a named route:
//! a vanity path is by definition a path nothing else matched.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Bearer token on `/api`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .fallback(get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
