//! API route configuration.
//!
//! All API endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    generate_slug_handler, get_target_handler, register_target_handler, rename_slug_handler,
    share_links_handler, stats_handler, sweep_slugs_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `POST /targets`                                        - Register or refresh a shareable object
/// - `GET  /targets/{object_type}/{object_id}`              - Fetch a registered target
/// - `POST /targets/{object_type}/{object_id}/slug`         - Assign a random slug
/// - `PUT  /targets/{object_type}/{object_id}/slug`         - Rename the slug
/// - `GET  /targets/{object_type}/{object_id}/share-links`  - Rendered share links per platform
/// - `GET  /targets/{object_type}/{object_id}/stats`        - Hit counts
/// - `POST /slugs/generate`                                 - Backfill slugs for targets missing one
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/targets", post(register_target_handler))
        .route(
            "/targets/{object_type}/{object_id}",
            get(get_target_handler),
        )
        .route(
            "/targets/{object_type}/{object_id}/slug",
            post(generate_slug_handler).put(rename_slug_handler),
        )
        .route(
            "/targets/{object_type}/{object_id}/share-links",
            get(share_links_handler),
        )
        .route(
            "/targets/{object_type}/{object_id}/stats",
            get(stats_handler),
        )
        .route("/slugs/generate", post(sweep_slugs_handler))
}
