//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod redirect;
pub mod share_links;
pub mod slugs;
pub mod stats;
pub mod targets;

pub use health::health_handler;
pub use redirect::redirect_handler;
pub use share_links::share_links_handler;
pub use slugs::{generate_slug_handler, rename_slug_handler, sweep_slugs_handler};
pub use stats::stats_handler;
pub use targets::{get_target_handler, register_target_handler};

use crate::domain::entities::ObjectType;
use crate::error::AppError;
use serde_json::json;

/// Parses the `{object_type}` path segment.
pub(crate) fn parse_object_type(raw: &str) -> Result<ObjectType, AppError> {
    raw.parse().map_err(|_| {
        AppError::bad_request(
            "Unknown object type",
            json!({ "object_type": raw, "expected": ["post", "term", "user"] }),
        )
    })
}
