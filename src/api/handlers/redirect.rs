//! Handler for vanity URL redirects.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use metrics::counter;
use serde_json::json;
use tracing::debug;

use crate::api::middleware::auth::bearer_from_headers;
use crate::application::services::Resolution;
use crate::domain::hit_event::HitEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a vanity path to its UTM-decorated destination.
///
/// # Endpoint
///
/// Fallback for any path no other route matched, e.g. `GET /ab12cd34-f`.
///
/// # Request Flow
///
/// 1. Resolve the path: parse slug and platform suffix, consult the cache,
///    then the slug registry
/// 2. Send a hit event to the background worker, unless the request
///    carries a valid admin bearer token (editors previewing their own
///    links are not counted)
/// 3. Return 301 Moved Permanently
///
/// Query parameters on the request are appended to the destination after
/// the UTM parameters, so campaign overrides pass through.
///
/// # Errors
///
/// Returns 404 Not Found when redirects are disabled, the path is not a
/// vanity link, or the slug is unknown.
pub async fn redirect_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Response, AppError> {
    let path = uri.path();

    let target = match state.resolver.resolve(path).await? {
        Resolution::Resolved(target) => target,
        resolution => {
            debug!(path, ?resolution, "path did not resolve to a redirect");
            return Err(AppError::not_found("Not found", json!({})));
        }
    };

    let is_editor = bearer_from_headers(&headers)
        .map(|token| state.auth.verify(&token))
        .unwrap_or(false);

    if !is_editor {
        let event = HitEvent::new(target.object_type, target.object_id, target.platform);
        if state.hit_tx.try_send(event).is_err() {
            counter!("hit_queue_full_total").increment(1);
        }
    }

    let location = match uri.query() {
        // The resolved URL already carries UTM parameters, so the original
        // query is appended with '&'.
        Some(query) => format!("{}&{}", target.url, query),
        None => target.url,
    };

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response())
}
