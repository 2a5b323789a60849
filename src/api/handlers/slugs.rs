//! Handlers for slug assignment: generate, rename, backfill.

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::api::dto::slugs::{RenameSlugRequest, SlugResponse, SweepResponse, SweepSummary};
use crate::api::handlers::parse_object_type;
use crate::error::AppError;
use crate::state::AppState;

/// Assigns a random slug to a target, keeping any it already has.
///
/// # Endpoint
///
/// `POST /api/targets/{object_type}/{object_id}/slug`
pub async fn generate_slug_handler(
    State(state): State<AppState>,
    Path((object_type, object_id)): Path<(String, i64)>,
) -> Result<Json<SlugResponse>, AppError> {
    let object_type = parse_object_type(&object_type)?;
    let slug = state.slugs.generate_for(object_type, object_id).await?;
    Ok(Json(SlugResponse {
        object_type,
        object_id,
        slug,
    }))
}

/// Renames a target's slug to a caller-chosen value.
///
/// # Endpoint
///
/// `PUT /api/targets/{object_type}/{object_id}/slug`
///
/// The previous slug stops resolving; cached redirects for it age out
/// with the cache TTL.
///
/// # Errors
///
/// - 400 for a malformed slug
/// - 404 if the target is not registered
/// - 409 if another object already holds the slug; the error message
///   names that object's title
pub async fn rename_slug_handler(
    State(state): State<AppState>,
    Path((object_type, object_id)): Path<(String, i64)>,
    Json(payload): Json<RenameSlugRequest>,
) -> Result<Json<SlugResponse>, AppError> {
    payload.validate()?;

    let object_type = parse_object_type(&object_type)?;
    let target = state
        .slugs
        .rename(object_type, object_id, &payload.slug)
        .await?;
    Ok(Json(SlugResponse {
        object_type,
        object_id,
        slug: target.slug.unwrap_or(payload.slug),
    }))
}

/// Backfills slugs for every eligible target that lacks one.
///
/// # Endpoint
///
/// `POST /api/slugs/generate`
///
/// Targets are processed independently; failures are reported per target
/// and the sweep continues.
pub async fn sweep_slugs_handler(
    State(state): State<AppState>,
) -> Result<Json<SweepResponse>, AppError> {
    let report = state.slugs.generate_missing().await?;
    Ok(Json(SweepResponse {
        summary: SweepSummary {
            successful: report.success,
            failed: report.error,
        },
        messages: report.messages,
    }))
}
