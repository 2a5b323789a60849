//! Handlers for target registration and retrieval.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::targets::{RegisterTargetRequest, TargetResponse};
use crate::api::handlers::parse_object_type;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a shareable object, or refreshes its metadata.
///
/// # Endpoint
///
/// `POST /api/targets`
///
/// Registration is idempotent per `(object_type, object_id)` pair: repeat
/// calls refresh the stored URL, title, status, and keywords, but never
/// touch an assigned slug.
///
/// # Errors
///
/// Returns 400 Bad Request when validation fails, the object type or
/// taxonomy is not enabled for sharing, or the URL is malformed.
pub async fn register_target_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterTargetRequest>,
) -> Result<(StatusCode, Json<TargetResponse>), AppError> {
    payload.validate()?;

    let target = state.targets.register(payload.into_new_target()).await?;
    Ok((StatusCode::CREATED, Json(target.into())))
}

/// Returns a registered target.
///
/// # Endpoint
///
/// `GET /api/targets/{object_type}/{object_id}`
pub async fn get_target_handler(
    State(state): State<AppState>,
    Path((object_type, object_id)): Path<(String, i64)>,
) -> Result<Json<TargetResponse>, AppError> {
    let object_type = parse_object_type(&object_type)?;
    let target = state.targets.get(object_type, object_id).await?;
    Ok(Json(target.into()))
}
