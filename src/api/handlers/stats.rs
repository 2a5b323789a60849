//! Handler for hit statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::api::handlers::parse_object_type;
use crate::error::AppError;
use crate::state::AppState;

/// Returns hit counts for a registered target.
///
/// # Endpoint
///
/// `GET /api/targets/{object_type}/{object_id}/stats`
///
/// A registered target with no recorded hits reports zeros; an unknown
/// target is a 404.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path((object_type, object_id)): Path<(String, i64)>,
) -> Result<Json<StatsResponse>, AppError> {
    let object_type = parse_object_type(&object_type)?;
    let counts = state.stats.counts(object_type, object_id).await?;
    Ok(Json(StatsResponse::from_counts(
        object_type,
        object_id,
        counts,
    )))
}
