//! Handler for the share link endpoint.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::share_links::ShareLinksResponse;
use crate::api::handlers::parse_object_type;
use crate::error::AppError;
use crate::state::AppState;

/// Renders one share link per platform for a target.
///
/// # Endpoint
///
/// `GET /api/targets/{object_type}/{object_id}/share-links`
///
/// Slugged targets get vanity links that route through the redirect
/// endpoint so hits are counted; unslugged targets get direct links with
/// UTM decoration inlined.
pub async fn share_links_handler(
    State(state): State<AppState>,
    Path((object_type, object_id)): Path<(String, i64)>,
) -> Result<Json<ShareLinksResponse>, AppError> {
    let object_type = parse_object_type(&object_type)?;
    let links = state.targets.share_links(object_type, object_id).await?;
    Ok(Json(ShareLinksResponse {
        object_type,
        object_id,
        links: links.into_iter().map(Into::into).collect(),
    }))
}
