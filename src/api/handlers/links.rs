//! Handler for listing the caller's links.

use axum::{Extension, Json, extract::State};
use serde_json::json;

use crate::api::dto::shorten::{ApiResponse, MappingRecord};
use crate::api::middleware::Caller;
use crate::error::AppError;
use crate::state::AppState;

/// Lists links created by the authenticated caller, newest first.
///
/// # Endpoint
///
/// `GET /api/links/my-links`
///
/// # Errors
///
/// Returns 401 Unauthorized without a valid credential.
pub async fn my_links_handler(
    State(state): State<AppState>,
    Extension(Caller(principal)): Extension<Caller>,
) -> Result<Json<ApiResponse<Vec<MappingRecord>>>, AppError> {
    let principal = principal.ok_or_else(|| {
        AppError::unauthorized(
            "Authentication required",
            json!({ "reason": "No principal on request" }),
        )
    })?;

    let links = state.shorten_service.links_for_owner(&principal).await?;

    Ok(Json(ApiResponse::ok(
        links.into_iter().map(MappingRecord::from).collect(),
    )))
}
