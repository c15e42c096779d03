//! Handler for link shortening endpoint.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ApiResponse, MappingRecord, ShortenRequest};
use crate::api::middleware::Caller;
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a long URL, or returns the existing short link for it.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "longUrl": "https://example.com/a/b/c" }
/// ```
///
/// # Response
///
/// `201 Created` for a new record, `200 OK` when the URL was already
/// shortened:
///
/// ```json
/// {
///   "success": true,
///   "data": {
///     "longUrl": "https://example.com/a/b/c",
///     "shortCode": "Ab3xK9q",
///     "shortUrl": "http://localhost:3000/Ab3xK9q",
///     "ownerId": null,
///     "clicks": 0,
///     "createdAt": "2025-01-01T00:00:00Z"
///   }
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not JSON or the URL is missing or invalid.
/// Returns 401 Unauthorized if a credential was supplied but does not verify.
/// Returns 500 Internal Server Error on store failures.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Extension(Caller(owner)): Extension<Caller>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<MappingRecord>>), AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    })?;
    payload.validate()?;

    let allocation = state
        .shorten_service
        .allocate(payload.long_url.as_deref().unwrap_or_default(), owner)
        .await?;

    let status = if allocation.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(ApiResponse::ok(allocation.link.into()))))
}
