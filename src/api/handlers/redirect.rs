//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Every successful resolution increments the link's click counter before
/// the response is sent. The redirect is `302 Found` so browsers and proxies
/// keep coming back through the short URL.
///
/// # Errors
///
/// Returns 404 Not Found with `"No URL found"` if the short code doesn't exist.
/// Returns 500 Internal Server Error on store failures.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.redirect_service.resolve(&code).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, link.long_url)]))
}
