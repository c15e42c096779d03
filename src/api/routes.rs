//! API route configuration.
//!
//! Shortening accepts anonymous callers; listing requires a credential.

use crate::api::handlers::{my_links_handler, shorten_handler};
use crate::api::middleware::auth;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Routes open to anonymous callers. A supplied credential is still verified.
///
/// # Endpoints
///
/// - `POST /shorten` - Shorten a URL (owner recorded when authenticated)
pub fn public_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route_layer(middleware::from_fn_with_state(state, auth::optional_layer))
}

/// Routes that require a valid bearer credential.
///
/// # Endpoints
///
/// - `GET /links/my-links` - Links created by the caller
pub fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/links/my-links", get(my_links_handler))
        .route_layer(middleware::from_fn_with_state(state, auth::layer))
}
