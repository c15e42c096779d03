//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`              - Short link redirect (public)
//! - `GET  /health`              - Store health check (public)
//! - `POST /api/shorten`         - Shorten a URL (credential optional)
//! - `GET  /api/links/my-links`  - Caller's links (credential required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Bearer JWT, per route group
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

/// Routes and middleware without path normalization.
pub fn router(state: AppState) -> Router {
    let api_router = Router::new()
        .merge(api::routes::public_routes(state.clone()))
        .merge(api::routes::protected_routes(state.clone()));

    Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer())
}
