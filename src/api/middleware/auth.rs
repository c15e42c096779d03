//! Bearer credential middleware.
//!
//! Two variants are provided:
//!
//! - [`optional_layer`] - anonymous requests pass through, a supplied
//!   credential must be valid
//! - [`layer`] - a valid credential is required
//!
//! Both insert a [`Caller`] extension for downstream handlers.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::domain::entities::PrincipalId;
use crate::{error::AppError, state::AppState};

/// Header the browser client sends its token in.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// The principal making the request, `None` for anonymous callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller(pub Option<PrincipalId>);

/// Resolves an optional credential.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// x-auth-token: <token>
/// ```
///
/// `Authorization` wins when both are present.
///
/// # Errors
///
/// Returns `401 Unauthorized` if a credential is present but malformed,
/// expired, or signed with another key.
pub async fn optional_layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let caller = match extract_token(&mut parts).await? {
        Some(token) => Caller(Some(st.auth_service.authenticate(&token)?)),
        None => Caller(None),
    };

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(caller);

    Ok(next.run(req).await)
}

/// Requires a valid credential.
///
/// # Errors
///
/// Returns `401 Unauthorized` if no credential is supplied or it does not
/// verify. Adds `WWW-Authenticate: Bearer` to the response.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/links/my-links", get(my_links_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let token = extract_token(&mut parts).await?.ok_or_else(|| {
        AppError::unauthorized(
            "Authentication required",
            json!({ "reason": "No credential supplied" }),
        )
    })?;

    let principal = st.auth_service.authenticate(&token)?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(Caller(Some(principal)));

    Ok(next.run(req).await)
}

async fn extract_token(parts: &mut Parts) -> Result<Option<String>, AppError> {
    if parts.headers.contains_key(axum::http::header::AUTHORIZATION) {
        let AuthBearer(token) = AuthBearer::from_request_parts(parts, &())
            .await
            .map_err(|_| {
                AppError::unauthorized(
                    "Invalid token",
                    json!({ "reason": "Authorization header is not a bearer credential" }),
                )
            })?;
        return Ok(Some(token));
    }

    match parts.headers.get(AUTH_TOKEN_HEADER) {
        Some(value) => {
            let token = value.to_str().map_err(|_| {
                AppError::unauthorized(
                    "Invalid token",
                    json!({ "reason": "x-auth-token is not valid ASCII" }),
                )
            })?;
            Ok(Some(token.trim().to_string()))
        }
        None => Ok(None),
    }
}
