//! Principal resolution for bearer credentials.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::entities::PrincipalId;
use crate::error::AppError;

/// Claims carried by a principal token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Opaque principal id assigned by the identity provider.
    pub sub: String,
    pub exp: usize,
    #[serde(default)]
    pub iat: Option<usize>,
}

/// Service that turns bearer credentials into principal ids.
///
/// Users and credentials are managed by an external identity service that
/// signs HS256 JWTs with a secret shared with this service. Only the `sub`
/// claim is used, and it is treated as an opaque id.
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `secret` - HS256 key shared with the identity provider
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verifies a token and returns the principal it was issued to.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the signature is wrong, the token
    /// has expired, or the subject is empty.
    pub fn authenticate(&self, token: &str) -> Result<PrincipalId, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            AppError::unauthorized("Invalid token", json!({ "reason": e.to_string() }))
        })?;

        let subject = data.claims.sub.trim();
        if subject.is_empty() {
            return Err(AppError::unauthorized(
                "Invalid token",
                json!({ "reason": "empty subject" }),
            ));
        }

        Ok(PrincipalId::new(subject))
    }

    /// Signs a token for `principal` valid for `ttl`.
    ///
    /// Intended for operators and tests; production tokens come from the
    /// identity provider.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `ttl` puts the expiry out of range.
    /// Returns [`AppError::Internal`] if encoding fails.
    pub fn issue(&self, principal: &PrincipalId, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
            AppError::bad_request(
                "Token lifetime out of range",
                json!({ "ttl_seconds": ttl.num_seconds() }),
            )
        })?;
        let claims = Claims {
            sub: principal.as_str().to_string(),
            exp: expires_at.timestamp().max(0) as usize,
            iat: Some(now.timestamp().max(0) as usize),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            AppError::internal("Failed to sign token", json!({ "reason": e.to_string() }))
        })
    }
}
