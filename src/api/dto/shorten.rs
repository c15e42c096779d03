//! DTOs for link shortening and listing endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;

/// Request to shorten a single URL.
///
/// A missing or `null` `longUrl` is reported as a validation error rather
/// than a JSON error.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[serde(default, rename = "longUrl")]
    #[validate(
        required(message = "Please provide a URL"),
        length(min = 1, message = "Please provide a URL")
    )]
    pub long_url: Option<String>,
}

/// Mapping record as exposed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingRecord {
    pub long_url: String,
    pub short_code: String,
    pub short_url: String,
    pub owner_id: Option<String>,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Link> for MappingRecord {
    fn from(link: Link) -> Self {
        Self {
            long_url: link.long_url,
            short_code: link.code,
            short_url: link.short_url,
            owner_id: link.owner_id.map(|owner| owner.into_inner()),
            clicks: link.clicks,
            created_at: link.created_at,
        }
    }
}

/// Success envelope: `{ "success": true, "data": ... }`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
