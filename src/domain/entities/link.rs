//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

use super::principal::PrincipalId;

/// A mapping record between a short code and a long URL.
///
/// Everything except `clicks` is immutable once the record exists. The
/// counter is only ever advanced by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub long_url: String,
    /// `BASE_URL + "/" + code`, stored alongside the code for convenience.
    pub short_url: String,
    pub owner_id: Option<PrincipalId>,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        code: String,
        long_url: String,
        short_url: String,
        owner_id: Option<PrincipalId>,
        clicks: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            code,
            long_url,
            short_url,
            owner_id,
            clicks,
            created_at,
        }
    }

    /// Returns true if the link was created by an authenticated principal.
    pub fn is_owned(&self) -> bool {
        self.owner_id.is_some()
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub long_url: String,
    pub short_url: String,
    pub owner_id: Option<PrincipalId>,
}
