//! Short code resolution service.

use std::sync::Arc;

use metrics::counter;
use serde_json::json;
use tracing::debug;

use crate::application::deadline::with_deadline;
use crate::application::settings::ServiceSettings;
use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::is_well_formed;

/// Message returned for unknown short codes.
pub const NOT_FOUND_MESSAGE: &str = "No URL found";

/// Service that resolves short codes back to their long URLs.
pub struct RedirectService {
    link_repository: Arc<dyn LinkRepository>,
    settings: ServiceSettings,
}

impl RedirectService {
    /// Creates a new redirect service.
    pub fn new(link_repository: Arc<dyn LinkRepository>, settings: ServiceSettings) -> Self {
        Self {
            link_repository,
            settings,
        }
    }

    /// Resolves `code` and records one visit.
    ///
    /// The counter increment and the lookup are a single atomic store
    /// operation, so concurrent resolutions of the same code are all counted.
    /// Codes that could never have been issued are rejected without a store
    /// round-trip.
    ///
    /// Returns the updated record; the redirect target is its `long_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code. The store is
    /// not modified in that case.
    /// Returns [`AppError::Internal`] on store failures or timeouts.
    pub async fn resolve(&self, code: &str) -> Result<Link, AppError> {
        if !is_well_formed(code) {
            counter!("redirects_total", "outcome" => "miss").increment(1);
            return Err(not_found(code));
        }

        let link = with_deadline(
            self.settings.store_timeout,
            "increment_clicks",
            self.link_repository.increment_clicks(code),
        )
        .await?;

        match link {
            Some(link) => {
                debug!(%code, clicks = link.clicks, "Short code resolved");
                counter!("redirects_total", "outcome" => "hit").increment(1);
                Ok(link)
            }
            None => {
                debug!(%code, "Unknown short code");
                counter!("redirects_total", "outcome" => "miss").increment(1);
                Err(not_found(code))
            }
        }
    }

    /// Looks up `code` without recording a visit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::Internal`] on store failures or timeouts.
    pub async fn peek(&self, code: &str) -> Result<Link, AppError> {
        if !is_well_formed(code) {
            return Err(not_found(code));
        }

        with_deadline(
            self.settings.store_timeout,
            "find_by_code",
            self.link_repository.find_by_code(code),
        )
        .await?
        .ok_or_else(|| not_found(code))
    }

    /// Checks that the mapping store answers within the store deadline.
    pub async fn ping_store(&self) -> Result<(), AppError> {
        with_deadline(
            self.settings.store_timeout,
            "health_check",
            self.link_repository.health_check(),
        )
        .await
    }
}

fn not_found(code: &str) -> AppError {
    AppError::not_found(NOT_FOUND_MESSAGE, json!({ "code": code }))
}
