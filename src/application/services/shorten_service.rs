//! Short code allocation service.

use std::sync::Arc;

use metrics::counter;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::application::deadline::with_deadline;
use crate::application::settings::ServiceSettings;
use crate::domain::entities::{Link, NewLink, PrincipalId};
use crate::domain::repositories::LinkRepository;
use crate::domain::repositories::link_repository::CODE_UNIQUE_CONSTRAINT;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;
use crate::utils::url_validator::validate_long_url;

/// Result of an allocation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub link: Link,
    /// `false` when an existing record was returned instead of minting a code.
    pub created: bool,
}

/// Service that assigns short codes to long URLs.
///
/// Re-submitting a URL that is already shortened (within the configured
/// dedup scope) returns the existing record. New codes are random; a
/// collision on insert is retried with a fresh code a bounded number of times.
pub struct ShortenService {
    link_repository: Arc<dyn LinkRepository>,
    settings: ServiceSettings,
}

impl ShortenService {
    /// Creates a new shorten service.
    pub fn new(link_repository: Arc<dyn LinkRepository>, settings: ServiceSettings) -> Self {
        Self {
            link_repository,
            settings,
        }
    }

    /// Returns an existing or newly minted mapping record for `long_url`.
    ///
    /// # Flow
    ///
    /// 1. Validate the URL (no store access on failure)
    /// 2. Look up an existing record for the exact URL
    /// 3. Otherwise generate a code and insert, regenerating on code collisions
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is empty or not an absolute URI.
    /// Returns [`AppError::CodeSpaceExhausted`] if every attempt collided.
    /// Returns [`AppError::Internal`] on store failures or timeouts.
    pub async fn allocate(
        &self,
        long_url: &str,
        owner: Option<PrincipalId>,
    ) -> Result<Allocation, AppError> {
        let long_url = validate_long_url(long_url)
            .map_err(|e| AppError::bad_request(e.to_string(), json!({ "reason": format!("{e:?}") })))?;

        let filter = self.settings.dedup_scope.filter_for(owner.as_ref());
        let existing = with_deadline(
            self.settings.store_timeout,
            "find_by_long_url",
            self.link_repository.find_by_long_url(&long_url, filter),
        )
        .await?;

        if let Some(link) = existing {
            debug!(code = %link.code, "Long URL already shortened");
            counter!("links_deduplicated_total").increment(1);
            return Ok(Allocation {
                link,
                created: false,
            });
        }

        let attempts = self.settings.max_code_attempts;

        for attempt in 1..=attempts {
            let code = generate_code(self.settings.code_length);
            let new_link = NewLink {
                short_url: self.settings.short_url(&code),
                code: code.clone(),
                long_url: long_url.clone(),
                owner_id: owner.clone(),
            };

            let created = with_deadline(
                self.settings.store_timeout,
                "create",
                self.link_repository.create(new_link),
            )
            .await;

            match created {
                Ok(link) => {
                    info!(code = %link.code, owned = link.is_owned(), "Short link created");
                    counter!("links_created_total").increment(1);
                    return Ok(Allocation {
                        link,
                        created: true,
                    });
                }
                Err(e) if e.is_conflict_on(CODE_UNIQUE_CONSTRAINT) => {
                    warn!(%code, attempt, "Short code collision, regenerating");
                    counter!("code_collisions_total").increment(1);
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::CodeSpaceExhausted { attempts })
    }

    /// Lists the links created by `owner`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store failures or timeouts.
    pub async fn links_for_owner(&self, owner: &PrincipalId) -> Result<Vec<Link>, AppError> {
        with_deadline(
            self.settings.store_timeout,
            "list_by_owner",
            self.link_repository.list_by_owner(owner),
        )
        .await
    }
}
