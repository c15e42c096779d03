//! In-process implementation of link repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{Link, NewLink, OwnerFilter, PrincipalId};
use crate::domain::repositories::LinkRepository;
use crate::domain::repositories::link_repository::CODE_UNIQUE_CONSTRAINT;
use crate::error::AppError;

/// Mapping store kept in a sharded concurrent map keyed by short code.
///
/// Inserts go through the map's entry API, so a taken code is detected under
/// the shard lock. Click increments mutate the record in place while holding
/// the same lock. A second map from long URL to codes serves dedup lookups.
/// Nothing survives a restart; use it for development, tests, and
/// single-node deployments that can afford to lose their links.
#[derive(Default)]
pub struct MemoryLinkRepository {
    links: DashMap<String, Link>,
    /// Codes per long URL, in insertion order.
    by_long_url: DashMap<String, Vec<String>>,
    next_id: AtomicI64,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        match self.links.entry(new_link.code.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": CODE_UNIQUE_CONSTRAINT }),
            )),
            Entry::Vacant(slot) => {
                let link = Link::new(
                    self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
                    new_link.code,
                    new_link.long_url,
                    new_link.short_url,
                    new_link.owner_id,
                    0,
                    Utc::now(),
                );
                slot.insert(link.clone());
                // Code shard lock is released here; never hold both maps' locks.
                self.by_long_url
                    .entry(link.long_url.clone())
                    .or_default()
                    .push(link.code.clone());
                Ok(link)
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.get(code).map(|entry| entry.value().clone()))
    }

    async fn find_by_long_url(
        &self,
        long_url: &str,
        owner: OwnerFilter,
    ) -> Result<Option<Link>, AppError> {
        let Some(codes) = self.by_long_url.get(long_url).map(|e| e.value().clone()) else {
            return Ok(None);
        };

        Ok(codes
            .iter()
            .filter_map(|code| self.links.get(code).map(|entry| entry.value().clone()))
            .filter(|link| owner.matches(link.owner_id.as_ref()))
            .min_by_key(|link| (link.created_at, link.id)))
    }

    async fn increment_clicks(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.get_mut(code).map(|mut entry| {
            entry.clicks += 1;
            entry.value().clone()
        }))
    }

    async fn list_by_owner(&self, owner: &PrincipalId) -> Result<Vec<Link>, AppError> {
        let mut links: Vec<Link> = self
            .links
            .iter()
            .filter(|entry| entry.value().owner_id.as_ref() == Some(owner))
            .map(|entry| entry.value().clone())
            .collect();

        links.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(links)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
