//! Repository trait for the mapping store.

use crate::domain::entities::{Link, NewLink, OwnerFilter, PrincipalId};
use crate::error::AppError;
use async_trait::async_trait;

/// Name of the uniqueness constraint on short codes.
///
/// Implementations report a taken code as [`AppError::Conflict`] carrying
/// this name under the `constraint` detail key.
pub const CODE_UNIQUE_CONSTRAINT: &str = "links_code_key";

/// Durable, keyed storage of mapping records.
///
/// Records are keyed by their unique short code, with a secondary lookup on
/// the long URL. Every method is a single bounded operation against the
/// store; implementations must be safe to call from any number of
/// concurrent request handlers.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new mapping record with `clicks = 0`.
    ///
    /// The write is all-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code is already taken.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code without touching the counter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Finds the oldest link for an exact long URL, restricted by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_long_url(
        &self,
        long_url: &str,
        owner: OwnerFilter,
    ) -> Result<Option<Link>, AppError>;

    /// Atomically increments `clicks` for `code` and returns the updated link.
    ///
    /// Returns `Ok(None)` and leaves the store untouched if no link has that
    /// code. Concurrent calls never lose an increment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn increment_clicks(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Lists links owned by a principal, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_by_owner(&self, owner: &PrincipalId) -> Result<Vec<Link>, AppError>;

    /// Checks that the store is reachable.
    async fn health_check(&self) -> Result<(), AppError>;
}
