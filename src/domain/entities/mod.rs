//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Link`] - A mapping record between a short code and a long URL
//! - [`PrincipalId`] - Opaque id of the authenticated user owning a link
//! - [`DedupScope`] / [`OwnerFilter`] - Which records count as duplicates
//!
//! Creation input lives in the separate [`NewLink`] struct; store-assigned
//! fields (`id`, `clicks`, `created_at`) only appear on [`Link`].

pub mod dedup;
pub mod link;
pub mod principal;

pub use dedup::{DedupScope, OwnerFilter};
pub use link::{Link, NewLink};
pub use principal::PrincipalId;
