//! Repository trait definitions for the domain layer.
//!
//! The mapping store is abstracted behind [`LinkRepository`]. Implementations
//! live in `crate::infrastructure::persistence`; a mock is generated via
//! `mockall` for service tests.

pub mod link_repository;

pub use link_repository::LinkRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
