//! Mapping store implementations.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - PostgreSQL, via SQLx
//! - [`MemoryLinkRepository`] - In-process concurrent map, via dashmap

pub mod memory_link_repository;
pub mod pg_link_repository;

pub use memory_link_repository::MemoryLinkRepository;
pub use pg_link_repository::PgLinkRepository;
