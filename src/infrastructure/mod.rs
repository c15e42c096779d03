//! Infrastructure layer for external integrations.
//!
//! This layer implements the repository interface defined by the domain
//! layer.
//!
//! - [`persistence`] - PostgreSQL and in-memory mapping stores

pub mod persistence;
