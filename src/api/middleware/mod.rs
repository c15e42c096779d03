//! HTTP middleware for request processing.
//!
//! Provides credential resolution and observability middleware.

pub mod auth;
pub mod tracing;

pub use auth::Caller;
