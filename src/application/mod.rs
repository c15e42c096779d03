//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::repositories::LinkRepository`] trait
//! and provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::ShortenService`] - Short code allocation and owner listings
//! - [`services::RedirectService`] - Short code resolution with click counting
//! - [`services::AuthService`] - Bearer token verification
//!
//! Every store call made by a service is bounded by [`deadline::with_deadline`].

pub mod deadline;
pub mod services;
pub mod settings;

pub use settings::ServiceSettings;
