//! Shared application state passed to every handler.

use std::sync::Arc;

use crate::application::ServiceSettings;
use crate::application::services::{AuthService, RedirectService, ShortenService};
use crate::domain::repositories::LinkRepository;

/// Services reachable from request handlers.
///
/// Cloning is cheap; every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<ShortenService>,
    pub redirect_service: Arc<RedirectService>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    /// Wires the services around one mapping store.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        settings: ServiceSettings,
        auth_service: AuthService,
    ) -> Self {
        Self {
            shorten_service: Arc::new(ShortenService::new(
                link_repository.clone(),
                settings.clone(),
            )),
            redirect_service: Arc::new(RedirectService::new(link_repository, settings)),
            auth_service: Arc::new(auth_service),
        }
    }
}
