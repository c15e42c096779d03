#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::Request;
use axum::{Router, ServiceExt};
use axum_test::TestServer;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use link_shortener::application::ServiceSettings;
use link_shortener::application::services::AuthService;
use link_shortener::domain::entities::{Link, NewLink, OwnerFilter, PrincipalId};
use link_shortener::domain::repositories::LinkRepository;
use link_shortener::error::AppError;
use link_shortener::infrastructure::persistence::MemoryLinkRepository;
use link_shortener::routes::{app_router, router};
use link_shortener::state::AppState;

pub const TEST_SECRET: &str = "test-signing-secret";
pub const TEST_BASE_URL: &str = "http://sho.rt";

pub fn test_settings() -> ServiceSettings {
    ServiceSettings {
        base_url: TEST_BASE_URL.to_string(),
        ..ServiceSettings::default()
    }
}

pub fn create_test_state(repo: Arc<dyn LinkRepository>) -> AppState {
    AppState::new(repo, test_settings(), AuthService::new(TEST_SECRET))
}

/// Full router over a fresh in-memory store.
pub fn create_test_app() -> (TestServer, Arc<MemoryLinkRepository>) {
    let repo = Arc::new(MemoryLinkRepository::new());
    let app: Router = router(create_test_state(repo.clone()));

    (TestServer::new(app).unwrap(), repo)
}

/// Served router including path normalization, as run in production.
pub fn create_served_app() -> (TestServer, Arc<MemoryLinkRepository>) {
    let repo = Arc::new(MemoryLinkRepository::new());
    let app = app_router(create_test_state(repo.clone()));

    (
        TestServer::new(ServiceExt::<Request>::into_make_service(app)).unwrap(),
        repo,
    )
}

pub fn server_with_repo(repo: Arc<dyn LinkRepository>) -> TestServer {
    TestServer::new(router(create_test_state(repo))).unwrap()
}

pub fn token_for(principal: &str) -> String {
    AuthService::new(TEST_SECRET)
        .issue(&PrincipalId::new(principal), chrono::Duration::hours(1))
        .unwrap()
}

pub async fn create_test_link(repo: &MemoryLinkRepository, code: &str, url: &str) -> Link {
    repo.create(NewLink {
        code: code.to_string(),
        long_url: url.to_string(),
        short_url: format!("{TEST_BASE_URL}/{code}"),
        owner_id: None,
    })
    .await
    .unwrap()
}

/// Store whose every call fails like an unreachable database.
pub struct FailingRepository;

fn store_down() -> AppError {
    AppError::internal("Database error", json!({ "reason": "connection refused" }))
}

#[async_trait]
impl LinkRepository for FailingRepository {
    async fn create(&self, _new_link: NewLink) -> Result<Link, AppError> {
        Err(store_down())
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<Link>, AppError> {
        Err(store_down())
    }

    async fn find_by_long_url(
        &self,
        _long_url: &str,
        _owner: OwnerFilter,
    ) -> Result<Option<Link>, AppError> {
        Err(store_down())
    }

    async fn increment_clicks(&self, _code: &str) -> Result<Option<Link>, AppError> {
        Err(store_down())
    }

    async fn list_by_owner(&self, _owner: &PrincipalId) -> Result<Vec<Link>, AppError> {
        Err(store_down())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Err(store_down())
    }
}

/// Store that answers every call after `delay`.
pub struct SlowRepository {
    pub inner: MemoryLinkRepository,
    pub delay: Duration,
}

#[async_trait]
impl LinkRepository for SlowRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        tokio::time::sleep(self.delay).await;
        self.inner.create(new_link).await
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        tokio::time::sleep(self.delay).await;
        self.inner.find_by_code(code).await
    }

    async fn find_by_long_url(
        &self,
        long_url: &str,
        owner: OwnerFilter,
    ) -> Result<Option<Link>, AppError> {
        tokio::time::sleep(self.delay).await;
        self.inner.find_by_long_url(long_url, owner).await
    }

    async fn increment_clicks(&self, code: &str) -> Result<Option<Link>, AppError> {
        tokio::time::sleep(self.delay).await;
        self.inner.increment_clicks(code).await
    }

    async fn list_by_owner(&self, owner: &PrincipalId) -> Result<Vec<Link>, AppError> {
        tokio::time::sleep(self.delay).await;
        self.inner.list_by_owner(owner).await
    }

    async fn health_check(&self) -> Result<(), AppError> {
        tokio::time::sleep(self.delay).await;
        self.inner.health_check().await
    }
}
