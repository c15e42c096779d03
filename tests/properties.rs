mod common;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use link_shortener::application::services::{RedirectService, ShortenService};
use link_shortener::domain::entities::{DedupScope, PrincipalId};
use link_shortener::domain::repositories::LinkRepository;
use link_shortener::error::AppError;
use link_shortener::infrastructure::persistence::MemoryLinkRepository;
use link_shortener::utils::code_generator::ALPHABET;

fn services(repo: Arc<MemoryLinkRepository>) -> (ShortenService, RedirectService) {
    let settings = common::test_settings();
    (
        ShortenService::new(repo.clone(), settings.clone()),
        RedirectService::new(repo, settings),
    )
}

#[tokio::test]
async fn test_allocate_then_resolve_scenario() {
    let repo = Arc::new(MemoryLinkRepository::new());
    let (shorten, redirect) = services(repo.clone());

    let allocation = shorten
        .allocate("https://example.com/a/b/c", None)
        .await
        .unwrap();
    assert!(allocation.created);
    let code = allocation.link.code;

    let first = redirect.resolve(&code).await.unwrap();
    assert_eq!(first.long_url, "https://example.com/a/b/c");
    assert_eq!(first.clicks, 1);

    let second = redirect.resolve(&code).await.unwrap();
    assert_eq!(second.clicks, 2);
}

#[tokio::test]
async fn test_repeat_allocation_returns_same_code() {
    let repo = Arc::new(MemoryLinkRepository::new());
    let (shorten, _) = services(repo.clone());

    let first = shorten
        .allocate("https://example.com/a/b/c", None)
        .await
        .unwrap();
    let second = shorten
        .allocate("https://example.com/a/b/c", None)
        .await
        .unwrap();

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.link.code, second.link.code);
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn test_generated_codes_are_unique_and_well_formed() {
    let repo = Arc::new(MemoryLinkRepository::new());
    let (shorten, _) = services(repo.clone());
    let length = common::test_settings().code_length;

    let mut codes = HashSet::new();
    for i in 0..500 {
        let allocation = shorten
            .allocate(&format!("https://example.com/page/{i}"), None)
            .await
            .unwrap();
        let code = allocation.link.code;

        assert_eq!(code.len(), length);
        assert!(code.bytes().all(|b| ALPHABET.contains(&b)));
        assert!(codes.insert(code), "duplicate short code issued");
    }

    assert_eq!(repo.len(), 500);
}

#[tokio::test]
async fn test_resolve_unknown_code_leaves_store_unchanged() {
    let repo = Arc::new(MemoryLinkRepository::new());
    let (shorten, redirect) = services(repo.clone());

    let existing = shorten
        .allocate("https://example.com", None)
        .await
        .unwrap()
        .link;

    let err = redirect.resolve("doesnotexist").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));

    assert_eq!(repo.len(), 1);
    let after = repo.find_by_code(&existing.code).await.unwrap().unwrap();
    assert_eq!(after, existing);
}

#[tokio::test]
async fn test_invalid_url_performs_no_write() {
    let repo = Arc::new(MemoryLinkRepository::new());
    let (shorten, _) = services(repo.clone());

    let err = shorten.allocate("not-a-url", None).await.unwrap_err();

    assert!(matches!(err, AppError::Validation { .. }));
    assert!(repo.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_resolves_count_exactly() {
    const N: i64 = 500;

    let repo = Arc::new(MemoryLinkRepository::new());
    let (shorten, redirect) = services(repo.clone());
    let redirect = Arc::new(redirect);

    let code = shorten
        .allocate("https://example.com/hot", None)
        .await
        .unwrap()
        .link
        .code;

    let before = repo.find_by_code(&code).await.unwrap().unwrap().clicks;

    let tasks: Vec<_> = (0..N)
        .map(|_| {
            let redirect = redirect.clone();
            let code = code.clone();
            tokio::spawn(async move { redirect.resolve(&code).await })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let after = repo.find_by_code(&code).await.unwrap().unwrap().clicks;
    assert_eq!(after, before + N);
}

#[tokio::test]
async fn test_per_owner_dedup_scope() {
    let repo = Arc::new(MemoryLinkRepository::new());
    let mut settings = common::test_settings();
    settings.dedup_scope = DedupScope::PerOwner;
    let shorten = ShortenService::new(repo.clone(), settings);

    let alice = shorten
        .allocate("https://example.com/x", Some(PrincipalId::new("alice")))
        .await
        .unwrap();
    let bob = shorten
        .allocate("https://example.com/x", Some(PrincipalId::new("bob")))
        .await
        .unwrap();
    let alice_again = shorten
        .allocate("https://example.com/x", Some(PrincipalId::new("alice")))
        .await
        .unwrap();

    assert!(bob.created);
    assert_ne!(alice.link.code, bob.link.code);
    assert!(!alice_again.created);
    assert_eq!(alice.link.code, alice_again.link.code);
    assert_eq!(repo.len(), 2);
}

#[tokio::test]
async fn test_store_deadline_surfaces_as_internal_error() {
    let repo = Arc::new(common::SlowRepository {
        inner: MemoryLinkRepository::new(),
        delay: Duration::from_millis(500),
    });
    let mut settings = common::test_settings();
    settings.store_timeout = Duration::from_millis(20);

    let shorten = ShortenService::new(repo.clone(), settings.clone());
    let redirect = RedirectService::new(repo.clone(), settings);

    let err = shorten
        .allocate("https://example.com", None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Internal { .. }));

    let err = redirect.resolve("abc1234").await.unwrap_err();
    assert!(matches!(err, AppError::Internal { .. }));

    assert!(repo.inner.is_empty());
}
