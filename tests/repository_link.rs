//! PostgreSQL store tests. Run with a database:
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo test --test repository_link -- --ignored
//! ```

use sqlx::PgPool;
use std::sync::Arc;

use link_shortener::domain::entities::{NewLink, OwnerFilter, PrincipalId};
use link_shortener::domain::repositories::LinkRepository;
use link_shortener::domain::repositories::link_repository::CODE_UNIQUE_CONSTRAINT;
use link_shortener::infrastructure::persistence::PgLinkRepository;

fn new_link(code: &str, url: &str, owner: Option<&str>) -> NewLink {
    NewLink {
        code: code.to_string(),
        long_url: url.to_string(),
        short_url: format!("http://sho.rt/{code}"),
        owner_id: owner.map(PrincipalId::new),
    }
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_create_link(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo
        .create(new_link("test123", "https://example.com", Some("u1")))
        .await
        .unwrap();

    assert_eq!(link.code, "test123");
    assert_eq!(link.long_url, "https://example.com");
    assert_eq!(link.short_url, "http://sho.rt/test123");
    assert_eq!(link.owner_id, Some(PrincipalId::new("u1")));
    assert_eq!(link.clicks, 0);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_create_duplicate_code(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.create(new_link("dup0001", "https://a.example", None))
        .await
        .unwrap();

    let err = repo
        .create(new_link("dup0001", "https://b.example", None))
        .await
        .unwrap_err();

    assert!(err.is_conflict_on(CODE_UNIQUE_CONSTRAINT));
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_find_by_code_not_found(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let result = repo.find_by_code("notfound").await.unwrap();

    assert!(result.is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_find_by_long_url_filters(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.create(new_link("anon001", "https://example.com", None))
        .await
        .unwrap();
    repo.create(new_link("owned01", "https://example.com", Some("u1")))
        .await
        .unwrap();

    let any = repo
        .find_by_long_url("https://example.com", OwnerFilter::Any)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(any.code, "anon001");

    let owned = repo
        .find_by_long_url(
            "https://example.com",
            OwnerFilter::Exactly(Some(PrincipalId::new("u1"))),
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(owned.code, "owned01");

    let anonymous = repo
        .find_by_long_url("https://example.com", OwnerFilter::Exactly(None))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(anonymous.code, "anon001");

    let missing = repo
        .find_by_long_url("https://other.example", OwnerFilter::Any)
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_increment_clicks(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.create(new_link("click01", "https://example.com", None))
        .await
        .unwrap();

    assert_eq!(
        repo.increment_clicks("click01").await.unwrap().unwrap().clicks,
        1
    );
    assert_eq!(
        repo.increment_clicks("click01").await.unwrap().unwrap().clicks,
        2
    );
    assert!(repo.increment_clicks("missing").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_concurrent_increments(pool: PgPool) {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));

    repo.create(new_link("hot0001", "https://example.com", None))
        .await
        .unwrap();

    let tasks: Vec<_> = (0..50)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.increment_clicks("hot0001").await })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let link = repo.find_by_code("hot0001").await.unwrap().unwrap();
    assert_eq!(link.clicks, 50);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_list_by_owner(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.create(new_link("first01", "https://example.com/1", Some("u1")))
        .await
        .unwrap();
    repo.create(new_link("other01", "https://example.com/2", Some("u2")))
        .await
        .unwrap();
    repo.create(new_link("second1", "https://example.com/3", Some("u1")))
        .await
        .unwrap();

    let links = repo.list_by_owner(&PrincipalId::new("u1")).await.unwrap();
    let codes: Vec<_> = links.iter().map(|l| l.code.as_str()).collect();

    assert_eq!(codes.len(), 2);
    assert!(codes.contains(&"first01"));
    assert!(codes.contains(&"second1"));
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_health_check(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.health_check().await.is_ok());
}
