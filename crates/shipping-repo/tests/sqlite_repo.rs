#![cfg(feature = "sqlite")]

use shipping_repo::sqlite::SqliteTokenStore;
use shipping_types::domain::store_token::StoreToken;
use shipping_types::ports::token_repository::{RepoError, StoreTokenRepository};
use std::path::PathBuf;
use uuid::Uuid;

fn temp_db_url() -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut path = PathBuf::from(dir.path());
    path.push(format!("tokens-{}.db", Uuid::new_v4()));
    let url = format!("sqlite://{}", path.display());
    (dir, url)
}

#[tokio::test]
async fn save_then_get_roundtrip() {
    let (_dir, url) = temp_db_url();
    let repo = SqliteTokenStore::new(&url).await.unwrap();

    let token = StoreToken::new("12345", "tok-abc").unwrap();
    repo.save(token.clone()).await.unwrap();

    let fetched = repo.get_by_store("12345").await.unwrap().unwrap();
    assert_eq!(fetched, token);
}

#[tokio::test]
async fn most_recent_token_wins() {
    let (_dir, url) = temp_db_url();
    let repo = SqliteTokenStore::new(&url).await.unwrap();

    repo.save(StoreToken::new("12345", "old-token").unwrap())
        .await
        .unwrap();
    repo.save(StoreToken::new("12345", "new-token").unwrap())
        .await
        .unwrap();

    let fetched = repo.get_by_store("12345").await.unwrap().unwrap();
    assert_eq!(fetched.access_token, "new-token");
}

#[tokio::test]
async fn rejects_invalid_tokens_and_empty_store_id() {
    let (_dir, url) = temp_db_url();
    let repo = SqliteTokenStore::new(&url).await.unwrap();

    let invalid = StoreToken {
        store_id: String::new(),
        access_token: "tok".into(),
    };
    assert!(matches!(
        repo.save(invalid).await,
        Err(RepoError::Invalid(_))
    ));

    assert!(matches!(
        repo.get_by_store("  ").await,
        Err(RepoError::Invalid(_))
    ));
}

#[tokio::test]
async fn missing_store_returns_none() {
    let (_dir, url) = temp_db_url();
    let repo = SqliteTokenStore::new(&url).await.unwrap();

    let missing = repo.get_by_store("99999").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn tokens_for_other_stores_are_not_returned() {
    let (_dir, url) = temp_db_url();
    let repo = SqliteTokenStore::new(&url).await.unwrap();

    repo.save(StoreToken::new("111", "tok-a").unwrap())
        .await
        .unwrap();
    repo.save(StoreToken::new("222", "tok-b").unwrap())
        .await
        .unwrap();

    let fetched = repo.get_by_store("222").await.unwrap().unwrap();
    assert_eq!(fetched.access_token, "tok-b");
}
