#![cfg(feature = "memory")]

use shipping_repo::memory::InMemoryTokenStore;
use shipping_types::domain::store_token::StoreToken;
use shipping_types::ports::token_repository::{RepoError, StoreTokenRepository};

#[tokio::test]
async fn save_then_get_roundtrip() {
    let repo = InMemoryTokenStore::new();
    let token = StoreToken::new("12345", "tok-abc").unwrap();

    repo.save(token.clone()).await.unwrap();

    let fetched = repo.get_by_store("12345").await.unwrap().unwrap();
    assert_eq!(fetched, token);
}

#[tokio::test]
async fn most_recent_token_wins() {
    let repo = InMemoryTokenStore::new();
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
    let repo = InMemoryTokenStore::new();

    let invalid = StoreToken {
        store_id: String::new(),
        access_token: "tok".into(),
    };
    assert!(matches!(
        repo.save(invalid).await,
        Err(RepoError::Invalid(_))
    ));

    let missing_token = StoreToken {
        store_id: "12345".into(),
        access_token: String::new(),
    };
    assert!(matches!(
        repo.save(missing_token).await,
        Err(RepoError::Invalid(_))
    ));

    assert!(matches!(
        repo.get_by_store("").await,
        Err(RepoError::Invalid(_))
    ));
}

#[tokio::test]
async fn missing_store_returns_none() {
    let repo = InMemoryTokenStore::new();
    let missing = repo.get_by_store("99999").await.unwrap();
    assert!(missing.is_none());
}
