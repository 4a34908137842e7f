use async_trait::async_trait;
use dashmap::DashMap;
use shipping_types::domain::store_token::StoreToken;
use shipping_types::ports::token_repository::{RepoError, StoreTokenRepository};
use std::sync::Arc;

/// In-memory token store. Rows are appended per store; the newest entry wins
/// on read, matching the sqlite adapter's ORDER BY id DESC semantics.
#[derive(Clone)]
pub struct InMemoryTokenStore {
    map: Arc<DashMap<String, Vec<StoreToken>>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self {
            map: Arc::new(DashMap::new()),
        }
    }
}

impl Default for InMemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoreTokenRepository for InMemoryTokenStore {
    async fn save(&self, token: StoreToken) -> Result<(), RepoError> {
        if !token.is_valid() {
            return Err(RepoError::Invalid(
                "store_id and access_token must be non-empty".into(),
            ));
        }
        self.map
            .entry(token.store_id.clone())
            .or_default()
            .push(token);
        Ok(())
    }

    async fn get_by_store(&self, store_id: &str) -> Result<Option<StoreToken>, RepoError> {
        if store_id.trim().is_empty() {
            return Err(RepoError::Invalid("store_id must be non-empty".into()));
        }
        Ok(self
            .map
            .get(store_id)
            .and_then(|rows| rows.last().cloned()))
    }
}
