use async_trait::async_trait;

use crate::domain::store_token::StoreToken;

#[derive(thiserror::Error, Debug)]
pub enum RepoError {
    #[error("invalid token: {0}")]
    Invalid(String),
    #[error("db error: {0}")]
    Db(String),
}

/// Append-only persistence for store authorization tokens.
#[async_trait]
pub trait StoreTokenRepository: Send + Sync + 'static {
    /// Persist one token. `Invalid` when either field is empty, `Db` when the
    /// write fails or affects no rows.
    async fn save(&self, token: StoreToken) -> Result<(), RepoError>;

    /// Most recently saved token for a store, or `None` when the store never
    /// installed. `Invalid` on an empty store id.
    async fn get_by_store(&self, store_id: &str) -> Result<Option<StoreToken>, RepoError>;
}
