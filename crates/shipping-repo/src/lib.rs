#[cfg(not(any(feature = "memory", feature = "sqlite")))]
compile_error!("Enable a repo feature: `memory` or `sqlite`.");

use shipping_types::domain::store_token::StoreToken;
use shipping_types::ports::token_repository::{RepoError, StoreTokenRepository};

#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub struct Repo {
    #[cfg(feature = "memory")]
    #[cfg_attr(feature = "sqlite", allow(dead_code))]
    memory: memory::InMemoryTokenStore,
    #[cfg(feature = "sqlite")]
    sqlite: sqlite::SqliteTokenStore,
}

pub async fn build_repo(url: Option<&str>) -> anyhow::Result<Repo> {
    Repo::build_repo(url).await
}

impl Repo {
    #[cfg(all(feature = "memory", not(feature = "sqlite")))]
    pub async fn build_repo(_: Option<&str>) -> anyhow::Result<Self> {
        Ok(Self {
            memory: memory::InMemoryTokenStore::new(),
        })
    }

    #[cfg(all(feature = "sqlite", not(feature = "memory")))]
    pub async fn build_repo(database_url: Option<&str>) -> anyhow::Result<Self> {
        let url = database_url.unwrap_or("sqlite://store_tokens.db");
        let sqlite = sqlite::SqliteTokenStore::new(url).await?;
        Ok(Self { sqlite })
    }

    // If both features are enabled, sqlite is the backing store.
    #[cfg(all(feature = "sqlite", feature = "memory"))]
    pub async fn build_repo(database_url: Option<&str>) -> anyhow::Result<Self> {
        let memory = memory::InMemoryTokenStore::new();
        let url = database_url.unwrap_or("sqlite://store_tokens.db");
        let sqlite = sqlite::SqliteTokenStore::new(url).await?;
        Ok(Self { memory, sqlite })
    }
}

#[cfg(all(feature = "memory", not(feature = "sqlite")))]
#[async_trait::async_trait]
impl StoreTokenRepository for Repo {
    async fn save(&self, token: StoreToken) -> Result<(), RepoError> {
        self.memory.save(token).await
    }

    async fn get_by_store(&self, store_id: &str) -> Result<Option<StoreToken>, RepoError> {
        self.memory.get_by_store(store_id).await
    }
}

#[cfg(all(feature = "sqlite", not(feature = "memory")))]
#[async_trait::async_trait]
impl StoreTokenRepository for Repo {
    async fn save(&self, token: StoreToken) -> Result<(), RepoError> {
        self.sqlite.save(token).await
    }

    async fn get_by_store(&self, store_id: &str) -> Result<Option<StoreToken>, RepoError> {
        self.sqlite.get_by_store(store_id).await
    }
}

#[cfg(all(feature = "sqlite", feature = "memory"))]
#[async_trait::async_trait]
impl StoreTokenRepository for Repo {
    async fn save(&self, token: StoreToken) -> Result<(), RepoError> {
        self.sqlite.save(token).await
    }

    async fn get_by_store(&self, store_id: &str) -> Result<Option<StoreToken>, RepoError> {
        self.sqlite.get_by_store(store_id).await
    }
}
