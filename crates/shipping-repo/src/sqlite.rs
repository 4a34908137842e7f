use async_trait::async_trait;
use shipping_types::domain::store_token::StoreToken;
use shipping_types::ports::token_repository::{RepoError, StoreTokenRepository};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;

const PING_ATTEMPTS: u32 = 3;

pub struct SqliteTokenStore {
    pool: SqlitePool,
}

#[derive(FromRow)]
struct DbStoreToken {
    store_id: String,
    access_token: String,
}

impl DbStoreToken {
    fn into_token(self) -> StoreToken {
        StoreToken {
            store_id: self.store_id,
            access_token: self.access_token,
        }
    }
}

impl SqliteTokenStore {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        // Run migration from migration file.
        let ddl = include_str!("../migrations/0001_create_store_tokens.sql");
        sqlx::query(ddl).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Verify the connection is alive before an operation, retrying a bounded
    /// number of times. Pooled connections can go stale between requests.
    async fn ensure_connected(&self) -> Result<(), RepoError> {
        let mut last_err = None;
        for attempt in 1..=PING_ATTEMPTS {
            match sqlx::query("SELECT 1").execute(&self.pool).await {
                Ok(_) => return Ok(()),
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "database ping failed");
                    last_err = Some(e);
                }
            }
        }
        Err(RepoError::Db(
            last_err
                .map(|e| e.to_string())
                .unwrap_or_else(|| "connection check failed".into()),
        ))
    }
}

#[async_trait]
impl StoreTokenRepository for SqliteTokenStore {
    async fn save(&self, token: StoreToken) -> Result<(), RepoError> {
        if !token.is_valid() {
            return Err(RepoError::Invalid(
                "store_id and access_token must be non-empty".into(),
            ));
        }
        self.ensure_connected().await?;

        let res = sqlx::query("INSERT INTO store_tokens (store_id, access_token) VALUES (?, ?)")
            .bind(&token.store_id)
            .bind(&token.access_token)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Db(e.to_string()))?;
        if res.rows_affected() == 0 {
            return Err(RepoError::Db(format!(
                "insert for store {} affected no rows",
                token.store_id
            )));
        }
        Ok(())
    }

    async fn get_by_store(&self, store_id: &str) -> Result<Option<StoreToken>, RepoError> {
        if store_id.trim().is_empty() {
            return Err(RepoError::Invalid("store_id must be non-empty".into()));
        }
        self.ensure_connected().await?;

        let row: Option<DbStoreToken> = sqlx::query_as(
            "SELECT store_id, access_token FROM store_tokens WHERE store_id = ? ORDER BY id DESC LIMIT 1",
        )
        .bind(store_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Db(e.to_string()))?;
        Ok(row.map(DbStoreToken::into_token))
    }
}
