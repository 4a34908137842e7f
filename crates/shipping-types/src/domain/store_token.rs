use serde::{Deserialize, Serialize};

/// One store's authorization to call the platform API on its behalf.
/// Insert-only: a re-install appends a fresh row, the newest row wins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreToken {
    pub store_id: String,
    pub access_token: String,
}

impl StoreToken {
    pub fn new(store_id: impl Into<String>, access_token: impl Into<String>) -> anyhow::Result<Self> {
        let store_id = store_id.into();
        let access_token = access_token.into();
        if store_id.trim().is_empty() {
            anyhow::bail!("store_id empty");
        }
        if access_token.trim().is_empty() {
            anyhow::bail!("access_token empty");
        }
        Ok(Self {
            store_id,
            access_token,
        })
    }

    pub fn is_valid(&self) -> bool {
        !self.store_id.trim().is_empty() && !self.access_token.trim().is_empty()
    }
}

/// Immutable credential pair handed to every authenticated platform call.
/// Replaces mutable access-token/store-id fields on a shared client.
#[derive(Debug, Clone)]
pub struct StoreAuth {
    pub store_id: String,
    pub access_token: String,
}

impl StoreAuth {
    pub fn new(store_id: impl Into<String>, access_token: impl Into<String>) -> anyhow::Result<Self> {
        let token = StoreToken::new(store_id, access_token)?;
        Ok(Self::from(token))
    }
}

impl From<StoreToken> for StoreAuth {
    fn from(t: StoreToken) -> Self {
        Self {
            store_id: t.store_id,
            access_token: t.access_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_token_requires_both_fields() {
        let ok = StoreToken::new("12345", "abcdef").unwrap();
        assert_eq!(ok.store_id, "12345");
        assert!(ok.is_valid());

        assert!(StoreToken::new("", "abcdef").is_err());
        assert!(StoreToken::new("12345", "").is_err());
        assert!(StoreToken::new("   ", "abcdef").is_err());
    }

    #[test]
    fn auth_from_token_carries_fields() {
        let token = StoreToken::new("42", "tok").unwrap();
        let auth = StoreAuth::from(token);
        assert_eq!(auth.store_id, "42");
        assert_eq!(auth.access_token, "tok");
        assert!(StoreAuth::new("", "tok").is_err());
    }
}
