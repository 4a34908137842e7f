use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::json;

use shipping_types::domain::platform::{Carrier, CarrierOption, CarrierOptionParams, Store};
use shipping_types::domain::store_token::StoreAuth;
use shipping_types::ports::platform::{PlatformApi, PlatformError};

pub const PRODUCTION_API_URL: &str = "https://api.tiendanube.com/v1/";
pub const PRODUCTION_AUTHORIZATION_URL: &str = "https://www.tiendanube.com/apps/authorize/token";

/// Nuvemshop/Tiendanube REST client. Holds only app-level credentials; store
/// credentials are passed per call as a `StoreAuth`.
#[derive(Clone)]
pub struct PlatformClient {
    api_url: Url,
    authorization_url: Url,
    app_id: String,
    app_secret: String,
    client: reqwest::Client,
}

#[derive(Clone)]
pub struct PlatformClientBuilder {
    api_url: Url,
    authorization_url: Url,
    app_id: String,
    app_secret: String,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

impl PlatformClient {
    pub fn new(app_id: &str, app_secret: &str) -> anyhow::Result<Self> {
        Self::builder(app_id, app_secret)?.build()
    }

    pub fn builder(app_id: &str, app_secret: &str) -> anyhow::Result<PlatformClientBuilder> {
        Ok(PlatformClientBuilder {
            api_url: Url::parse(PRODUCTION_API_URL).context("invalid production api url")?,
            authorization_url: Url::parse(PRODUCTION_AUTHORIZATION_URL)
                .context("invalid production authorization url")?,
            app_id: app_id.to_string(),
            app_secret: app_secret.to_string(),
            timeout: None,
            client: None,
        })
    }

    /// `{api_url}/{store_id}/{endpoint}`
    fn url(&self, auth: &StoreAuth, endpoint: &str) -> Result<Url, PlatformError> {
        self.api_url
            .join(&format!("{}/{}", auth.store_id, endpoint))
            .map_err(|e| PlatformError::Transport(e.to_string()))
    }

    // The platform expects its token in a non-standard `Authentication`
    // header, not `Authorization`.
    fn headers(&self, auth: &StoreAuth) -> Result<HeaderMap, PlatformError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = HeaderValue::from_str(&format!("bearer {}", auth.access_token))
            .map_err(|e| PlatformError::Transport(e.to_string()))?;
        headers.insert("Authentication", bearer);
        Ok(headers)
    }

    async fn expect_json<T: for<'de> Deserialize<'de>>(
        res: reqwest::Response,
        expected: StatusCode,
    ) -> Result<T, PlatformError> {
        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;
        if status != expected {
            return Err(PlatformError::Api {
                status: status.as_u16(),
                body,
            });
        }
        serde_json::from_str(&body).map_err(|_| PlatformError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

#[derive(Deserialize)]
struct AuthorizeResponse {
    access_token: String,
    user_id: serde_json::Value,
}

#[async_trait]
impl PlatformApi for PlatformClient {
    async fn authorize_with_code(&self, code: &str) -> Result<(String, String), PlatformError> {
        let payload = [
            ("client_id", self.app_id.as_str()),
            ("client_secret", self.app_secret.as_str()),
            ("grant_type", "authorization_code"),
            ("code", code),
        ];
        let res = self
            .client
            .post(self.authorization_url.clone())
            .form(&payload)
            .send()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;

        let parsed: AuthorizeResponse = Self::expect_json(res, StatusCode::OK).await?;
        // user_id arrives as a JSON number; keep it as a string internally.
        let store_id = match parsed.user_id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        Ok((parsed.access_token, store_id))
    }

    async fn get_store(&self, auth: &StoreAuth) -> Result<Store, PlatformError> {
        let res = self
            .client
            .get(self.url(auth, "store")?)
            .headers(self.headers(auth)?)
            .send()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;
        Self::expect_json(res, StatusCode::OK).await
    }

    async fn create_shipping_carrier(
        &self,
        auth: &StoreAuth,
        name: &str,
        callback_url: &str,
        supports: &[&str],
    ) -> Result<Carrier, PlatformError> {
        let payload = json!({
            "name": name,
            "callback_url": callback_url,
            "types": supports.join(","),
        });
        let res = self
            .client
            .post(self.url(auth, "shipping_carriers")?)
            .headers(self.headers(auth)?)
            .json(&payload)
            .send()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;

        let carrier: Carrier = Self::expect_json(res, StatusCode::CREATED).await?;
        tracing::info!(carrier_id = carrier.id, "shipping carrier created");
        Ok(carrier)
    }

    async fn create_carrier_option(
        &self,
        auth: &StoreAuth,
        carrier_id: i64,
        params: CarrierOptionParams,
    ) -> Result<CarrierOption, PlatformError> {
        let res = self
            .client
            .post(self.url(auth, &format!("shipping_carriers/{carrier_id}/options"))?)
            .headers(self.headers(auth)?)
            .json(&params)
            .send()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;

        let option: CarrierOption = Self::expect_json(res, StatusCode::CREATED).await?;
        tracing::info!(option_id = option.id, code = %option.code, "carrier option created");
        Ok(option)
    }

    async fn delete_shipping_carrier(
        &self,
        auth: &StoreAuth,
        carrier_id: i64,
    ) -> Result<(), PlatformError> {
        let res = self
            .client
            .delete(self.url(auth, &format!("shipping_carriers/{carrier_id}"))?)
            .headers(self.headers(auth)?)
            .send()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;
        let status = res.status();
        if status != StatusCode::OK {
            let body = res.text().await.unwrap_or_default();
            return Err(PlatformError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    async fn delete_carrier_option(
        &self,
        auth: &StoreAuth,
        carrier_id: i64,
        option_id: i64,
    ) -> Result<(), PlatformError> {
        let res = self
            .client
            .delete(self.url(
                auth,
                &format!("shipping_carriers/{carrier_id}/options/{option_id}"),
            )?)
            .headers(self.headers(auth)?)
            .send()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;
        let status = res.status();
        if status != StatusCode::OK {
            let body = res.text().await.unwrap_or_default();
            return Err(PlatformError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

impl PlatformClientBuilder {
    pub fn with_api_url(mut self, url: &str) -> anyhow::Result<Self> {
        // A trailing slash matters for Url::join.
        let normalized = if url.ends_with('/') {
            url.to_string()
        } else {
            format!("{url}/")
        };
        self.api_url = Url::parse(&normalized).context("invalid api url")?;
        Ok(self)
    }

    pub fn with_authorization_url(mut self, url: &str) -> anyhow::Result<Self> {
        self.authorization_url = Url::parse(url).context("invalid authorization url")?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> anyhow::Result<PlatformClient> {
        let client = match self.client {
            Some(client) => client,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(t) = self.timeout {
                    builder = builder.timeout(t);
                }
                builder.build()?
            }
        };
        Ok(PlatformClient {
            api_url: self.api_url,
            authorization_url: self.authorization_url,
            app_id: self.app_id,
            app_secret: self.app_secret,
            client,
        })
    }
}
