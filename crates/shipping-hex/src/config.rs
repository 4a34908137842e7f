use anyhow::Context;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server_port: String,
    pub database_url: Option<String>,
    pub app_id: String,
    pub app_secret: String,
    /// Platform REST base; `None` uses the production URL.
    pub api_url: Option<String>,
    /// Platform token endpoint; `None` uses the production URL.
    pub authorization_url: Option<String>,
    /// Public base URL of this service, used for the carrier callback.
    pub service_url: String,
    /// Correios rate-quote endpoint.
    pub correios_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let server_port = env::var("SERVER_PORT").unwrap_or_else(|_| "3000".into());
        let database_url = env::var("DATABASE_URL").ok();
        let app_id = env::var("TIENDANUBE_APP_ID").context("TIENDANUBE_APP_ID not set")?;
        let app_secret =
            env::var("TIENDANUBE_APP_SECRET").context("TIENDANUBE_APP_SECRET not set")?;
        let api_url = env::var("TIENDANUBE_API_URL").ok();
        let authorization_url = env::var("TIENDANUBE_AUTHORIZATION_URL").ok();
        let service_url =
            env::var("SERVICE_URL").unwrap_or_else(|_| "http://localhost:3000".into());
        let correios_url = env::var("CORREIOS_URL").context("CORREIOS_URL not set")?;
        Ok(Self {
            server_port,
            database_url,
            app_id,
            app_secret,
            api_url,
            authorization_url,
            service_url,
            correios_url,
        })
    }

    pub fn carrier_callback_url(&self) -> String {
        format!(
            "{}/nuvemshop/options",
            self.service_url.trim_end_matches('/')
        )
    }
}
