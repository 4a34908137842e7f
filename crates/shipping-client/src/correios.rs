use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Serialize;

use shipping_types::domain::package::BoxPackage;
use shipping_types::domain::rate::RateSet;
use shipping_types::ports::rate_service::{RateError, RateService};

/// Correios rate-quote client. Posts one package description and the
/// requested service codes to the configured quote endpoint; the response
/// carries one entry per service, errored entries included.
#[derive(Clone)]
pub struct CorreiosClient {
    endpoint: Url,
    client: reqwest::Client,
}

#[derive(Clone)]
pub struct CorreiosClientBuilder {
    endpoint: Url,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

#[derive(Serialize)]
struct RateRequest<'a> {
    origin: &'a str,
    destination: &'a str,
    services: &'a [&'a str],
    package: PackageBody,
}

/// The carrier quotes against one box: stacked height, widest footprint,
/// total weight.
#[derive(Serialize)]
struct PackageBody {
    weight_kg: f64,
    height: f64,
    width: f64,
    depth: f64,
}

impl From<&BoxPackage> for PackageBody {
    fn from(package: &BoxPackage) -> Self {
        Self {
            weight_kg: package.total_weight_kg(),
            height: package.height(),
            width: package.width(),
            depth: package.depth(),
        }
    }
}

impl CorreiosClient {
    pub fn new(endpoint: &str) -> anyhow::Result<Self> {
        Self::builder(endpoint)?.build()
    }

    pub fn builder(endpoint: &str) -> anyhow::Result<CorreiosClientBuilder> {
        let endpoint = Url::parse(endpoint).context("invalid correios endpoint url")?;
        Ok(CorreiosClientBuilder {
            endpoint,
            timeout: None,
            client: None,
        })
    }
}

#[async_trait]
impl RateService for CorreiosClient {
    async fn shipping_rates(
        &self,
        origin: &str,
        destination: &str,
        package: &BoxPackage,
        services: &[&str],
    ) -> Result<RateSet, RateError> {
        let body = RateRequest {
            origin,
            destination,
            services,
            package: PackageBody::from(package),
        };
        let res = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| RateError::Transport(e.to_string()))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| RateError::Transport(e.to_string()))?;
        if status != StatusCode::OK {
            return Err(RateError::Api {
                status: status.as_u16(),
                body: text,
            });
        }
        serde_json::from_str(&text).map_err(|_| RateError::Api {
            status: status.as_u16(),
            body: text,
        })
    }
}

impl CorreiosClientBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> anyhow::Result<CorreiosClient> {
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
        Ok(CorreiosClient {
            endpoint: self.endpoint,
            client,
        })
    }
}
