use async_trait::async_trait;

use crate::domain::package::BoxPackage;
use crate::domain::rate::RateSet;

#[derive(thiserror::Error, Debug)]
pub enum RateError {
    #[error("rate service error: status {status}, body {body}")]
    Api { status: u16, body: String },
    #[error("rate service transport error: {0}")]
    Transport(String),
}

/// Outbound port for the postal carrier's rate-quote service. Per-service
/// rejections come back inside the `RateSet`; this error type covers
/// transport and protocol failures only.
#[async_trait]
pub trait RateService: Send + Sync + 'static {
    async fn shipping_rates(
        &self,
        origin: &str,
        destination: &str,
        package: &BoxPackage,
        services: &[&str],
    ) -> Result<RateSet, RateError>;
}
