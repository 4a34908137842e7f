use async_trait::async_trait;

use crate::domain::platform::{Carrier, CarrierOption, CarrierOptionParams, Store};
use crate::domain::store_token::StoreAuth;

#[derive(thiserror::Error, Debug)]
pub enum PlatformError {
    #[error("platform api error: status {status}, body {body}")]
    Api { status: u16, body: String },
    #[error("platform transport error: {0}")]
    Transport(String),
}

/// Outbound port for the e-commerce platform's REST API. Authenticated calls
/// take credentials per call; there is no mutable client-level auth state.
#[async_trait]
pub trait PlatformApi: Send + Sync + 'static {
    /// Exchange an authorization code for (access token, store id) via the
    /// authorization-code grant.
    async fn authorize_with_code(&self, code: &str) -> Result<(String, String), PlatformError>;

    async fn get_store(&self, auth: &StoreAuth) -> Result<Store, PlatformError>;

    async fn create_shipping_carrier(
        &self,
        auth: &StoreAuth,
        name: &str,
        callback_url: &str,
        supports: &[&str],
    ) -> Result<Carrier, PlatformError>;

    async fn create_carrier_option(
        &self,
        auth: &StoreAuth,
        carrier_id: i64,
        params: CarrierOptionParams,
    ) -> Result<CarrierOption, PlatformError>;

    async fn delete_shipping_carrier(
        &self,
        auth: &StoreAuth,
        carrier_id: i64,
    ) -> Result<(), PlatformError>;

    async fn delete_carrier_option(
        &self,
        auth: &StoreAuth,
        carrier_id: i64,
        option_id: i64,
    ) -> Result<(), PlatformError>;
}
