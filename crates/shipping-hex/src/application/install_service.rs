use crate::carrier;
use crate::errors::InstallError;
use shipping_types::domain::platform::CarrierOptionParams;
use shipping_types::domain::store_token::{StoreAuth, StoreToken};
use shipping_types::ports::platform::PlatformApi;
use shipping_types::ports::token_repository::StoreTokenRepository;

/// Store installation: exchange the authorization code, persist the token,
/// register the carrier and its rate options, and resolve the post-install
/// redirect.
pub struct InstallService<R: StoreTokenRepository, P: PlatformApi> {
    repo: R,
    platform: P,
    carrier_callback_url: String,
}

impl<R: StoreTokenRepository, P: PlatformApi> InstallService<R, P> {
    pub fn new(repo: R, platform: P, carrier_callback_url: String) -> Self {
        Self {
            repo,
            platform,
            carrier_callback_url,
        }
    }

    /// Run the full install flow for one authorization code. Returns the
    /// store admin shipping-settings URL to redirect to.
    ///
    /// Registration failures after the token is persisted are not rolled
    /// back: a store can end up with a carrier but missing options.
    pub async fn install(&self, code: &str) -> Result<String, InstallError> {
        let (access_token, store_id) = self
            .platform
            .authorize_with_code(code)
            .await
            .map_err(|e| InstallError::Auth(e.to_string()))?;
        tracing::info!(%store_id, "authenticated against platform api");

        let token = StoreToken::new(store_id, access_token)
            .map_err(|e| InstallError::Auth(e.to_string()))?;
        self.repo
            .save(token.clone())
            .await
            .map_err(|e| InstallError::Auth(e.to_string()))?;
        tracing::info!(store_id = %token.store_id, "store token persisted");

        let auth = StoreAuth::from(token);
        let carrier = self
            .platform
            .create_shipping_carrier(
                &auth,
                carrier::CARRIER_NAME,
                &self.carrier_callback_url,
                &carrier::CARRIER_SUPPORTS,
            )
            .await
            .map_err(|e| InstallError::Setup(e.to_string()))?;

        for (code, name) in [
            (carrier::PAC_CODE, carrier::PAC_NAME),
            (carrier::SEDEX_CODE, carrier::SEDEX_NAME),
        ] {
            self.platform
                .create_carrier_option(&auth, carrier.id, CarrierOptionParams::new(code, name))
                .await
                .map_err(|e| InstallError::Setup(e.to_string()))?;
        }

        let store = self
            .platform
            .get_store(&auth)
            .await
            .map_err(|e| InstallError::Setup(e.to_string()))?;
        Ok(format!("https://{}/admin/shipping", store.original_domain))
    }
}
