use serde::{Deserialize, Serialize};

/// Store metadata as returned by the platform; only the fields this service
/// reads are modeled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub id: i64,
    pub original_domain: String,
}

/// A shipping carrier resource created under a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Carrier {
    pub id: i64,
    pub name: String,
    pub callback_url: String,
}

/// One rate option registered under a carrier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarrierOption {
    pub id: i64,
    pub code: String,
    pub name: String,
}

/// Creation parameters for a carrier option. Defaults mirror the platform's:
/// no surcharge, no extra days, free shipping not allowed.
#[derive(Debug, Clone, Serialize)]
pub struct CarrierOptionParams {
    pub code: String,
    pub name: String,
    pub additional_days: i64,
    pub additional_cost: f64,
    pub allow_free_shipping: bool,
}

impl CarrierOptionParams {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            additional_days: 0,
            additional_cost: 0.0,
            allow_free_shipping: false,
        }
    }
}
