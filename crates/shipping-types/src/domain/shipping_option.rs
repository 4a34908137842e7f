use serde::{Deserialize, Serialize};

/// A platform-facing rate entry, computed fresh per request and never
/// persisted. `price` is what the shopper sees, `price_merchant` what the
/// carrier quoted for the full cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingOption {
    pub name: String,
    pub code: String,
    pub price: f64,
    pub price_merchant: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub currency: String,
    pub min_delivery_date: String,
    pub max_delivery_date: String,
}
