use serde::{Deserialize, Serialize};

/// The carrier's answer for one requested service code. Either a usable
/// quote (price, days) or a per-service rejection (error fields set).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RateQuote {
    pub service: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub days: i64,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl RateQuote {
    pub fn quoted(service: impl Into<String>, price: f64, days: i64) -> Self {
        Self {
            service: service.into(),
            price,
            days,
            error_code: None,
            error_message: None,
        }
    }

    pub fn errored(
        service: impl Into<String>,
        error_code: impl Into<String>,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            price: 0.0,
            days: 0,
            error_code: Some(error_code.into()),
            error_message: Some(error_message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error_code.is_some() || self.error_message.is_some()
    }
}

/// All per-service answers for one rate request, in the order the services
/// were requested. Carrier rejections are data here, not errors.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RateSet {
    pub services: Vec<RateQuote>,
}

impl RateSet {
    pub fn new(services: Vec<RateQuote>) -> Self {
        Self { services }
    }

    pub fn has_errors(&self) -> bool {
        self.services.iter().any(RateQuote::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &RateQuote> {
        self.services.iter().filter(|s| s.is_error())
    }
}
