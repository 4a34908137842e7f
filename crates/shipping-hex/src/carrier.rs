//! Carrier-facing constants: the fixed Correios service set this app
//! registers and quotes, and the display metadata for each service.

pub const CARRIER_NAME: &str = "Correios";
pub const CARRIER_SUPPORTS: [&str; 2] = ["ship", "pickup"];

pub const PAC_SERVICE: &str = "04510";
pub const PAC_CODE: &str = "pac";
pub const PAC_NAME: &str = "PAC";

pub const SEDEX_SERVICE: &str = "04014";
pub const SEDEX_CODE: &str = "sedex";
pub const SEDEX_NAME: &str = "Sedex";

/// Services requested on every quote, in response order.
pub const AVAILABLE_SERVICES: [&str; 2] = [PAC_SERVICE, SEDEX_SERVICE];

pub const OPTION_CURRENCY: &str = "BRL";
pub const OPTION_TYPE: &str = "ship";

/// Label for a carrier service code, if it is one we registered.
pub fn service_label(service: &str) -> Option<&'static str> {
    match service {
        PAC_SERVICE => Some(PAC_NAME),
        SEDEX_SERVICE => Some(SEDEX_NAME),
        _ => None,
    }
}

/// Platform option code for a carrier service code.
pub fn option_code(service: &str) -> Option<&'static str> {
    match service {
        PAC_SERVICE => Some(PAC_CODE),
        SEDEX_SERVICE => Some(SEDEX_CODE),
        _ => None,
    }
}
