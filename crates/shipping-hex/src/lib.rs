//! shipping-hex: application core for the Nuvemshop/Correios shipping
//! integration (install + quote services, inbound HTTP adapter).

pub mod carrier;
pub mod config;
pub mod errors;
pub mod translate;

pub mod application;

pub use shipping_types::{domain, ports};

pub mod inbound; // HTTP adapter (server + handlers)
