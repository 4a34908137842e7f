//! shipping-types: domain entities and ports for the Nuvemshop/Correios
//! shipping integration.

pub mod domain;
pub mod ports;
