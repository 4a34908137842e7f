//! shipping-client: outbound HTTP adapters for the Nuvemshop platform API
//! and the Correios rate-quote service.

pub mod correios;
pub mod platform;

pub use correios::CorreiosClient;
pub use platform::PlatformClient;
