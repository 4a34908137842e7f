pub mod package;
pub mod platform;
pub mod rate;
pub mod shipping_option;
pub mod store_token;
