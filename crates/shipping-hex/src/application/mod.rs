pub mod install_service;
pub mod quote_service;
