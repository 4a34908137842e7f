pub mod platform;
pub mod rate_service;
pub mod token_repository;
