// Application layer - Use cases and repository contracts
pub mod chart_service;
pub mod price_repository;
