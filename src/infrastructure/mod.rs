// Infrastructure layer - External dependencies and adapters
pub mod astroport_repository;
pub mod config;
pub mod http_response;
