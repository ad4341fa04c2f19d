// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::chart_service::ChartService;
use crate::infrastructure::astroport_repository::AstroportRepository;
use crate::infrastructure::config::load_config;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{chart_data, chart_page, health_check};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(
        AstroportRepository::new(
            config.api.base_url.clone(),
            Duration::from_secs(config.api.timeout_secs),
        )
        .context("Failed to create pricing API client")?,
    );

    // Create services (application layer)
    let chart_service = ChartService::new(repository, config.market.clone());

    let state = Arc::new(AppState { chart_service });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/", get(chart_page))
        .route("/api/charts", get(chart_data))
        .route("/healthz", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!(
        "Serving {}/{} charts on {}",
        config.market.base.symbol,
        config.market.quote.symbol,
        addr
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
