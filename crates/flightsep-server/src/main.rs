//! flightsep server - HTTP front end for separation analysis

use anyhow::{Context, Result};
use flightsep_core::AnalysisEngine;
use flightsep_server::{api, config::Config, state::AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("flightsep_server=debug".parse()?)
            .add_directive("flightsep_core=info".parse()?))
        .init();

    tracing::info!("Starting flightsep server...");

    let config = Config::from_env();
    let port = config.server_port;
    let engine = AnalysisEngine::new(config.analysis.clone())
        .context("invalid analysis settings in environment")?;
    tracing::info!(execution = ?engine.config().execution, "analysis engine ready");
    let state = Arc::new(AppState::new(engine));

    let app = api::routes().with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
