mod config;
mod digest;
mod errors;
mod preferences;
mod routes;
mod scoring;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::preferences::{load_profile, PreferenceProfile, PreferenceStore};
use crate::routes::build_router;
use crate::scoring::WeightedTermScorer;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Jobscout API v{}", env!("CARGO_PKG_VERSION"));

    // Seed the in-memory preference profile
    let profile = match &config.preferences_path {
        Some(path) => load_profile(path)?,
        None => {
            info!("No PREFERENCES_PATH set; starting with an empty preference profile");
            PreferenceProfile::default()
        }
    };

    let scorer = Arc::new(WeightedTermScorer::new(config.score_threshold));
    info!("Default score threshold: {}", config.score_threshold);

    // Build app state
    let state = AppState {
        config: config.clone(),
        scorer,
        preferences: PreferenceStore::new(profile),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
