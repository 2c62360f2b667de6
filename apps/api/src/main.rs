mod config;
mod db;
mod errors;
mod jobs;
mod models;
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
use crate::db::create_pool;
use crate::jobs::store::SqliteJobStore;
use crate::models::profile::load_profile;
use crate::routes::build_router;
use crate::scoring::fit_scoring::RuleBasedScorer;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Fit API v{}", env!("CARGO_PKG_VERSION"));

    // A missing or unreadable profile aborts startup.
    let profile = load_profile(&config.profile_path)?;

    let db = create_pool(&config.database_url).await?;

    let state = AppState {
        profile: Arc::new(profile),
        fit_scorer: Arc::new(RuleBasedScorer),
        store: Arc::new(SqliteJobStore::new(db)),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
