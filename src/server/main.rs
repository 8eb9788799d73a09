//! Geofencing HTTP server.
//!
//! Accepts a list of identified points plus a radius or polygon geofence and
//! reports which points fall inside.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use geofence::config::Config;
use geofence::AreaBuilder;

mod handlers;
use handlers::{geofencing_handler, health_handler, AppState};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Geofencing check server")]
struct Args {
    /// Listen address (overrides the config file)
    #[arg(short, long)]
    listen: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "info" or "geofence=debug" (RUST_LOG takes precedence)
    #[arg(long)]
    log_level: Option<String>,

    /// Vertices used to approximate radius geofences
    #[arg(long)]
    segments: Option<usize>,
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/geofencing", post(geofencing_handler))
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Loading {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(listen) = args.listen {
        config.server.listen = listen;
    }
    if let Some(level) = args.log_level {
        config.server.log_level = Some(level);
    }
    if let Some(segments) = args.segments {
        config.geofence.buffer_segments = segments;
    }

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.effective_log_level()));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Geofence Server ({})", config.server.app_env);

    let builder = AreaBuilder::new(config.geofence.buffer_segments);
    info!("Radius geofences use {} segments", builder.segments());

    let state = Arc::new(AppState { builder });
    let app = build_router(state);

    info!("Starting server on {}", config.server.listen);

    let listener = tokio::net::TcpListener::bind(&config.server.listen)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.listen))?;
    axum::serve(listener, app).await?;

    Ok(())
}
