//! Agricultural Advisory Server
//!
//! Serves weather analytics and crop recommendations for the farming zones
//! of Abia State from an archive of hourly weather observations.

use axum::{routing::get, Router};
use shared::{CropCatalog, RiskThresholds, Zone};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod handlers;
mod routes;
mod services;

pub use config::Config;
use services::WeatherArchive;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub archive: Arc<WeatherArchive>,
    pub catalog: Arc<CropCatalog>,
    pub zones: Arc<Vec<Zone>>,
    pub thresholds: RiskThresholds,
}

impl AppState {
    pub fn new(config: Config, archive: WeatherArchive, catalog: CropCatalog) -> Self {
        let zones = config.zones();
        let thresholds = config.thresholds();
        Self {
            config: Arc::new(config),
            archive: Arc::new(archive),
            catalog: Arc::new(catalog),
            zones: Arc::new(zones),
            thresholds,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agro_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Agricultural Advisory Server");
    tracing::info!("Environment: {}", config.environment);

    // Invalid zones, thresholds or crop profiles abort startup
    let catalog = config.load_catalog()?;
    config.validate(&catalog)?;
    tracing::info!("Loaded {} crops and {} zones", catalog.len(), config.zones().len());

    tracing::info!("Loading weather archive from {}", config.archive.path);
    let archive = WeatherArchive::load(&config.archive.path)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);

    // Create application state
    let state = AppState::new(config, archive, catalog);

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Agricultural Decision Support API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
