//! Route definitions for the Agricultural Advisory Server

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/zones", zone_routes())
        .nest("/crops", crop_routes())
        .route("/seasons/:month", get(handlers::get_season))
}

/// Zone analytics routes
fn zone_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_zones))
        .route("/:zone/daily", get(handlers::get_daily))
        .route("/:zone/gdd", get(handlers::get_gdd))
        .route("/:zone/risk", get(handlers::get_risk))
        .route("/:zone/risk/droughts", get(handlers::get_drought_frequency))
        .route("/:zone/annual", get(handlers::get_annual))
        .route("/:zone/onsets", get(handlers::get_onsets))
        .route("/:zone/seasonality", get(handlers::get_seasonality))
        .route("/:zone/baseline", get(handlers::get_baseline))
        .route("/:zone/statistics", get(handlers::get_statistics))
        .route("/:zone/recommendations", get(handlers::get_recommendations))
        .route("/:zone/harvest", get(handlers::get_harvest))
}

/// Crop catalog and planting calendar routes
fn crop_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_crops))
        .route("/calendar", get(handlers::list_calendars))
        .route("/:crop/calendar", get(handlers::get_crop_calendar))
}
