//! HTTP handlers for the crop catalog and planting calendar

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use shared::{CropProfile, PlantingCalendar};

use crate::error::AppResult;
use crate::services::advisory::{AdvisoryService, CropCalendarReport, SeasonReport};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub month: Option<u32>,
}

/// List the crop catalog
pub async fn list_crops(State(state): State<AppState>) -> Json<Vec<CropProfile>> {
    Json(AdvisoryService::new(&state).crops())
}

/// Planting calendars of every crop
pub async fn list_calendars(State(state): State<AppState>) -> Json<Vec<PlantingCalendar>> {
    Json(AdvisoryService::new(&state).calendars())
}

/// Planting calendar of one crop with its status in `month` (default: this month)
pub async fn get_crop_calendar(
    State(state): State<AppState>,
    Path(crop): Path<String>,
    Query(query): Query<MonthQuery>,
) -> AppResult<Json<CropCalendarReport>> {
    let month = query.month.unwrap_or_else(|| Utc::now().month());
    Ok(Json(AdvisoryService::new(&state).crop_calendar(&crop, month)?))
}

/// Agricultural season of a month and the crops plantable in it
pub async fn get_season(
    State(state): State<AppState>,
    Path(month): Path<u32>,
) -> AppResult<Json<SeasonReport>> {
    Ok(Json(AdvisoryService::new(&state).season(month)?))
}
