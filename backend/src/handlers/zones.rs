//! HTTP handlers for zone analytics endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;
use shared::{
    AnnualMetric, BaselineComparison, DailyAggregate, DroughtFrequency, PlantingOnset,
    Recommendation, RiskPoint, SeasonalityPoint, ZoneStatistics,
};

use crate::error::AppResult;
use crate::services::advisory::{
    date_range, AdvisoryService, GddReport, HarvestReport, ZoneSummary,
};
use crate::AppState;

/// Query parameters for date-windowed series
#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Query parameters for GDD accumulation
#[derive(Debug, Deserialize)]
pub struct GddQuery {
    pub crop: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// "annual" restarts the total on January 1st
    pub reset: Option<String>,
}

/// Query parameters for year-over-year comparisons
#[derive(Debug, Deserialize)]
pub struct YearQuery {
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub month: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct HarvestQuery {
    pub crop: String,
    pub start: Option<NaiveDate>,
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Year treated as "current" by comparisons: explicit, else the calendar year
fn comparison_year(year: Option<i32>) -> i32 {
    year.unwrap_or_else(|| today().year())
}

/// List configured zones with their archive coverage
pub async fn list_zones(State(state): State<AppState>) -> Json<Vec<ZoneSummary>> {
    Json(AdvisoryService::new(&state).zone_summaries())
}

/// Daily aggregates of a zone
pub async fn get_daily(
    State(state): State<AppState>,
    Path(zone): Path<String>,
    Query(query): Query<DateRangeQuery>,
) -> AppResult<Json<Vec<DailyAggregate>>> {
    let range = date_range(query.start, query.end)?;
    let daily = AdvisoryService::new(&state).daily(&zone, range)?;
    Ok(Json(daily))
}

/// Daily and cumulative GDD of a crop
pub async fn get_gdd(
    State(state): State<AppState>,
    Path(zone): Path<String>,
    Query(query): Query<GddQuery>,
) -> AppResult<Json<GddReport>> {
    let range = date_range(query.start, query.end)?;
    let annual_reset = query
        .reset
        .as_deref()
        .is_some_and(|r| r.eq_ignore_ascii_case("annual"));
    let report = AdvisoryService::new(&state).gdd(&zone, &query.crop, range, annual_reset)?;
    Ok(Json(report))
}

/// Rolling rainfall risk flags
pub async fn get_risk(
    State(state): State<AppState>,
    Path(zone): Path<String>,
    Query(query): Query<DateRangeQuery>,
) -> AppResult<Json<Vec<RiskPoint>>> {
    let range = date_range(query.start, query.end)?;
    let risk = AdvisoryService::new(&state).risk(&zone, range)?;
    Ok(Json(risk))
}

/// Drought days per year
pub async fn get_drought_frequency(
    State(state): State<AppState>,
    Path(zone): Path<String>,
) -> AppResult<Json<Vec<DroughtFrequency>>> {
    Ok(Json(AdvisoryService::new(&state).drought_frequency(&zone)?))
}

/// Annual rainfall and temperature
pub async fn get_annual(
    State(state): State<AppState>,
    Path(zone): Path<String>,
) -> AppResult<Json<Vec<AnnualMetric>>> {
    Ok(Json(AdvisoryService::new(&state).annual(&zone)?))
}

/// Rainy season onset per year
pub async fn get_onsets(
    State(state): State<AppState>,
    Path(zone): Path<String>,
) -> AppResult<Json<Vec<PlantingOnset>>> {
    Ok(Json(AdvisoryService::new(&state).onsets(&zone)?))
}

/// Smoothed historical day-of-year profile
pub async fn get_seasonality(
    State(state): State<AppState>,
    Path(zone): Path<String>,
    Query(query): Query<YearQuery>,
) -> AppResult<Json<Vec<SeasonalityPoint>>> {
    let year = comparison_year(query.year);
    Ok(Json(AdvisoryService::new(&state).seasonality(&zone, year)?))
}

/// Current year against the historical baseline
pub async fn get_baseline(
    State(state): State<AppState>,
    Path(zone): Path<String>,
    Query(query): Query<YearQuery>,
) -> AppResult<Json<Vec<BaselineComparison>>> {
    let year = comparison_year(query.year);
    Ok(Json(AdvisoryService::new(&state).baseline(&zone, year)?))
}

/// Summary statistics; null when the zone has no data
pub async fn get_statistics(
    State(state): State<AppState>,
    Path(zone): Path<String>,
) -> AppResult<Json<Option<ZoneStatistics>>> {
    Ok(Json(AdvisoryService::new(&state).statistics(&zone)?))
}

/// Ranked crop recommendations for a target month (default: this month)
pub async fn get_recommendations(
    State(state): State<AppState>,
    Path(zone): Path<String>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<Vec<Recommendation>>> {
    let as_of = today();
    let month = query.month.unwrap_or_else(|| as_of.month());
    let recommendations = AdvisoryService::new(&state).recommendations(&zone, month, as_of)?;
    Ok(Json(recommendations))
}

/// Expected harvest of a crop planted on `start` (default: today)
pub async fn get_harvest(
    State(state): State<AppState>,
    Path(zone): Path<String>,
    Query(query): Query<HarvestQuery>,
) -> AppResult<Json<HarvestReport>> {
    let planting_date = query.start.unwrap_or_else(today);
    let report = AdvisoryService::new(&state).harvest(&zone, &query.crop, planting_date)?;
    Ok(Json(report))
}
