//! Advisory service: runs the analytics engine over a zone's archived series

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use shared::analytics::{self, calendar, climate, ranking::expected_harvest, slice_range};
use shared::{
    AnnualMetric, BaselineComparison, CropCatalog, CropProfile, DailyAggregate, DateRange,
    DroughtFrequency, GddPoint, HarvestEstimate, PlantingCalendar, PlantingOnset, PlantingStatus,
    Recommendation, RiskPoint, RiskThresholds, SeasonInfo, SeasonalityPoint, Zone,
    ZoneStatistics,
};

use crate::error::{AppError, AppResult};
use crate::services::archive::WeatherArchive;
use crate::AppState;

/// Zone with the extent of its archived data
#[derive(Debug, Serialize)]
pub struct ZoneSummary {
    #[serde(flatten)]
    pub zone: Zone,
    pub observation_count: usize,
    pub day_count: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

/// GDD accumulation of one crop over a window
#[derive(Debug, Serialize)]
pub struct GddReport {
    pub zone: String,
    pub crop: String,
    pub t_base: f64,
    pub gdd_to_maturity: f64,
    pub annual_reset: bool,
    pub total_gdd: f64,
    pub maturity_progress_pct: f64,
    pub points: Vec<GddPoint>,
}

/// Expected harvest of one crop planted on a given day
#[derive(Debug, Serialize)]
pub struct HarvestReport {
    pub zone: String,
    pub crop: String,
    pub planting_date: NaiveDate,
    #[serde(flatten)]
    pub estimate: HarvestEstimate,
}

/// Season of a month with the crops plantable in it
#[derive(Debug, Serialize)]
pub struct SeasonReport {
    pub month: u32,
    pub month_name: String,
    pub season: SeasonInfo,
    pub plantable_crops: Vec<String>,
    pub optimal_crops: Vec<String>,
}

/// Planting calendar of a crop and its status in one month
#[derive(Debug, Serialize)]
pub struct CropCalendarReport {
    pub calendar: PlantingCalendar,
    pub status: PlantingStatus,
}

/// Advisory service over the loaded archive and catalog
#[derive(Clone)]
pub struct AdvisoryService {
    archive: Arc<WeatherArchive>,
    catalog: Arc<CropCatalog>,
    zones: Arc<Vec<Zone>>,
    thresholds: RiskThresholds,
}

/// Reject months outside 1..=12
pub fn validate_month(month: u32) -> AppResult<u32> {
    if (1..=12).contains(&month) {
        Ok(month)
    } else {
        Err(AppError::validation(
            "month",
            format!("Month must be between 1 and 12, got {}", month),
        ))
    }
}

/// Build an inclusive range from optional bounds; `None` when both are open
pub fn date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> AppResult<Option<DateRange>> {
    match (start, end) {
        (None, None) => Ok(None),
        (Some(s), Some(e)) if s > e => Err(AppError::validation(
            "start",
            format!("Start date {} is after end date {}", s, e),
        )),
        (s, e) => Ok(Some(DateRange::new(
            s.unwrap_or(NaiveDate::MIN),
            e.unwrap_or(NaiveDate::MAX),
        ))),
    }
}

impl AdvisoryService {
    pub fn new(state: &AppState) -> Self {
        Self {
            archive: state.archive.clone(),
            catalog: state.catalog.clone(),
            zones: state.zones.clone(),
            thresholds: state.thresholds,
        }
    }

    /// Look up a configured zone by name, case-insensitively
    pub fn zone(&self, name: &str) -> AppResult<&Zone> {
        self.zones
            .iter()
            .find(|z| z.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| AppError::NotFound(format!("Zone {}", name)))
    }

    pub fn crop(&self, name: &str) -> AppResult<&CropProfile> {
        self.catalog
            .get(name)
            .ok_or_else(|| AppError::NotFound(format!("Crop {}", name)))
    }

    fn history(&self, zone: &str) -> AppResult<&[DailyAggregate]> {
        let zone = self.zone(zone)?;
        Ok(self.archive.daily(&zone.name))
    }

    pub fn zone_summaries(&self) -> Vec<ZoneSummary> {
        self.zones
            .iter()
            .map(|zone| {
                let daily = self.archive.daily(&zone.name);
                ZoneSummary {
                    zone: zone.clone(),
                    observation_count: self.archive.observation_count(&zone.name),
                    day_count: daily.len(),
                    first_date: daily.first().map(|d| d.date),
                    last_date: daily.last().map(|d| d.date),
                }
            })
            .collect()
    }

    pub fn daily(&self, zone: &str, range: Option<DateRange>) -> AppResult<Vec<DailyAggregate>> {
        let history = self.history(zone)?;
        Ok(match range {
            Some(range) => slice_range(history, range),
            None => history.to_vec(),
        })
    }

    pub fn gdd(
        &self,
        zone: &str,
        crop: &str,
        range: Option<DateRange>,
        annual_reset: bool,
    ) -> AppResult<GddReport> {
        let crop = self.crop(crop)?;
        let window = self.daily(zone, range)?;
        let points = if annual_reset {
            analytics::annual_gdd_series(&window, crop.t_base)
        } else {
            analytics::gdd_series(&window, crop.t_base)
        };
        let total_gdd = points.last().map_or(0.0, |p| p.cumulative_gdd);

        Ok(GddReport {
            zone: self.zone(zone)?.name.clone(),
            crop: crop.name.clone(),
            t_base: crop.t_base,
            gdd_to_maturity: crop.gdd_to_maturity,
            annual_reset,
            total_gdd,
            maturity_progress_pct: analytics::maturity_progress(total_gdd, crop.gdd_to_maturity),
            points,
        })
    }

    /// Risk flags over the whole series, then restricted to the range, so the
    /// first days of a range still see the rain that preceded it
    pub fn risk(&self, zone: &str, range: Option<DateRange>) -> AppResult<Vec<RiskPoint>> {
        let series = analytics::risk_series(self.history(zone)?, &self.thresholds);
        Ok(match range {
            Some(range) => series.into_iter().filter(|p| range.contains(p.date)).collect(),
            None => series,
        })
    }

    pub fn drought_frequency(&self, zone: &str) -> AppResult<Vec<DroughtFrequency>> {
        let series = analytics::risk_series(self.history(zone)?, &self.thresholds);
        Ok(analytics::drought_days_per_year(&series))
    }

    pub fn annual(&self, zone: &str) -> AppResult<Vec<AnnualMetric>> {
        Ok(analytics::annual_metrics(self.history(zone)?))
    }

    pub fn onsets(&self, zone: &str) -> AppResult<Vec<PlantingOnset>> {
        Ok(analytics::planting_onsets(self.history(zone)?))
    }

    pub fn seasonality(&self, zone: &str, current_year: i32) -> AppResult<Vec<SeasonalityPoint>> {
        Ok(analytics::historical_seasonality(self.history(zone)?, current_year))
    }

    pub fn baseline(&self, zone: &str, current_year: i32) -> AppResult<Vec<BaselineComparison>> {
        Ok(analytics::baseline_comparison(self.history(zone)?, current_year))
    }

    pub fn statistics(&self, zone: &str) -> AppResult<Option<ZoneStatistics>> {
        Ok(analytics::zone_statistics(self.history(zone)?))
    }

    pub fn recommendations(
        &self,
        zone: &str,
        month: u32,
        as_of: NaiveDate,
    ) -> AppResult<Vec<Recommendation>> {
        let month = validate_month(month)?;
        let history = self.history(zone)?;
        tracing::debug!(zone, month, days = history.len(), "Ranking crops");
        Ok(analytics::rank_crops(&self.catalog, month, history, as_of))
    }

    pub fn harvest(&self, zone: &str, crop: &str, planting_date: NaiveDate) -> AppResult<HarvestReport> {
        let crop = self.crop(crop)?;
        let history = self.history(zone)?;
        let climatology = if history.is_empty() {
            None
        } else {
            Some(climate::day_of_year_climatology(history))
        };
        Ok(HarvestReport {
            zone: self.zone(zone)?.name.clone(),
            crop: crop.name.clone(),
            planting_date,
            estimate: expected_harvest(crop, planting_date.month(), climatology.as_ref(), planting_date),
        })
    }

    pub fn crops(&self) -> Vec<CropProfile> {
        self.catalog.iter().cloned().collect()
    }

    pub fn calendars(&self) -> Vec<PlantingCalendar> {
        self.catalog.iter().map(calendar::planting_calendar).collect()
    }

    pub fn crop_calendar(&self, crop: &str, month: u32) -> AppResult<CropCalendarReport> {
        let month = validate_month(month)?;
        let crop = self.crop(crop)?;
        Ok(CropCalendarReport {
            calendar: calendar::planting_calendar(crop),
            status: calendar::planting_status(crop, month),
        })
    }

    pub fn season(&self, month: u32) -> AppResult<SeasonReport> {
        let month = validate_month(month)?;
        let names = |crops: Vec<&CropProfile>| -> Vec<String> {
            crops.iter().map(|c| c.name.clone()).collect()
        };
        Ok(SeasonReport {
            month,
            month_name: shared::month_name(month).to_string(),
            season: calendar::season_for_month(month),
            plantable_crops: names(calendar::crops_for_month(&self.catalog, month)),
            optimal_crops: names(calendar::optimal_crops_for_month(&self.catalog, month)),
        })
    }
}
