//! Daily aggregate and growing-degree-day models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar day of aggregated weather for a zone.
///
/// This is a view recomputed from the observation series; `t_avg` is the
/// midpoint of the daily range, not the mean of all readings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub t_min: f64,
    pub t_max: f64,
    pub t_avg: f64,
    /// Mean of the current-temperature readings of the day
    pub t_current_mean: Option<f64>,
    pub humidity_mean: Option<f64>,
    /// Summed precipitation for the day (mm)
    pub precipitation_mm: f64,
}

impl DailyAggregate {
    /// Build a day from its range; `t_avg` is derived
    pub fn new(date: NaiveDate, t_min: f64, t_max: f64, precipitation_mm: f64) -> Self {
        Self {
            date,
            t_min,
            t_max,
            t_avg: (t_max + t_min) / 2.0,
            t_current_mean: None,
            humidity_mean: None,
            precipitation_mm,
        }
    }
}

/// Daily and cumulative growing degree days
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GddPoint {
    pub date: NaiveDate,
    pub t_avg: f64,
    pub daily_gdd: f64,
    pub cumulative_gdd: f64,
}

/// Result of simulating heat accumulation forward from a start date
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HarvestProjection {
    pub start_date: NaiveDate,
    pub harvest_date: NaiveDate,
    pub days_elapsed: u32,
}
