//! Annual, seasonal and climatological summary models

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Minimum number of observed days for a year to count in annual rollups
pub const MIN_DAYS_PER_YEAR: usize = 180;

/// Rainfall and temperature rollup for one calendar year
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnnualMetric {
    pub year: i32,
    pub total_precipitation_mm: f64,
    pub mean_t_avg: f64,
    pub day_count: usize,
}

/// First date of a year on which the rains are considered established
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlantingOnset {
    pub year: i32,
    pub date: NaiveDate,
    pub day_of_year: u32,
    pub rain_3d_sum_mm: f64,
}

/// Smoothed historical averages for one day of the year
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonalityPoint {
    pub day_of_year: u32,
    pub t_max: f64,
    pub t_min: f64,
    pub t_avg: f64,
    pub precipitation_mm: f64,
}

/// Average daily temperature indexed by day of year (1-366)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Climatology {
    days: BTreeMap<u32, f64>,
}

impl Climatology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, day_of_year: u32, t_avg: f64) {
        self.days.insert(day_of_year, t_avg);
    }

    pub fn get(&self, day_of_year: u32) -> Option<f64> {
        self.days.get(&day_of_year).copied()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl FromIterator<(u32, f64)> for Climatology {
    fn from_iter<I: IntoIterator<Item = (u32, f64)>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}

/// Headline statistics for a zone's daily history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ZoneStatistics {
    pub avg_temp: f64,
    pub max_temp: f64,
    pub min_temp: f64,
    pub avg_humidity: Option<f64>,
    pub total_rain_30d: f64,
    pub total_rain_90d: f64,
    pub avg_daily_rain: f64,
    pub day_count: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
}

/// One current-year day compared with the historical baseline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BaselineComparison {
    pub date: NaiveDate,
    pub day_of_year: u32,
    pub t_avg: f64,
    pub baseline_t_avg: f64,
    pub t_avg_anomaly: f64,
    pub precipitation_mm: f64,
    pub baseline_precipitation_mm: f64,
    /// Percent deviation from baseline rainfall; zero when the baseline is zero
    pub precipitation_deviation_pct: f64,
}
