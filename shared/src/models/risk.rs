//! Rainfall risk models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default trailing rainfall at or below which a day is flagged as drought (mm / 7 days)
pub const DEFAULT_DROUGHT_THRESHOLD_MM: f64 = 5.0;
/// Default trailing rainfall at or above which a day is flagged as waterlogging (mm / 7 days)
pub const DEFAULT_WET_THRESHOLD_MM: f64 = 150.0;
/// Default trailing window length in days
pub const DEFAULT_RISK_WINDOW_DAYS: u32 = 7;

/// Absolute rainfall thresholds, summed over the trailing window
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RiskThresholds {
    pub drought_mm: f64,
    pub waterlogging_mm: f64,
    pub window_days: u32,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            drought_mm: DEFAULT_DROUGHT_THRESHOLD_MM,
            waterlogging_mm: DEFAULT_WET_THRESHOLD_MM,
            window_days: DEFAULT_RISK_WINDOW_DAYS,
        }
    }
}

/// Rainfall risk classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RiskFlag {
    Drought,
    Waterlogging,
    Normal,
}

impl std::fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskFlag::Drought => write!(f, "Drought Risk"),
            RiskFlag::Waterlogging => write!(f, "Waterlogging Risk"),
            RiskFlag::Normal => write!(f, "Normal"),
        }
    }
}

/// One day of the risk series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskPoint {
    pub date: NaiveDate,
    pub daily_rain_mm: f64,
    pub rain_window_sum_mm: f64,
    pub flag: RiskFlag,
}

/// Number of drought-flagged days in a calendar year
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DroughtFrequency {
    pub year: i32,
    pub drought_days: u32,
}
