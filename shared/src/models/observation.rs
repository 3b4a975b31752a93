//! Raw weather observation models

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single weather reading for one zone at one timestamp.
///
/// Timestamps are zone-local and already normalized by the loader; numeric
/// fields that were missing or malformed at the source are `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherObservation {
    pub timestamp: NaiveDateTime,
    pub zone: String,
    /// Current temperature (°C)
    pub temp_current: Option<f64>,
    /// Minimum temperature reported for the reading (°C)
    pub temp_min: Option<f64>,
    /// Maximum temperature reported for the reading (°C)
    pub temp_max: Option<f64>,
    pub feels_like: Option<f64>,
    /// Relative humidity (%)
    pub humidity: Option<f64>,
    /// Pressure (hPa)
    pub pressure: Option<f64>,
    /// Wind speed (m/s)
    pub wind_speed: Option<f64>,
    /// Wind direction (degrees)
    pub wind_direction: Option<f64>,
    /// Cloud cover (%)
    pub cloudiness: Option<f64>,
    /// Precipitation over the last hour (mm)
    pub precipitation_1h: Option<f64>,
    /// Precipitation over the last three hours (mm)
    pub precipitation_3h: Option<f64>,
    pub condition: Option<String>,
    pub description: Option<String>,
}

impl WeatherObservation {
    /// Create an observation with only a timestamp and zone set
    pub fn new(zone: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            zone: zone.into(),
            temp_current: None,
            temp_min: None,
            temp_max: None,
            feels_like: None,
            humidity: None,
            pressure: None,
            wind_speed: None,
            wind_direction: None,
            cloudiness: None,
            precipitation_1h: None,
            precipitation_3h: None,
            condition: None,
            description: None,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Lower temperature bound of the reading, falling back to the current temperature
    pub fn low_temperature(&self) -> Option<f64> {
        finite(self.temp_min).or_else(|| finite(self.temp_current))
    }

    /// Upper temperature bound of the reading, falling back to the current temperature
    pub fn high_temperature(&self) -> Option<f64> {
        finite(self.temp_max).or_else(|| finite(self.temp_current))
    }

    /// Rows without either a min or a max temperature cannot contribute to a daily range
    pub fn has_temperature_range(&self) -> bool {
        finite(self.temp_min).is_some() || finite(self.temp_max).is_some()
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
