//! Common types used across the platform

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// GPS coordinates in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsCoordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Inclusive date range for slicing a daily series
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Short English month names, index 0 is January
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Short name for a month number (1-12). Out-of-range input wraps into the calendar.
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(wrap_month(month as i64) - 1) as usize]
}

/// Normalize any month offset into 1..=12 (0 is December, 13 is January)
pub fn wrap_month(month: i64) -> u32 {
    ((month - 1).rem_euclid(12) + 1) as u32
}

/// Join month numbers as "Mar, Apr, May"
pub fn format_months(months: &[u32]) -> String {
    months
        .iter()
        .map(|m| month_name(*m))
        .collect::<Vec<_>>()
        .join(", ")
}
