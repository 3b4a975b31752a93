//! Agricultural season and planting calendar models

use serde::{Deserialize, Serialize};

/// The two agricultural seasons of the region
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SeasonKind {
    Wet,
    Dry,
}

/// Descriptive information about an agricultural season
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonInfo {
    pub kind: SeasonKind,
    pub name: String,
    pub months: Vec<u32>,
    pub description: String,
    pub rainfall: String,
    pub temperature: String,
    pub humidity: String,
    pub farming_activities: String,
}

/// Whether a crop can be planted in a given month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlantingStatus {
    pub crop: String,
    pub month: u32,
    pub is_plantable: bool,
    pub is_optimal: bool,
    /// Next planting month when the crop is out of season
    pub next_window: Option<u32>,
    pub reason: String,
}

/// Planting, optimal and harvest months of one crop as month names
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlantingCalendar {
    pub crop: String,
    pub planting_months: Vec<String>,
    pub optimal_months: Vec<String>,
    pub harvest_months: Vec<String>,
}
