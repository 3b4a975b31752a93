//! Crop profile and catalog models

use serde::{Deserialize, Serialize};

/// Water requirement tier of a crop
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WaterRequirement {
    #[serde(rename = "Low")]
    Low,
    #[serde(rename = "Low to Moderate")]
    LowToModerate,
    #[serde(rename = "Moderate")]
    Moderate,
    #[serde(rename = "High")]
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl WaterRequirement {
    /// Crops that still do well when seasonal rain falls short
    pub fn is_drought_tolerant(&self) -> bool {
        matches!(self, WaterRequirement::Low)
    }

    /// Crops that benefit from rainfall above the usual range
    pub fn is_water_loving(&self) -> bool {
        matches!(self, WaterRequirement::High | WaterRequirement::VeryHigh)
    }
}

impl std::fmt::Display for WaterRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WaterRequirement::Low => write!(f, "Low"),
            WaterRequirement::LowToModerate => write!(f, "Low to Moderate"),
            WaterRequirement::Moderate => write!(f, "Moderate"),
            WaterRequirement::High => write!(f, "High"),
            WaterRequirement::VeryHigh => write!(f, "Very High"),
        }
    }
}

/// Inclusive numeric range (min, max)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Widen both bounds by `margin`
    pub fn widened(&self, margin: f64) -> Self {
        Self {
            min: self.min - margin,
            max: self.max + margin,
        }
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            min: self.min * factor,
            max: self.max * factor,
        }
    }
}

/// Agronomic parameters of a crop.
///
/// Loaded once from static configuration and passed read-only into the
/// scorer. `optimal_planting` must be a subset of `planting_months`; see
/// [`crate::validation::validate_crop_profile`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropProfile {
    pub name: String,
    /// Base temperature below which no growth accrues (°C)
    pub t_base: f64,
    pub optimal_temp_range: Range,
    pub rainfall_annual_mm: Range,
    pub gdd_to_maturity: f64,
    pub planting_months: Vec<u32>,
    pub optimal_planting: Vec<u32>,
    pub harvest_months: Vec<u32>,
    pub growing_season_days: u32,
    pub water_requirement: WaterRequirement,
    pub soil_type: String,
    /// Season label, e.g. "Wet Season"
    pub season: String,
    #[serde(default)]
    pub can_plant_dry_season: bool,
    #[serde(default)]
    pub irrigation_needed_dry_season: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: String,
}

impl CropProfile {
    pub fn is_plantable_in(&self, month: u32) -> bool {
        self.planting_months.contains(&month)
    }

    pub fn is_optimal_in(&self, month: u32) -> bool {
        self.optimal_planting.contains(&month)
    }
}

/// Ordered collection of crop profiles.
///
/// Order is significant: ranking ties keep catalog order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct CropCatalog {
    crops: Vec<CropProfile>,
}

impl CropCatalog {
    pub fn new(crops: Vec<CropProfile>) -> Self {
        Self { crops }
    }

    pub fn get(&self, name: &str) -> Option<&CropProfile> {
        self.crops
            .iter()
            .find(|crop| crop.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CropProfile> {
        self.crops.iter()
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.crops.iter().map(|crop| crop.name.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a CropCatalog {
    type Item = &'a CropProfile;
    type IntoIter = std::slice::Iter<'a, CropProfile>;

    fn into_iter(self) -> Self::IntoIter {
        self.crops.iter()
    }
}
