//! Validation of static configuration: zones, crop profiles and risk thresholds
//!
//! These checks run once at startup. A failure is a configuration error and
//! should abort the process rather than degrade scoring.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::{CropCatalog, CropProfile, Range, RiskThresholds};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("Latitude {0} is outside -90..=90")]
    Latitude(f64),

    #[error("Longitude {0} is outside -180..=180")]
    Longitude(f64),

    #[error("Crop name must not be empty")]
    EmptyCropName,

    #[error("{crop}: month {month} in {field} is outside 1..=12")]
    InvalidMonth {
        crop: String,
        field: &'static str,
        month: u32,
    },

    #[error("{crop}: optimal planting month {month} is not a planting month")]
    OptimalOutsidePlanting { crop: String, month: u32 },

    #[error("{crop}: {field} minimum {min} exceeds maximum {max}")]
    InvertedRange {
        crop: String,
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{crop}: growing season must be at least one day")]
    EmptyGrowingSeason { crop: String },

    #[error("{crop}: GDD to maturity must be non-negative, got {value}")]
    NegativeGddTarget { crop: String, value: f64 },

    #[error("Duplicate crop name: {0}")]
    DuplicateCrop(String),

    #[error("Drought threshold {drought_mm}mm must be below waterlogging threshold {waterlogging_mm}mm")]
    OverlappingThresholds { drought_mm: f64, waterlogging_mm: f64 },

    #[error("Risk window must be at least one day")]
    EmptyRiskWindow,
}

pub type ValidationResult = Result<(), ValidationError>;

// ============================================================================
// Zone Validations
// ============================================================================

/// Validate decimal-degree coordinates
pub fn validate_coordinates(latitude: f64, longitude: f64) -> ValidationResult {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ValidationError::Latitude(latitude));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ValidationError::Longitude(longitude));
    }
    Ok(())
}

// ============================================================================
// Crop Validations
// ============================================================================

fn check_months(crop: &str, field: &'static str, months: &[u32]) -> ValidationResult {
    match months.iter().find(|m| !(1..=12).contains(*m)) {
        Some(&month) => Err(ValidationError::InvalidMonth {
            crop: crop.to_string(),
            field,
            month,
        }),
        None => Ok(()),
    }
}

fn check_range(crop: &str, field: &'static str, range: &Range) -> ValidationResult {
    // NaN bounds fail this comparison too
    if range.min <= range.max {
        Ok(())
    } else {
        Err(ValidationError::InvertedRange {
            crop: crop.to_string(),
            field,
            min: range.min,
            max: range.max,
        })
    }
}

/// Validate a single crop profile
pub fn validate_crop_profile(crop: &CropProfile) -> ValidationResult {
    let name = crop.name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyCropName);
    }

    check_months(name, "planting_months", &crop.planting_months)?;
    check_months(name, "optimal_planting", &crop.optimal_planting)?;
    check_months(name, "harvest_months", &crop.harvest_months)?;

    if let Some(&month) = crop
        .optimal_planting
        .iter()
        .find(|m| !crop.planting_months.contains(m))
    {
        return Err(ValidationError::OptimalOutsidePlanting {
            crop: name.to_string(),
            month,
        });
    }

    check_range(name, "optimal_temp_range", &crop.optimal_temp_range)?;
    check_range(name, "rainfall_annual_mm", &crop.rainfall_annual_mm)?;

    if crop.growing_season_days == 0 {
        return Err(ValidationError::EmptyGrowingSeason {
            crop: name.to_string(),
        });
    }
    if crop.gdd_to_maturity.is_nan() || crop.gdd_to_maturity < 0.0 {
        return Err(ValidationError::NegativeGddTarget {
            crop: name.to_string(),
            value: crop.gdd_to_maturity,
        });
    }
    Ok(())
}

/// Validate every profile and reject duplicate names (case-insensitive)
pub fn validate_catalog(catalog: &CropCatalog) -> ValidationResult {
    let mut seen = HashSet::new();
    for crop in catalog {
        validate_crop_profile(crop)?;
        if !seen.insert(crop.name.trim().to_lowercase()) {
            return Err(ValidationError::DuplicateCrop(crop.name.clone()));
        }
    }
    Ok(())
}

// ============================================================================
// Risk Validations
// ============================================================================

pub fn validate_thresholds(thresholds: &RiskThresholds) -> ValidationResult {
    if thresholds.window_days == 0 {
        return Err(ValidationError::EmptyRiskWindow);
    }
    if thresholds.drought_mm.partial_cmp(&thresholds.waterlogging_mm) != Some(std::cmp::Ordering::Less) {
        return Err(ValidationError::OverlappingThresholds {
            drought_mm: thresholds.drought_mm,
            waterlogging_mm: thresholds.waterlogging_mm,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WaterRequirement;

    fn profile() -> CropProfile {
        CropProfile {
            name: "Maize".to_string(),
            t_base: 10.0,
            optimal_temp_range: Range::new(20.0, 30.0),
            rainfall_annual_mm: Range::new(600.0, 1200.0),
            gdd_to_maturity: 2500.0,
            planting_months: vec![3, 4, 5, 6, 7],
            optimal_planting: vec![3, 4],
            harvest_months: vec![6, 7, 8],
            growing_season_days: 90,
            water_requirement: WaterRequirement::Moderate,
            soil_type: "Well-drained loam".to_string(),
            season: "Wet Season".to_string(),
            can_plant_dry_season: true,
            irrigation_needed_dry_season: true,
            description: String::new(),
            notes: String::new(),
        }
    }

    // ========================================================================
    // Zone Tests
    // ========================================================================

    #[test]
    fn test_validate_coordinates_valid() {
        assert!(validate_coordinates(5.1167, 7.3667).is_ok());
        assert!(validate_coordinates(-90.0, 180.0).is_ok());
    }

    #[test]
    fn test_validate_coordinates_invalid() {
        assert_eq!(validate_coordinates(91.0, 0.0), Err(ValidationError::Latitude(91.0)));
        assert_eq!(validate_coordinates(0.0, -180.5), Err(ValidationError::Longitude(-180.5)));
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
    }

    // ========================================================================
    // Crop Tests
    // ========================================================================

    #[test]
    fn test_validate_crop_profile_valid() {
        assert!(validate_crop_profile(&profile()).is_ok());
    }

    #[test]
    fn test_optimal_must_be_subset_of_planting() {
        let mut crop = profile();
        crop.optimal_planting = vec![4, 9];
        assert_eq!(
            validate_crop_profile(&crop),
            Err(ValidationError::OptimalOutsidePlanting {
                crop: "Maize".to_string(),
                month: 9
            })
        );
    }

    #[test]
    fn test_month_out_of_range() {
        let mut crop = profile();
        crop.harvest_months = vec![0];
        assert!(matches!(
            validate_crop_profile(&crop),
            Err(ValidationError::InvalidMonth { field: "harvest_months", month: 0, .. })
        ));
    }

    #[test]
    fn test_inverted_ranges_and_empty_fields() {
        let mut crop = profile();
        crop.optimal_temp_range = Range::new(30.0, 20.0);
        assert!(matches!(
            validate_crop_profile(&crop),
            Err(ValidationError::InvertedRange { field: "optimal_temp_range", .. })
        ));

        let mut crop = profile();
        crop.growing_season_days = 0;
        assert!(validate_crop_profile(&crop).is_err());

        let mut crop = profile();
        crop.gdd_to_maturity = -1.0;
        assert!(validate_crop_profile(&crop).is_err());

        let mut crop = profile();
        crop.name = "  ".to_string();
        assert_eq!(validate_crop_profile(&crop), Err(ValidationError::EmptyCropName));
    }

    #[test]
    fn test_catalog_rejects_duplicates() {
        let mut other = profile();
        other.name = "MAIZE".to_string();
        let catalog = CropCatalog::new(vec![profile(), other]);
        assert_eq!(
            validate_catalog(&catalog),
            Err(ValidationError::DuplicateCrop("MAIZE".to_string()))
        );
    }

    // ========================================================================
    // Risk Tests
    // ========================================================================

    #[test]
    fn test_validate_thresholds() {
        assert!(validate_thresholds(&RiskThresholds::default()).is_ok());
        let inverted = RiskThresholds {
            drought_mm: 150.0,
            waterlogging_mm: 5.0,
            window_days: 7,
        };
        assert!(validate_thresholds(&inverted).is_err());
        let no_window = RiskThresholds {
            window_days: 0,
            ..RiskThresholds::default()
        };
        assert_eq!(validate_thresholds(&no_window), Err(ValidationError::EmptyRiskWindow));
    }
}
