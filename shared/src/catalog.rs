//! Built-in crop and zone catalog for Abia State, Nigeria
//!
//! Used when configuration does not supply its own catalog or zone map.
//! Planting windows follow the local calendar of the humid forest zone.

use crate::models::{CropCatalog, CropProfile, Range, WaterRequirement, Zone};

/// The default agricultural zones
pub fn default_zones() -> Vec<Zone> {
    vec![
        Zone::new("Aba", 5.1167, 7.3667).with_elevation(122.0),
        Zone::new("Umuahia", 5.5167, 7.4833).with_elevation(122.0),
        Zone::new("Bende", 5.6190, 7.6430).with_elevation(150.0),
    ]
}

/// The default seasonal crop catalog
pub fn default_catalog() -> CropCatalog {
    CropCatalog::new(vec![
        CropProfile {
            name: "Maize".to_string(),
            t_base: 10.0,
            optimal_temp_range: Range::new(20.0, 30.0),
            rainfall_annual_mm: Range::new(600.0, 1200.0),
            gdd_to_maturity: 2500.0,
            planting_months: vec![3, 4, 5, 6, 7],
            optimal_planting: vec![3, 4],
            harvest_months: vec![6, 7, 8, 9, 10, 11],
            growing_season_days: 90,
            water_requirement: WaterRequirement::Moderate,
            soil_type: "Well-drained loam".to_string(),
            season: "Wet Season".to_string(),
            can_plant_dry_season: true,
            irrigation_needed_dry_season: true,
            description: "Staple cereal crop, predominant in northern Abia districts".to_string(),
            notes: "Can be planted year-round with irrigation. Early planting (March-April) gives best yields.".to_string(),
        },
        CropProfile {
            name: "Rice".to_string(),
            t_base: 12.0,
            optimal_temp_range: Range::new(22.0, 32.0),
            rainfall_annual_mm: Range::new(1200.0, 2500.0),
            gdd_to_maturity: 3000.0,
            planting_months: vec![4, 5, 6, 7, 8],
            optimal_planting: vec![4, 5, 6],
            harvest_months: vec![8, 9, 10, 11],
            growing_season_days: 120,
            water_requirement: WaterRequirement::VeryHigh,
            soil_type: "Clay, waterlogged suitable".to_string(),
            season: "Wet Season".to_string(),
            can_plant_dry_season: false,
            irrigation_needed_dry_season: true,
            description: "Important cereal crop, government-supported wet season programs".to_string(),
            notes: "Lowland rice planted in April, harvested Aug-Sep. Requires consistent water supply.".to_string(),
        },
        CropProfile {
            name: "Cassava".to_string(),
            t_base: 15.0,
            optimal_temp_range: Range::new(25.0, 35.0),
            rainfall_annual_mm: Range::new(1000.0, 1500.0),
            gdd_to_maturity: 3500.0,
            planting_months: vec![3, 4, 5, 6, 7, 8],
            optimal_planting: vec![4, 5],
            harvest_months: vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12],
            growing_season_days: 365,
            water_requirement: WaterRequirement::LowToModerate,
            soil_type: "Well-drained, tolerates poor soils".to_string(),
            season: "Year-Round".to_string(),
            can_plant_dry_season: true,
            irrigation_needed_dry_season: false,
            description: "Most widely grown staple, occupies >60% of cultivated land in Abia".to_string(),
            notes: "Very drought-tolerant. Can be planted year-round in humid forest zone. Early rainy season planting ensures strong roots.".to_string(),
        },
        CropProfile {
            name: "Yam".to_string(),
            t_base: 18.0,
            optimal_temp_range: Range::new(25.0, 30.0),
            rainfall_annual_mm: Range::new(1000.0, 1500.0),
            gdd_to_maturity: 4000.0,
            planting_months: vec![12, 1, 2, 3, 4, 5, 6, 7],
            optimal_planting: vec![3, 4, 5],
            harvest_months: vec![10, 11, 12, 1],
            growing_season_days: 240,
            water_requirement: WaterRequirement::Moderate,
            soil_type: "Deep, well-drained loam".to_string(),
            season: "Wet Season".to_string(),
            can_plant_dry_season: true,
            irrigation_needed_dry_season: false,
            description: "Highest production value per area in Abia State".to_string(),
            notes: "Main planting March-May. Early dry season planting (Dec-Feb) possible with mulching. June-July good for rain-fed farmers.".to_string(),
        },
        CropProfile {
            name: "Cowpea".to_string(),
            t_base: 10.0,
            optimal_temp_range: Range::new(25.0, 35.0),
            rainfall_annual_mm: Range::new(400.0, 800.0),
            gdd_to_maturity: 900.0,
            planting_months: vec![11, 12, 1, 2, 3, 7, 8],
            optimal_planting: vec![12, 1, 2],
            harvest_months: vec![2, 3, 4, 10, 11],
            growing_season_days: 60,
            water_requirement: WaterRequirement::Low,
            soil_type: "Well-drained, sandy loam".to_string(),
            season: "Dry Season".to_string(),
            can_plant_dry_season: true,
            irrigation_needed_dry_season: false,
            description: "Quick-growing legume, excellent for dry season".to_string(),
            notes: "Drought-tolerant. Perfect for dry season planting. Fixes nitrogen in soil.".to_string(),
        },
        CropProfile {
            name: "Groundnut (Peanut)".to_string(),
            t_base: 12.0,
            optimal_temp_range: Range::new(25.0, 33.0),
            rainfall_annual_mm: Range::new(500.0, 1000.0),
            gdd_to_maturity: 1200.0,
            planting_months: vec![11, 12, 1, 2, 3, 4, 5],
            optimal_planting: vec![12, 1, 2, 3],
            harvest_months: vec![3, 4, 5, 6, 7, 8],
            growing_season_days: 90,
            water_requirement: WaterRequirement::LowToModerate,
            soil_type: "Sandy loam, well-drained".to_string(),
            season: "Dry Season to Early Wet".to_string(),
            can_plant_dry_season: true,
            irrigation_needed_dry_season: false,
            description: "Drought-tolerant legume, good cash crop".to_string(),
            notes: "Excellent for dry season. Tolerates low rainfall. Improves soil fertility.".to_string(),
        },
        CropProfile {
            name: "Cocoyam".to_string(),
            t_base: 15.0,
            optimal_temp_range: Range::new(20.0, 28.0),
            rainfall_annual_mm: Range::new(1500.0, 2500.0),
            gdd_to_maturity: 2800.0,
            planting_months: vec![3, 4, 5, 6],
            optimal_planting: vec![4, 5],
            harvest_months: vec![10, 11, 12, 1],
            growing_season_days: 210,
            water_requirement: WaterRequirement::High,
            soil_type: "Moist, well-drained".to_string(),
            season: "Wet Season".to_string(),
            can_plant_dry_season: false,
            irrigation_needed_dry_season: true,
            description: "Important root crop in Abia State".to_string(),
            notes: "Requires high moisture. Plant at start of rainy season.".to_string(),
        },
        CropProfile {
            name: "Sweet Potato".to_string(),
            t_base: 15.0,
            optimal_temp_range: Range::new(24.0, 30.0),
            rainfall_annual_mm: Range::new(750.0, 1500.0),
            gdd_to_maturity: 1800.0,
            planting_months: vec![3, 4, 5, 6, 7, 8],
            optimal_planting: vec![4, 5, 6],
            harvest_months: vec![7, 8, 9, 10, 11, 12],
            growing_season_days: 120,
            water_requirement: WaterRequirement::Moderate,
            soil_type: "Well-drained, sandy loam".to_string(),
            season: "Wet Season".to_string(),
            can_plant_dry_season: true,
            irrigation_needed_dry_season: true,
            description: "Versatile root crop".to_string(),
            notes: "Relatively drought-tolerant. Can be planted in dry season with irrigation.".to_string(),
        },
        CropProfile {
            name: "Melon (Egusi)".to_string(),
            t_base: 18.0,
            optimal_temp_range: Range::new(25.0, 35.0),
            rainfall_annual_mm: Range::new(600.0, 1200.0),
            gdd_to_maturity: 1000.0,
            planting_months: vec![3, 4, 5, 6, 7],
            optimal_planting: vec![4, 5],
            harvest_months: vec![7, 8, 9, 10],
            growing_season_days: 90,
            water_requirement: WaterRequirement::Moderate,
            soil_type: "Well-drained loam".to_string(),
            season: "Wet Season".to_string(),
            can_plant_dry_season: false,
            irrigation_needed_dry_season: true,
            description: "Important vegetable crop for seeds".to_string(),
            notes: "Often intercropped with yam or cassava.".to_string(),
        },
        CropProfile {
            name: "Okra".to_string(),
            t_base: 15.0,
            optimal_temp_range: Range::new(24.0, 35.0),
            rainfall_annual_mm: Range::new(600.0, 1000.0),
            gdd_to_maturity: 800.0,
            planting_months: vec![3, 4, 5, 6, 7, 8, 9],
            optimal_planting: vec![4, 5, 6],
            harvest_months: vec![6, 7, 8, 9, 10, 11],
            growing_season_days: 60,
            water_requirement: WaterRequirement::Moderate,
            soil_type: "Well-drained, fertile".to_string(),
            season: "Wet Season".to_string(),
            can_plant_dry_season: true,
            irrigation_needed_dry_season: true,
            description: "Popular vegetable crop".to_string(),
            notes: "Quick-growing. Can produce for several months.".to_string(),
        },
        CropProfile {
            name: "Tomato".to_string(),
            t_base: 10.0,
            optimal_temp_range: Range::new(20.0, 30.0),
            rainfall_annual_mm: Range::new(500.0, 1000.0),
            gdd_to_maturity: 1200.0,
            planting_months: vec![11, 12, 1, 2, 3, 8, 9],
            optimal_planting: vec![11, 12, 1],
            harvest_months: vec![2, 3, 4, 5, 11, 12],
            growing_season_days: 90,
            water_requirement: WaterRequirement::Moderate,
            soil_type: "Well-drained, fertile loam".to_string(),
            season: "Dry Season".to_string(),
            can_plant_dry_season: true,
            irrigation_needed_dry_season: true,
            description: "Significant production in northern Abia".to_string(),
            notes: "Prefers dry season to avoid fungal diseases. Requires irrigation.".to_string(),
        },
        CropProfile {
            name: "Pepper".to_string(),
            t_base: 15.0,
            optimal_temp_range: Range::new(20.0, 30.0),
            rainfall_annual_mm: Range::new(600.0, 1200.0),
            gdd_to_maturity: 1000.0,
            planting_months: vec![11, 12, 1, 2, 3, 4, 5],
            optimal_planting: vec![12, 1, 2],
            harvest_months: vec![3, 4, 5, 6, 7, 8],
            growing_season_days: 90,
            water_requirement: WaterRequirement::Moderate,
            soil_type: "Well-drained, fertile".to_string(),
            season: "Dry Season to Early Wet".to_string(),
            can_plant_dry_season: true,
            irrigation_needed_dry_season: true,
            description: "Important vegetable and spice crop".to_string(),
            notes: "Dry season planting reduces disease pressure.".to_string(),
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{validate_catalog, validate_coordinates};

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 12);
        assert!(validate_catalog(&catalog).is_ok());
    }

    #[test]
    fn test_default_zones_have_valid_coordinates() {
        for zone in default_zones() {
            assert!(validate_coordinates(zone.coordinates.latitude, zone.coordinates.longitude).is_ok());
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = default_catalog();
        assert!(catalog.get("cassava").is_some());
        assert!(catalog.get("Wheat").is_none());
    }

    #[test]
    fn test_catalog_json_keeps_order_and_tier_labels() {
        let json = serde_json::to_value(default_catalog()).unwrap();
        let crops = json.as_array().unwrap();
        assert_eq!(crops[0]["name"], "Maize");
        assert!(crops
            .iter()
            .any(|c| c["water_requirement"] == "Low to Moderate"));

        let parsed: CropCatalog = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, default_catalog());
    }
}
