//! Agricultural seasons and planting calendar lookups

use crate::models::{CropCatalog, CropProfile, PlantingCalendar, PlantingStatus, SeasonInfo, SeasonKind};
use crate::types::month_name;

/// Months of the main rainy season (April - October)
pub const WET_SEASON_MONTHS: [u32; 7] = [4, 5, 6, 7, 8, 9, 10];
/// Months of the dry season (November - March)
pub const DRY_SEASON_MONTHS: [u32; 5] = [11, 12, 1, 2, 3];

/// Agricultural season a month belongs to
pub fn season_for_month(month: u32) -> SeasonInfo {
    if WET_SEASON_MONTHS.contains(&month) {
        SeasonInfo {
            kind: SeasonKind::Wet,
            name: "Wet Season (Main Growing Season)".to_string(),
            months: WET_SEASON_MONTHS.to_vec(),
            description: "Primary growing season with abundant rainfall (>2000mm annually)".to_string(),
            rainfall: "High (200-400mm/month)".to_string(),
            temperature: "Warm (24-30°C)".to_string(),
            humidity: "High (70-90%)".to_string(),
            farming_activities: "Main planting season for most crops".to_string(),
        }
    } else {
        SeasonInfo {
            kind: SeasonKind::Dry,
            name: "Dry Season".to_string(),
            months: DRY_SEASON_MONTHS.to_vec(),
            description: "Dry season with Harmattan winds (Dec-Feb)".to_string(),
            rainfall: "Low (<100mm/month)".to_string(),
            temperature: "Warm to hot (25-35°C)".to_string(),
            humidity: "Low to moderate (40-70%)".to_string(),
            farming_activities: "Dry season crops, irrigation required".to_string(),
        }
    }
}

/// Next month after `month` in which the crop can be planted, wrapping into next year
pub fn next_planting_month(crop: &CropProfile, month: u32) -> Option<u32> {
    crop.planting_months
        .iter()
        .copied()
        .filter(|&m| m > month)
        .min()
        .or_else(|| crop.planting_months.iter().copied().min())
}

/// Whether `month` falls in the crop's planting or optimal window
pub fn planting_status(crop: &CropProfile, month: u32) -> PlantingStatus {
    let is_plantable = crop.is_plantable_in(month);
    let is_optimal = crop.is_optimal_in(month);

    let (next_window, reason) = if is_optimal {
        (None, format!("Optimal planting window for {}", crop.name))
    } else if is_plantable {
        (None, format!("Acceptable planting period for {}", crop.name))
    } else {
        match next_planting_month(crop, month) {
            Some(next) => (
                Some(next),
                format!("Not planting season. Next window: {}", month_name(next)),
            ),
            None => (None, "Not planting season. No planting months configured".to_string()),
        }
    };

    PlantingStatus {
        crop: crop.name.clone(),
        month,
        is_plantable,
        is_optimal,
        next_window,
        reason,
    }
}

/// Crops that can be planted in `month`, in catalog order
pub fn crops_for_month(catalog: &CropCatalog, month: u32) -> Vec<&CropProfile> {
    catalog.iter().filter(|c| c.is_plantable_in(month)).collect()
}

/// Crops in their optimal planting window in `month`, in catalog order
pub fn optimal_crops_for_month(catalog: &CropCatalog, month: u32) -> Vec<&CropProfile> {
    catalog.iter().filter(|c| c.is_optimal_in(month)).collect()
}

fn names(months: &[u32]) -> Vec<String> {
    months.iter().map(|m| month_name(*m).to_string()).collect()
}

/// Planting calendar of one crop
pub fn planting_calendar(crop: &CropProfile) -> PlantingCalendar {
    PlantingCalendar {
        crop: crop.name.clone(),
        planting_months: names(&crop.planting_months),
        optimal_months: names(&crop.optimal_planting),
        harvest_months: names(&crop.harvest_months),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;

    #[test]
    fn test_season_boundaries() {
        assert_eq!(season_for_month(3).kind, SeasonKind::Dry);
        assert_eq!(season_for_month(4).kind, SeasonKind::Wet);
        assert_eq!(season_for_month(10).kind, SeasonKind::Wet);
        assert_eq!(season_for_month(11).kind, SeasonKind::Dry);
    }

    #[test]
    fn test_next_window_wraps_to_next_year() {
        let catalog = default_catalog();
        let maize = catalog.get("Maize").unwrap();
        let status = planting_status(maize, 9);
        assert!(!status.is_plantable);
        assert_eq!(status.next_window, Some(3));
        assert_eq!(status.reason, "Not planting season. Next window: Mar");
    }

    #[test]
    fn test_optimal_and_acceptable_status() {
        let catalog = default_catalog();
        let maize = catalog.get("Maize").unwrap();
        assert!(planting_status(maize, 4).is_optimal);
        let june = planting_status(maize, 6);
        assert!(june.is_plantable && !june.is_optimal);
        assert_eq!(june.reason, "Acceptable planting period for Maize");
    }

    #[test]
    fn test_month_filters_keep_catalog_order() {
        let catalog = default_catalog();
        let optimal: Vec<&str> = optimal_crops_for_month(&catalog, 4)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(optimal.first(), Some(&"Maize"));
        assert!(optimal.contains(&"Rice"));
        assert!(!optimal.contains(&"Tomato"));
        assert!(crops_for_month(&catalog, 4).len() >= optimal.len());
    }

    #[test]
    fn test_planting_calendar_names() {
        let catalog = default_catalog();
        let cowpea = planting_calendar(catalog.get("Cowpea").unwrap());
        assert_eq!(cowpea.optimal_months, vec!["Dec", "Jan", "Feb"]);
    }
}
