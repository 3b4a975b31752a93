//! Ranked crop recommendations for a zone and target month

use chrono::{Datelike, NaiveDate};

use crate::models::{
    Climatology, CropCatalog, CropProfile, DailyAggregate, HarvestEstimate, HarvestMethod,
    Recommendation,
};
use crate::types::{format_months, month_name, wrap_month};

use super::{climate::day_of_year_climatology, projection::project_harvest, scoring::score_crop};

/// Score every crop in the catalog and order the results.
///
/// Results sort by priority (best category first), then by descending score.
/// The sort is stable, so ties keep catalog order. Expected harvest is
/// projected from `as_of` with the day-of-year climatology when history
/// exists, otherwise estimated from the growing season length in months.
pub fn rank_crops(
    catalog: &CropCatalog,
    target_month: u32,
    history: &[DailyAggregate],
    as_of: NaiveDate,
) -> Vec<Recommendation> {
    let climatology = if history.is_empty() {
        None
    } else {
        Some(day_of_year_climatology(history))
    };

    let mut recommendations: Vec<Recommendation> = catalog
        .iter()
        .map(|crop| recommend(crop, target_month, history, climatology.as_ref(), as_of))
        .collect();

    recommendations.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| b.score.total_cmp(&a.score))
    });

    tracing::debug!(
        target_month,
        history_days = history.len(),
        crops = recommendations.len(),
        top = recommendations.first().map(|r| r.crop.as_str()),
        "Ranked crop recommendations"
    );

    recommendations
}

fn recommend(
    crop: &CropProfile,
    target_month: u32,
    history: &[DailyAggregate],
    climatology: Option<&Climatology>,
    as_of: NaiveDate,
) -> Recommendation {
    let score = score_crop(crop, target_month, history);
    let optimal_planting_text = if crop.optimal_planting.is_empty() {
        "See Calendar".to_string()
    } else {
        format_months(&crop.optimal_planting)
    };

    Recommendation {
        crop: crop.name.clone(),
        score: score.score,
        category: score.category,
        priority: score.priority(),
        reasons: score.reasons(),
        factors: score.factors,
        water_requirement: crop.water_requirement,
        soil_type: crop.soil_type.clone(),
        growing_days: crop.growing_season_days,
        expected_harvest: expected_harvest(crop, target_month, climatology, as_of),
        season: crop.season.clone(),
        description: crop.description.clone(),
        optimal_planting: crop.optimal_planting.clone(),
        optimal_planting_text,
    }
}

/// Expected harvest for a crop planted on `as_of`
pub fn expected_harvest(
    crop: &CropProfile,
    target_month: u32,
    climatology: Option<&Climatology>,
    as_of: NaiveDate,
) -> HarvestEstimate {
    match climatology {
        Some(climatology) => {
            let projection =
                project_harvest(crop.t_base, crop.gdd_to_maturity, climatology, as_of);
            HarvestEstimate {
                method: HarvestMethod::Gdd,
                date: Some(projection.harvest_date),
                month: projection.harvest_date.month(),
                days: projection.days_elapsed,
                display: format!(
                    "{} ({} days)",
                    projection.harvest_date.format("%b %d"),
                    projection.days_elapsed
                ),
            }
        }
        None => {
            let days = crop.growing_season_days;
            let month = wrap_month(i64::from(target_month) + i64::from(days / 30));
            HarvestEstimate {
                method: HarvestMethod::Calendar,
                date: None,
                month,
                days,
                display: format!("{} (~{} days)", month_name(month), days),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;
    use crate::models::RecommendationCategory;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
    }

    #[test]
    fn test_empty_history_ranks_every_crop() {
        let catalog = default_catalog();
        let ranked = rank_crops(&catalog, 4, &[], as_of());
        assert_eq!(ranked.len(), catalog.len());
        assert!(ranked.iter().all(|r| r.reasons.len() == 4));
        assert!(ranked
            .iter()
            .all(|r| r.expected_harvest.method == HarvestMethod::Calendar));
    }

    #[test]
    fn test_sorted_by_priority_then_score() {
        let ranked = rank_crops(&default_catalog(), 4, &[], as_of());
        for pair in ranked.windows(2) {
            assert!(pair[0].priority <= pair[1].priority);
            if pair[0].priority == pair[1].priority {
                assert!(pair[0].score >= pair[1].score);
            }
        }
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        // With no history, April-optimal crops all score 70
        let catalog = default_catalog();
        let ranked = rank_crops(&catalog, 4, &[], as_of());
        let tied: Vec<&str> = ranked
            .iter()
            .filter(|r| r.score == 70.0)
            .map(|r| r.crop.as_str())
            .collect();
        let in_catalog: Vec<&str> = catalog
            .iter()
            .filter(|c| c.is_optimal_in(4))
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(tied, in_catalog);
        assert_eq!(ranked[0].category, RecommendationCategory::Recommended);
    }

    #[test]
    fn test_calendar_fallback_wraps_to_december() {
        let catalog = default_catalog();
        // Tomato: 90 days from September lands in month 12
        let tomato = catalog.get("Tomato").unwrap();
        let estimate = expected_harvest(tomato, 9, None, as_of());
        assert_eq!(estimate.month, 12);
        assert_eq!(estimate.display, "Dec (~90 days)");
    }

    #[test]
    fn test_gdd_projection_display() {
        let catalog = default_catalog();
        let cowpea = catalog.get("Cowpea").unwrap();
        // 25°C every day, T_base 10: 900 GDD takes 60 days
        let clim: Climatology = (1..=366).map(|doy| (doy, 25.0)).collect();
        let estimate = expected_harvest(cowpea, 4, Some(&clim), as_of());
        assert_eq!(estimate.method, HarvestMethod::Gdd);
        assert_eq!(estimate.days, 60);
        assert_eq!(estimate.display, "May 31 (60 days)");
    }

    #[test]
    fn test_optimal_planting_text() {
        let ranked = rank_crops(&default_catalog(), 1, &[], as_of());
        let cowpea = ranked.iter().find(|r| r.crop == "Cowpea").unwrap();
        assert_eq!(cowpea.optimal_planting_text, "Dec, Jan, Feb");
    }
}
