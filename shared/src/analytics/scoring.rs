//! Crop suitability scoring
//!
//! A crop's score for a target month is the sum of four independent factors:
//!
//! | Factor             | Points |
//! |--------------------|--------|
//! | Planting window    | 0-40   |
//! | Temperature match  | 0-30   |
//! | Rainfall adequacy  | 0-20   |
//! | Historical success | 0-10   |
//!
//! A factor whose history is missing substitutes a neutral value and reports
//! [`FactorOutcome::DataUnavailable`] instead of failing the whole score.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Datelike;

use crate::models::{
    CropProfile, CropScore, DailyAggregate, Factor, FactorOutcome, FactorScore,
    RecommendationCategory,
};
use crate::types::wrap_month;

use super::{calendar::planting_status, mean};

/// Tolerance around the optimal temperature range still given partial credit (°C)
pub const TEMPERATURE_TOLERANCE: f64 = 3.0;
/// Days per month bucket when projecting expected seasonal rainfall
pub const DAYS_PER_MONTH_BUCKET: f64 = 30.0;

const NEUTRAL_TEMPERATURE_POINTS: f64 = 15.0;
const NEUTRAL_RAINFALL_POINTS: f64 = 10.0;
const NEUTRAL_SUCCESS_POINTS: f64 = 5.0;

/// Score one crop for planting in `target_month` against a zone's daily history
pub fn score_crop(crop: &CropProfile, target_month: u32, history: &[DailyAggregate]) -> CropScore {
    let factors = vec![
        planting_window_factor(crop, target_month),
        temperature_factor(crop, target_month, history),
        rainfall_factor(crop, target_month, history),
        historical_success_factor(crop, target_month, history),
    ];

    let score = factors.iter().map(|f| f.points).sum::<f64>().clamp(0.0, 100.0);

    CropScore {
        score,
        category: RecommendationCategory::from_score(score),
        factors,
    }
}

fn factor_score(factor: Factor, outcome: FactorOutcome, points: f64, reason: String) -> FactorScore {
    FactorScore {
        factor,
        outcome,
        points,
        reason,
    }
}

/// Planting window factor: optimal month, acceptable month or out of season
pub fn planting_window_factor(crop: &CropProfile, target_month: u32) -> FactorScore {
    let status = planting_status(crop, target_month);
    if status.is_optimal {
        factor_score(
            Factor::PlantingWindow,
            FactorOutcome::Matched,
            40.0,
            format!("Optimal planting window: peak season for {}", crop.name),
        )
    } else if status.is_plantable {
        factor_score(
            Factor::PlantingWindow,
            FactorOutcome::Acceptable,
            25.0,
            "Acceptable planting period: can plant but not peak season".to_string(),
        )
    } else {
        factor_score(
            Factor::PlantingWindow,
            FactorOutcome::Unmatched,
            0.0,
            format!("Wrong season: {}", status.reason),
        )
    }
}

fn month_mean_t_avg<'a>(days: impl IntoIterator<Item = &'a DailyAggregate>, month: u32) -> Option<f64> {
    mean(
        days.into_iter()
            .filter(|d| d.date.month() == month)
            .map(|d| d.t_avg),
    )
}

/// Temperature factor: mean `t_avg` of all history days in the target month
pub fn temperature_factor(
    crop: &CropProfile,
    target_month: u32,
    history: &[DailyAggregate],
) -> FactorScore {
    let range = crop.optimal_temp_range;
    let Some(avg_temp) = month_mean_t_avg(history, target_month) else {
        return factor_score(
            Factor::Temperature,
            FactorOutcome::DataUnavailable,
            NEUTRAL_TEMPERATURE_POINTS,
            "Temperature data unavailable for analysis".to_string(),
        );
    };

    if range.contains(avg_temp) {
        factor_score(
            Factor::Temperature,
            FactorOutcome::Matched,
            30.0,
            format!(
                "Temperature ideal ({:.1}°C suits {}-{}°C range)",
                avg_temp, range.min, range.max
            ),
        )
    } else if range.widened(TEMPERATURE_TOLERANCE).contains(avg_temp) {
        factor_score(
            Factor::Temperature,
            FactorOutcome::Acceptable,
            20.0,
            format!(
                "Temperature acceptable ({:.1}°C near {}-{}°C range)",
                avg_temp, range.min, range.max
            ),
        )
    } else {
        factor_score(
            Factor::Temperature,
            FactorOutcome::Unmatched,
            5.0,
            format!(
                "Temperature suboptimal ({:.1}°C outside {}-{}°C range)",
                avg_temp, range.min, range.max
            ),
        )
    }
}

/// Calendar months spanned by a growing season starting in `target_month`.
///
/// A season of `d` days covers `d / 30 + 1` months, wrapping past December.
pub fn season_months(target_month: u32, growing_season_days: u32) -> Vec<u32> {
    let count = growing_season_days / 30 + 1;
    let mut months: Vec<u32> = (0..count)
        .map(|offset| wrap_month(i64::from(target_month) + i64::from(offset)))
        .collect();
    // Seasons longer than a year revisit months already counted
    let mut seen = BTreeSet::new();
    months.retain(|m| seen.insert(*m));
    months
}

/// Expected rainfall over the growing season.
///
/// Mean daily precipitation over every history day in the season months,
/// multiplied by 30 days per season month. `None` when no history day falls
/// in those months.
pub fn expected_season_rainfall(
    target_month: u32,
    growing_season_days: u32,
    history: &[DailyAggregate],
) -> Option<f64> {
    let months = season_months(target_month, growing_season_days);
    let daily_mean = mean(
        history
            .iter()
            .filter(|d| months.contains(&d.date.month()))
            .map(|d| d.precipitation_mm),
    )?;
    Some(daily_mean * DAYS_PER_MONTH_BUCKET * months.len() as f64)
}

/// Rainfall factor: expected season rainfall against the pro-rated annual need
pub fn rainfall_factor(
    crop: &CropProfile,
    target_month: u32,
    history: &[DailyAggregate],
) -> FactorScore {
    let Some(expected) = expected_season_rainfall(target_month, crop.growing_season_days, history)
    else {
        return factor_score(
            Factor::Rainfall,
            FactorOutcome::DataUnavailable,
            NEUTRAL_RAINFALL_POINTS,
            "Rainfall data unavailable for analysis".to_string(),
        );
    };

    let need = crop
        .rainfall_annual_mm
        .scaled(f64::from(crop.growing_season_days) / 365.0);

    if need.contains(expected) {
        factor_score(
            Factor::Rainfall,
            FactorOutcome::Matched,
            20.0,
            format!("Adequate rainfall expected ({:.0}mm for growing season)", expected),
        )
    } else if expected < need.min {
        if crop.water_requirement.is_drought_tolerant() {
            factor_score(
                Factor::Rainfall,
                FactorOutcome::Acceptable,
                15.0,
                format!(
                    "Below optimal rain ({:.0}mm) but crop is drought-tolerant",
                    expected
                ),
            )
        } else {
            factor_score(
                Factor::Rainfall,
                FactorOutcome::Unmatched,
                5.0,
                format!(
                    "Insufficient rainfall ({:.0}mm below minimum, irrigation needed)",
                    need.min - expected
                ),
            )
        }
    } else if crop.water_requirement.is_water_loving() {
        factor_score(
            Factor::Rainfall,
            FactorOutcome::Acceptable,
            18.0,
            format!("High rainfall ({:.0}mm) suits water-loving crop", expected),
        )
    } else {
        factor_score(
            Factor::Rainfall,
            FactorOutcome::Unmatched,
            10.0,
            format!(
                "Heavy rainfall expected ({:.0}mm), ensure good drainage",
                expected
            ),
        )
    }
}

/// Historical success factor: share of years whose target-month mean `t_avg`
/// fell inside the optimal range
pub fn historical_success_factor(
    crop: &CropProfile,
    target_month: u32,
    history: &[DailyAggregate],
) -> FactorScore {
    let mut by_year: BTreeMap<i32, Vec<&DailyAggregate>> = BTreeMap::new();
    for day in history {
        by_year.entry(day.date.year()).or_default().push(day);
    }

    if by_year.is_empty() {
        return factor_score(
            Factor::HistoricalSuccess,
            FactorOutcome::DataUnavailable,
            NEUTRAL_SUCCESS_POINTS,
            "Insufficient historical data for success rate".to_string(),
        );
    }

    // A year without target-month days counts as unsuccessful
    let successes = by_year
        .values()
        .filter(|days| {
            month_mean_t_avg(days.iter().copied(), target_month)
                .is_some_and(|t| crop.optimal_temp_range.contains(t))
        })
        .count();

    let success_rate = successes as f64 / by_year.len() as f64 * 100.0;
    let outcome = if successes == by_year.len() {
        FactorOutcome::Matched
    } else if successes > 0 {
        FactorOutcome::Acceptable
    } else {
        FactorOutcome::Unmatched
    };

    factor_score(
        Factor::HistoricalSuccess,
        outcome,
        success_rate / 100.0 * 10.0,
        format!(
            "Historical success: {:.0}% of years had suitable conditions",
            success_rate
        ),
    )
}
