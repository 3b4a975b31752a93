//! Rolling rainfall risk flags

use std::collections::{BTreeMap, VecDeque};

use chrono::{Datelike, Duration};

use crate::models::{DailyAggregate, DroughtFrequency, RiskFlag, RiskPoint, RiskThresholds};

/// Classify a trailing rainfall sum.
///
/// Drought is checked first, so with overlapping thresholds drought wins.
/// Both boundaries are inclusive.
pub fn classify_rainfall(rain_sum_mm: f64, thresholds: &RiskThresholds) -> RiskFlag {
    if rain_sum_mm <= thresholds.drought_mm {
        RiskFlag::Drought
    } else if rain_sum_mm >= thresholds.waterlogging_mm {
        RiskFlag::Waterlogging
    } else {
        RiskFlag::Normal
    }
}

/// Trailing rainfall sum and risk flag for every day of the series.
///
/// The window covers the `window_days` calendar days ending on each day.
/// Early days use whatever history exists, so every input day gets a value.
pub fn risk_series(daily: &[DailyAggregate], thresholds: &RiskThresholds) -> Vec<RiskPoint> {
    let window = Duration::days(i64::from(thresholds.window_days.max(1)));
    let mut in_window: VecDeque<&DailyAggregate> = VecDeque::new();

    daily
        .iter()
        .map(|day| {
            in_window.push_back(day);
            while in_window
                .front()
                .is_some_and(|front| day.date - front.date >= window)
            {
                in_window.pop_front();
            }
            let window_sum: f64 = in_window.iter().map(|d| d.precipitation_mm).sum();
            RiskPoint {
                date: day.date,
                daily_rain_mm: day.precipitation_mm,
                rain_window_sum_mm: window_sum,
                flag: classify_rainfall(window_sum, thresholds),
            }
        })
        .collect()
}

/// Count drought-flagged days per calendar year
pub fn drought_days_per_year(risk: &[RiskPoint]) -> Vec<DroughtFrequency> {
    let mut counts: BTreeMap<i32, u32> = BTreeMap::new();
    for point in risk {
        let entry = counts.entry(point.date.year()).or_insert(0);
        if point.flag == RiskFlag::Drought {
            *entry += 1;
        }
    }
    counts
        .into_iter()
        .map(|(year, drought_days)| DroughtFrequency { year, drought_days })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rainy(day: u32, rain: f64) -> DailyAggregate {
        DailyAggregate::new(NaiveDate::from_ymd_opt(2024, 6, day).unwrap(), 22.0, 30.0, rain)
    }

    #[test]
    fn test_inclusive_boundaries() {
        let t = RiskThresholds::default();
        assert_eq!(classify_rainfall(5.0, &t), RiskFlag::Drought);
        assert_eq!(classify_rainfall(5.01, &t), RiskFlag::Normal);
        assert_eq!(classify_rainfall(75.0, &t), RiskFlag::Normal);
        assert_eq!(classify_rainfall(150.0, &t), RiskFlag::Waterlogging);
        assert_eq!(classify_rainfall(0.0, &t), RiskFlag::Drought);
    }

    #[test]
    fn test_drought_takes_priority_when_thresholds_overlap() {
        let t = RiskThresholds {
            drought_mm: 50.0,
            waterlogging_mm: 10.0,
            window_days: 7,
        };
        assert_eq!(classify_rainfall(20.0, &t), RiskFlag::Drought);
    }

    #[test]
    fn test_first_day_uses_partial_window() {
        let series = risk_series(&[rainy(1, 12.0)], &RiskThresholds::default());
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].rain_window_sum_mm, 12.0);
        assert_eq!(series[0].flag, RiskFlag::Normal);
    }

    #[test]
    fn test_seven_day_window_rolls_off() {
        let daily: Vec<_> = (1..=9).map(|d| rainy(d, 10.0)).collect();
        let series = risk_series(&daily, &RiskThresholds::default());
        let sums: Vec<f64> = series.iter().map(|p| p.rain_window_sum_mm).collect();
        assert_eq!(sums, vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 70.0, 70.0]);
    }

    #[test]
    fn test_window_is_calendar_based_across_gaps() {
        // Day 1 is outside the 7-day window ending on day 8
        let daily = vec![rainy(1, 100.0), rainy(8, 1.0)];
        let series = risk_series(&daily, &RiskThresholds::default());
        assert_eq!(series[1].rain_window_sum_mm, 1.0);
        assert_eq!(series[1].flag, RiskFlag::Drought);
    }

    #[test]
    fn test_drought_days_per_year_counts_only_drought() {
        let daily = vec![rainy(1, 0.0), rainy(2, 0.0), rainy(3, 40.0), rainy(4, 0.0)];
        let series = risk_series(&daily, &RiskThresholds::default());
        let freq = drought_days_per_year(&series);
        assert_eq!(freq, vec![DroughtFrequency { year: 2024, drought_days: 2 }]);
    }
}
