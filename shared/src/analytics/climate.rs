//! Annual rollups, rainfall onset and day-of-year baselines

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::{
    AnnualMetric, BaselineComparison, Climatology, DailyAggregate, PlantingOnset,
    SeasonalityPoint, ZoneStatistics, MIN_DAYS_PER_YEAR,
};

use super::{day_of_year, mean};

/// Rainfall over three consecutive days that marks the onset of the rains (mm)
pub const ONSET_RAIN_THRESHOLD_MM: f64 = 20.0;
/// Onset search starts on this month of each year
pub const ONSET_SEARCH_START_MONTH: u32 = 3;
/// Half-width of the centered smoothing window for seasonality curves
const SEASONALITY_HALF_WINDOW: u32 = 3;

fn group_by_year(daily: &[DailyAggregate]) -> BTreeMap<i32, Vec<&DailyAggregate>> {
    let mut years: BTreeMap<i32, Vec<&DailyAggregate>> = BTreeMap::new();
    for day in daily {
        years.entry(day.date.year()).or_default().push(day);
    }
    years
}

/// Total rainfall and mean temperature per calendar year.
///
/// Years with fewer than [`MIN_DAYS_PER_YEAR`] days are left out so partial
/// years do not show up as dry years.
pub fn annual_metrics(daily: &[DailyAggregate]) -> Vec<AnnualMetric> {
    group_by_year(daily)
        .into_iter()
        .filter(|(_, days)| days.len() >= MIN_DAYS_PER_YEAR)
        .filter_map(|(year, days)| {
            let mean_t_avg = mean(days.iter().map(|d| d.t_avg))?;
            Some(AnnualMetric {
                year,
                total_precipitation_mm: days.iter().map(|d| d.precipitation_mm).sum(),
                mean_t_avg,
                day_count: days.len(),
            })
        })
        .collect()
}

/// First date on or after March 1 of each year where three consecutive
/// days of rain add up to at least [`ONSET_RAIN_THRESHOLD_MM`].
///
/// Years with fewer than [`MIN_DAYS_PER_YEAR`] days are skipped, and years
/// where the rains never qualify produce no record.
pub fn planting_onsets(daily: &[DailyAggregate]) -> Vec<PlantingOnset> {
    let mut onsets = Vec::new();

    for (year, days) in group_by_year(daily) {
        if days.len() < MIN_DAYS_PER_YEAR {
            tracing::debug!(year, days = days.len(), "Skipping incomplete year for onset detection");
            continue;
        }
        let Some(season_start) = NaiveDate::from_ymd_opt(year, ONSET_SEARCH_START_MONTH, 1) else {
            continue;
        };

        let season: Vec<&DailyAggregate> = days
            .into_iter()
            .filter(|d| d.date >= season_start)
            .collect();

        let onset = season.windows(3).find_map(|w| {
            let consecutive = w[1].date - w[0].date == Duration::days(1)
                && w[2].date - w[1].date == Duration::days(1);
            let total: f64 = w.iter().map(|d| d.precipitation_mm).sum();
            (consecutive && total >= ONSET_RAIN_THRESHOLD_MM).then(|| PlantingOnset {
                year,
                date: w[2].date,
                day_of_year: day_of_year(w[2].date),
                rain_3d_sum_mm: total,
            })
        });

        if let Some(onset) = onset {
            onsets.push(onset);
        }
    }

    onsets
}

#[derive(Default)]
struct DoyAccumulator {
    t_max: Vec<f64>,
    t_min: Vec<f64>,
    t_avg: Vec<f64>,
    precipitation: Vec<f64>,
}

/// Average temperature per day of year over all supplied days
pub fn day_of_year_climatology(daily: &[DailyAggregate]) -> Climatology {
    let mut by_doy: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for day in daily {
        by_doy.entry(day_of_year(day.date)).or_default().push(day.t_avg);
    }
    by_doy
        .into_iter()
        .filter_map(|(doy, temps)| mean(temps).map(|t| (doy, t)))
        .collect()
}

/// Smoothed day-of-year baseline built from past years.
///
/// Days from `current_year` are excluded so this year's anomalies do not
/// leak into the comparison; if nothing else remains, all days are used.
/// Per-day means are smoothed with a centered 7-day window that shrinks at
/// the edges of the year.
pub fn historical_seasonality(daily: &[DailyAggregate], current_year: i32) -> Vec<SeasonalityPoint> {
    let past: Vec<&DailyAggregate> = daily
        .iter()
        .filter(|d| d.date.year() != current_year)
        .collect();
    let history: Vec<&DailyAggregate> = if past.is_empty() {
        daily.iter().collect()
    } else {
        past
    };

    let mut by_doy: BTreeMap<u32, DoyAccumulator> = BTreeMap::new();
    for day in history {
        let acc = by_doy.entry(day_of_year(day.date)).or_default();
        acc.t_max.push(day.t_max);
        acc.t_min.push(day.t_min);
        acc.t_avg.push(day.t_avg);
        acc.precipitation.push(day.precipitation_mm);
    }

    let raw: BTreeMap<u32, SeasonalityPoint> = by_doy
        .into_iter()
        .filter_map(|(doy, acc)| {
            Some((
                doy,
                SeasonalityPoint {
                    day_of_year: doy,
                    t_max: mean(acc.t_max)?,
                    t_min: mean(acc.t_min)?,
                    t_avg: mean(acc.t_avg)?,
                    precipitation_mm: mean(acc.precipitation)?,
                },
            ))
        })
        .collect();

    raw.keys()
        .filter_map(|&doy| {
            let lo = doy.saturating_sub(SEASONALITY_HALF_WINDOW);
            let hi = doy + SEASONALITY_HALF_WINDOW;
            let window: Vec<&SeasonalityPoint> = raw.range(lo..=hi).map(|(_, p)| p).collect();
            Some(SeasonalityPoint {
                day_of_year: doy,
                t_max: mean(window.iter().map(|p| p.t_max))?,
                t_min: mean(window.iter().map(|p| p.t_min))?,
                t_avg: mean(window.iter().map(|p| p.t_avg))?,
                precipitation_mm: mean(window.iter().map(|p| p.precipitation_mm))?,
            })
        })
        .collect()
}

/// Percent deviation of `actual` from `baseline`; zero when the baseline is zero
pub fn percent_deviation(actual: f64, baseline: f64) -> f64 {
    if baseline == 0.0 || !baseline.is_finite() {
        return 0.0;
    }
    (actual - baseline) / baseline * 100.0
}

/// Compare every day of `current_year` with the seasonality baseline for the same day of year.
///
/// Days without a baseline entry are skipped.
pub fn baseline_comparison(daily: &[DailyAggregate], current_year: i32) -> Vec<BaselineComparison> {
    let baseline: HashMap<u32, SeasonalityPoint> = historical_seasonality(daily, current_year)
        .into_iter()
        .map(|p| (p.day_of_year, p))
        .collect();

    daily
        .iter()
        .filter(|d| d.date.year() == current_year)
        .filter_map(|day| {
            let doy = day_of_year(day.date);
            let base = baseline.get(&doy)?;
            Some(BaselineComparison {
                date: day.date,
                day_of_year: doy,
                t_avg: day.t_avg,
                baseline_t_avg: base.t_avg,
                t_avg_anomaly: day.t_avg - base.t_avg,
                precipitation_mm: day.precipitation_mm,
                baseline_precipitation_mm: base.precipitation_mm,
                precipitation_deviation_pct: percent_deviation(
                    day.precipitation_mm,
                    base.precipitation_mm,
                ),
            })
        })
        .collect()
}

/// Headline statistics; `None` when there are no days
pub fn zone_statistics(daily: &[DailyAggregate]) -> Option<ZoneStatistics> {
    let first = daily.first()?;
    let last = daily.last()?;

    let trailing_rain = |n: usize| -> f64 {
        daily
            .iter()
            .rev()
            .take(n)
            .map(|d| d.precipitation_mm)
            .sum()
    };

    Some(ZoneStatistics {
        avg_temp: mean(daily.iter().map(|d| d.t_avg))?,
        max_temp: daily.iter().map(|d| d.t_max).fold(f64::NEG_INFINITY, f64::max),
        min_temp: daily.iter().map(|d| d.t_min).fold(f64::INFINITY, f64::min),
        avg_humidity: mean(daily.iter().filter_map(|d| d.humidity_mean)),
        total_rain_30d: trailing_rain(30),
        total_rain_90d: trailing_rain(90),
        avg_daily_rain: mean(daily.iter().map(|d| d.precipitation_mm))?,
        day_count: daily.len(),
        first_date: first.date,
        last_date: last.date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// `count` consecutive days starting at `start`, with rain from `rain_for`
    fn run(start: NaiveDate, count: i64, t_avg: f64, rain_for: impl Fn(NaiveDate) -> f64) -> Vec<DailyAggregate> {
        (0..count)
            .map(|i| {
                let d = start + Duration::days(i);
                DailyAggregate::new(d, t_avg - 4.0, t_avg + 4.0, rain_for(d))
            })
            .collect()
    }

    #[test]
    fn test_annual_metrics_excludes_short_years() {
        let mut daily = run(date(2022, 1, 1), 365, 26.0, |_| 2.0);
        daily.extend(run(date(2023, 1, 1), 179, 27.0, |_| 1.0));
        let annual = annual_metrics(&daily);
        assert_eq!(annual.len(), 1);
        assert_eq!(annual[0].year, 2022);
        assert_eq!(annual[0].day_count, 365);
        assert!((annual[0].total_precipitation_mm - 730.0).abs() < 1e-9);
        assert!((annual[0].mean_t_avg - 26.0).abs() < 1e-9);
    }

    #[test]
    fn test_annual_metrics_keeps_year_at_exactly_180_days() {
        let daily = run(date(2023, 1, 1), 180, 27.0, |_| 1.0);
        assert_eq!(annual_metrics(&daily).len(), 1);
    }

    #[test]
    fn test_onset_ignores_rain_before_march() {
        let daily = run(date(2023, 1, 1), 365, 26.0, |d| {
            if d == date(2023, 2, 10) || d == date(2023, 3, 20) {
                25.0
            } else {
                0.0
            }
        });
        let onsets = planting_onsets(&daily);
        assert_eq!(onsets.len(), 1);
        // The 3-day window ending on Mar 20 is the first to reach 20mm
        assert_eq!(onsets[0].date, date(2023, 3, 20));
        assert_eq!(onsets[0].day_of_year, 79);
    }

    #[test]
    fn test_onset_uses_three_day_sum() {
        let daily = run(date(2023, 1, 1), 365, 26.0, |d| {
            if d >= date(2023, 4, 1) && d <= date(2023, 4, 3) {
                7.0
            } else {
                0.0
            }
        });
        let onsets = planting_onsets(&daily);
        assert_eq!(onsets[0].date, date(2023, 4, 3));
        assert!((onsets[0].rain_3d_sum_mm - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_onset_absent_for_dry_or_short_years() {
        let mut daily = run(date(2022, 1, 1), 365, 26.0, |_| 0.0);
        daily.extend(run(date(2023, 3, 1), 100, 26.0, |_| 30.0));
        assert!(planting_onsets(&daily).is_empty());
    }

    #[test]
    fn test_climatology_averages_each_day_of_year() {
        let mut daily = run(date(2021, 1, 1), 2, 20.0, |_| 0.0);
        daily.extend(run(date(2022, 1, 1), 1, 30.0, |_| 0.0));
        let clim = day_of_year_climatology(&daily);
        assert_eq!(clim.len(), 2);
        assert_eq!(clim.get(1), Some(25.0));
        assert_eq!(clim.get(2), Some(20.0));
        assert_eq!(clim.get(3), None);
    }

    #[test]
    fn test_seasonality_excludes_current_year() {
        let mut daily = run(date(2023, 1, 1), 30, 25.0, |_| 1.0);
        daily.extend(run(date(2024, 1, 1), 30, 35.0, |_| 9.0));
        let seasonality = historical_seasonality(&daily, 2024);
        assert_eq!(seasonality.len(), 30);
        assert!(seasonality.iter().all(|p| (p.t_avg - 25.0).abs() < 1e-9));
        assert!(seasonality.iter().all(|p| (p.precipitation_mm - 1.0).abs() < 1e-9));
    }

    #[test]
    fn test_seasonality_falls_back_to_current_year() {
        let daily = run(date(2024, 1, 1), 10, 30.0, |_| 2.0);
        let seasonality = historical_seasonality(&daily, 2024);
        assert_eq!(seasonality.len(), 10);
        assert!((seasonality[0].t_avg - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_seasonality_smoothing_window_shrinks_at_edges() {
        // Rain only on day 1: day 1 sees days 1-4, day 4 sees days 1-7
        let daily = run(date(2023, 1, 1), 10, 25.0, |d| if d.ordinal() == 1 { 28.0 } else { 0.0 });
        let seasonality = historical_seasonality(&daily, 2024);
        assert!((seasonality[0].precipitation_mm - 7.0).abs() < 1e-9);
        assert!((seasonality[3].precipitation_mm - 4.0).abs() < 1e-9);
        assert!(seasonality[4].precipitation_mm.abs() < 1e-9);
    }

    #[test]
    fn test_percent_deviation_zero_baseline() {
        assert_eq!(percent_deviation(10.0, 0.0), 0.0);
        assert_eq!(percent_deviation(15.0, 10.0), 50.0);
        assert_eq!(percent_deviation(5.0, 10.0), -50.0);
    }

    #[test]
    fn test_baseline_comparison_for_dry_baseline() {
        let mut daily = run(date(2023, 1, 1), 10, 25.0, |_| 0.0);
        daily.extend(run(date(2024, 1, 1), 10, 27.0, |_| 3.0));
        let comparison = baseline_comparison(&daily, 2024);
        assert_eq!(comparison.len(), 10);
        assert!((comparison[0].t_avg_anomaly - 2.0).abs() < 1e-9);
        assert_eq!(comparison[0].precipitation_deviation_pct, 0.0);
    }

    #[test]
    fn test_zone_statistics() {
        assert!(zone_statistics(&[]).is_none());
        let daily = run(date(2024, 1, 1), 100, 26.0, |_| 1.0);
        let stats = zone_statistics(&daily).unwrap();
        assert_eq!(stats.day_count, 100);
        assert!((stats.total_rain_30d - 30.0).abs() < 1e-9);
        assert!((stats.total_rain_90d - 90.0).abs() < 1e-9);
        assert_eq!(stats.max_temp, 30.0);
        assert_eq!(stats.min_temp, 22.0);
        assert_eq!(stats.avg_humidity, None);
    }
}
