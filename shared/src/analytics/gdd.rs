//! Growing degree day accumulation

use chrono::Datelike;

use crate::models::{DailyAggregate, GddPoint};

/// Heat units accrued by a day with average temperature `t_avg`
pub fn daily_gdd(t_avg: f64, t_base: f64) -> f64 {
    (t_avg - t_base).max(0.0)
}

/// Daily and cumulative GDD over the supplied window.
///
/// The cumulative total starts at zero on the first element; callers choose
/// the window by slicing the daily series.
pub fn gdd_series(daily: &[DailyAggregate], t_base: f64) -> Vec<GddPoint> {
    let mut cumulative = 0.0;
    daily
        .iter()
        .map(|day| {
            let gdd = daily_gdd(day.t_avg, t_base);
            cumulative += gdd;
            GddPoint {
                date: day.date,
                t_avg: day.t_avg,
                daily_gdd: gdd,
                cumulative_gdd: cumulative,
            }
        })
        .collect()
}

/// GDD series whose cumulative total restarts on the first day of each calendar year
pub fn annual_gdd_series(daily: &[DailyAggregate], t_base: f64) -> Vec<GddPoint> {
    let mut cumulative = 0.0;
    let mut current_year = None;
    daily
        .iter()
        .map(|day| {
            if current_year != Some(day.date.year()) {
                current_year = Some(day.date.year());
                cumulative = 0.0;
            }
            let gdd = daily_gdd(day.t_avg, t_base);
            cumulative += gdd;
            GddPoint {
                date: day.date,
                t_avg: day.t_avg,
                daily_gdd: gdd,
                cumulative_gdd: cumulative,
            }
        })
        .collect()
}

/// Percentage of the maturity target reached; zero for a non-positive target
pub fn maturity_progress(cumulative_gdd: f64, gdd_target: f64) -> f64 {
    if gdd_target <= 0.0 {
        return 0.0;
    }
    cumulative_gdd / gdd_target * 100.0
}
