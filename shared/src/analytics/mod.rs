//! Analytics and recommendation engine
//!
//! Every function in this module is a pure transformation over in-memory
//! series: no I/O, no clock reads and no shared state. Missing history
//! degrades to empty outputs or neutral scores rather than errors.
//!
//! Data flows one way:
//! observations -> [`aggregation`] -> [`gdd`] / [`risk`] / [`climate`] /
//! [`projection`] -> [`scoring`] -> [`ranking`].

pub mod aggregation;
pub mod calendar;
pub mod climate;
pub mod gdd;
pub mod projection;
pub mod ranking;
pub mod risk;
pub mod scoring;

pub use aggregation::aggregate_daily;
pub use climate::{
    annual_metrics, baseline_comparison, day_of_year_climatology, historical_seasonality,
    planting_onsets, zone_statistics,
};
pub use gdd::{annual_gdd_series, gdd_series, maturity_progress};
pub use projection::project_harvest;
pub use ranking::rank_crops;
pub use risk::{classify_rainfall, drought_days_per_year, risk_series};
pub use scoring::score_crop;

use chrono::{Datelike, NaiveDate};

use crate::models::DailyAggregate;
use crate::types::DateRange;

/// Restrict a daily series to an inclusive date range
pub fn slice_range(daily: &[DailyAggregate], range: DateRange) -> Vec<DailyAggregate> {
    daily
        .iter()
        .filter(|day| range.contains(day.date))
        .cloned()
        .collect()
}

/// Arithmetic mean; `None` for an empty input
pub(crate) fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

pub(crate) fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}
