//! Daily aggregation of raw observations

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{DailyAggregate, WeatherObservation};

use super::mean;

/// Running accumulator for one calendar day
#[derive(Default)]
struct DayAccumulator {
    t_min: Option<f64>,
    t_max: Option<f64>,
    current: Vec<f64>,
    humidity: Vec<f64>,
    precipitation: f64,
}

impl DayAccumulator {
    fn add(&mut self, obs: &WeatherObservation) {
        if let Some(low) = obs.low_temperature() {
            self.t_min = Some(self.t_min.map_or(low, |m| m.min(low)));
        }
        if let Some(high) = obs.high_temperature() {
            self.t_max = Some(self.t_max.map_or(high, |m| m.max(high)));
        }
        if let Some(t) = obs.temp_current.filter(|t| t.is_finite()) {
            self.current.push(t);
        }
        if let Some(h) = obs.humidity.filter(|h| h.is_finite()) {
            self.humidity.push(h);
        }
        if let Some(p) = obs.precipitation_1h.filter(|p| p.is_finite()) {
            self.precipitation += p;
        }
    }

    fn finish(self, date: NaiveDate) -> Option<DailyAggregate> {
        let (t_min, t_max) = match (self.t_min, self.t_max) {
            (Some(lo), Some(hi)) => (lo, hi),
            _ => return None,
        };
        Some(DailyAggregate {
            date,
            t_min,
            t_max,
            t_avg: (t_max + t_min) / 2.0,
            t_current_mean: mean(self.current),
            humidity_mean: mean(self.humidity),
            precipitation_mm: self.precipitation,
        })
    }
}

/// Collapse one zone's observations into a daily series.
///
/// Duplicate timestamps are resolved last-write-wins in input order. Days
/// that end up without both a minimum and a maximum temperature are dropped.
/// The result is ordered by date with no repeated dates.
pub fn aggregate_daily(observations: &[WeatherObservation]) -> Vec<DailyAggregate> {
    if observations.is_empty() {
        return Vec::new();
    }

    let mut latest: BTreeMap<NaiveDateTime, &WeatherObservation> = BTreeMap::new();
    for obs in observations {
        latest.insert(obs.timestamp, obs);
    }

    let mut days: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();
    for obs in latest.values() {
        days.entry(obs.date()).or_default().add(obs);
    }

    let total_days = days.len();
    let daily: Vec<DailyAggregate> = days
        .into_iter()
        .filter_map(|(date, acc)| acc.finish(date))
        .collect();

    if daily.len() < total_days {
        tracing::debug!(
            dropped = total_days - daily.len(),
            kept = daily.len(),
            "Dropped days without a temperature range"
        );
    }

    daily
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn reading(day: u32, hour: u32, current: f64, min: f64, max: f64, rain: f64) -> WeatherObservation {
        let mut obs = WeatherObservation::new("Aba", at(day, hour));
        obs.temp_current = Some(current);
        obs.temp_min = Some(min);
        obs.temp_max = Some(max);
        obs.humidity = Some(80.0);
        obs.precipitation_1h = Some(rain);
        obs
    }

    #[test]
    fn test_empty_input_yields_empty_series() {
        assert!(aggregate_daily(&[]).is_empty());
    }

    #[test]
    fn test_daily_range_and_midpoint_average() {
        let obs = vec![
            reading(1, 0, 22.0, 21.0, 23.0, 0.5),
            reading(1, 3, 30.0, 28.0, 32.0, 1.5),
            reading(1, 6, 25.0, 24.0, 26.0, 0.0),
        ];
        let daily = aggregate_daily(&obs);
        assert_eq!(daily.len(), 1);
        let day = &daily[0];
        assert_eq!(day.t_min, 21.0);
        assert_eq!(day.t_max, 32.0);
        assert_eq!(day.t_avg, 26.5);
        assert_eq!(day.precipitation_mm, 2.0);
        // Mean of current readings is reported separately from the midpoint
        assert!((day.t_current_mean.unwrap() - 25.666_666).abs() < 1e-4);
        assert_eq!(day.humidity_mean, Some(80.0));
    }

    #[test]
    fn test_duplicate_timestamps_last_write_wins() {
        let obs = vec![
            reading(1, 0, 20.0, 20.0, 20.0, 10.0),
            reading(1, 0, 30.0, 30.0, 30.0, 1.0),
        ];
        let daily = aggregate_daily(&obs);
        assert_eq!(daily[0].t_min, 30.0);
        assert_eq!(daily[0].precipitation_mm, 1.0);
    }

    #[test]
    fn test_current_temperature_fills_missing_bounds() {
        let mut obs = WeatherObservation::new("Aba", at(2, 12));
        obs.temp_current = Some(27.0);
        obs.temp_max = Some(29.0);
        let daily = aggregate_daily(&[obs]);
        assert_eq!(daily[0].t_min, 27.0);
        assert_eq!(daily[0].t_max, 29.0);
    }

    #[test]
    fn test_days_without_temperature_are_dropped() {
        let mut rain_only = WeatherObservation::new("Aba", at(3, 9));
        rain_only.precipitation_1h = Some(4.0);
        let mut nan_day = WeatherObservation::new("Aba", at(4, 9));
        nan_day.temp_min = Some(f64::NAN);
        nan_day.temp_max = Some(f64::NAN);
        let obs = vec![rain_only, nan_day, reading(5, 0, 25.0, 24.0, 26.0, 0.0)];

        let daily = aggregate_daily(&obs);
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn test_output_sorted_regardless_of_input_order() {
        let obs = vec![
            reading(9, 0, 25.0, 24.0, 26.0, 0.0),
            reading(2, 0, 25.0, 24.0, 26.0, 0.0),
            reading(5, 0, 25.0, 24.0, 26.0, 0.0),
        ];
        let dates: Vec<_> = aggregate_daily(&obs).iter().map(|d| d.date.day0()).collect();
        assert_eq!(dates, vec![1, 4, 8]);
    }
}
