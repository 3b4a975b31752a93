//! Forward projection of heat accumulation to a harvest date

use chrono::{Duration, NaiveDate};

use crate::models::{Climatology, HarvestProjection};

use super::{day_of_year, gdd::daily_gdd};

/// Hard cap on simulated days
pub const MAX_PROJECTION_DAYS: u32 = 365;
/// Temperature assumed for days missing from the climatology (°C)
pub const FALLBACK_DAILY_TEMP: f64 = 25.0;

/// Simulate GDD accumulation day by day from `start_date` using the
/// day-of-year climatology until `gdd_target` is reached or
/// [`MAX_PROJECTION_DAYS`] have passed.
///
/// Day-of-year lookups wrap modulo 365, so day 366 of a leap year reuses the
/// climatology of day 1.
pub fn project_harvest(
    t_base: f64,
    gdd_target: f64,
    climatology: &Climatology,
    start_date: NaiveDate,
) -> HarvestProjection {
    let start_doy = day_of_year(start_date);
    let mut accumulated = 0.0;
    let mut days_elapsed = 0u32;

    while accumulated < gdd_target && days_elapsed < MAX_PROJECTION_DAYS {
        let lookup = (start_doy + days_elapsed - 1) % 365 + 1;
        let t_avg = climatology.get(lookup).unwrap_or(FALLBACK_DAILY_TEMP);
        accumulated += daily_gdd(t_avg, t_base);
        days_elapsed += 1;
    }

    HarvestProjection {
        start_date,
        harvest_date: start_date + Duration::days(i64::from(days_elapsed)),
        days_elapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant_climatology(t_avg: f64) -> Climatology {
        (1..=366).map(|doy| (doy, t_avg)).collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_reaches_target_on_exact_day() {
        let clim = constant_climatology(25.0);
        let projection = project_harvest(10.0, 150.0, &clim, date(2024, 4, 1));
        assert_eq!(projection.days_elapsed, 10);
        assert_eq!(projection.harvest_date, date(2024, 4, 11));
    }

    #[test]
    fn test_zero_target_harvests_immediately() {
        let projection = project_harvest(10.0, 0.0, &constant_climatology(25.0), date(2024, 4, 1));
        assert_eq!(projection.days_elapsed, 0);
        assert_eq!(projection.harvest_date, date(2024, 4, 1));
    }

    #[test]
    fn test_unreachable_target_caps_at_one_year() {
        let start = date(2023, 6, 15);
        let projection = project_harvest(100.0, 1000.0, &constant_climatology(25.0), start);
        assert_eq!(projection.days_elapsed, 365);
        assert_eq!(projection.harvest_date, start + Duration::days(365));
    }

    #[test]
    fn test_missing_days_use_fallback_temperature() {
        // Empty climatology: every day contributes 25 - 10 = 15
        let projection = project_harvest(10.0, 45.0, &Climatology::new(), date(2024, 1, 1));
        assert_eq!(projection.days_elapsed, 3);
    }

    #[test]
    fn test_lookup_wraps_after_day_365() {
        // Only day 1 is warm; starting on Dec 31 of a non-leap year hits day 365 then day 1
        let mut clim: Climatology = (1..=366).map(|doy| (doy, 10.0)).collect();
        clim.insert(1, 30.0);
        let projection = project_harvest(10.0, 20.0, &clim, date(2023, 12, 31));
        assert_eq!(projection.days_elapsed, 2);
    }

    #[test]
    fn test_leap_day_366_reuses_day_one() {
        let mut clim: Climatology = (1..=366).map(|doy| (doy, 10.0)).collect();
        clim.insert(1, 30.0);
        clim.insert(366, 10.0);
        // Dec 31 2024 is day 366, which looks up day 1
        let projection = project_harvest(10.0, 20.0, &clim, date(2024, 12, 31));
        assert_eq!(projection.days_elapsed, 1);
    }
}
