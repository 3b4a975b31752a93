//! Weather archive loading
//!
//! Reads the CSV archive written by the data collector, coerces malformed
//! numbers to missing values and collapses each zone's observations into a
//! daily series once at startup.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use shared::analytics::aggregate_daily;
use shared::{DailyAggregate, WeatherObservation};

use crate::error::{AppError, AppResult};

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// One archive row as written by the collector; every field is read as text
#[derive(Debug, Deserialize)]
struct ArchiveRow {
    #[serde(rename = "Timestamp", default)]
    timestamp: Option<String>,
    #[serde(rename = "Zone", default)]
    zone: Option<String>,
    #[serde(rename = "T_current", default)]
    t_current: Option<String>,
    #[serde(rename = "T_min", default)]
    t_min: Option<String>,
    #[serde(rename = "T_max", default)]
    t_max: Option<String>,
    #[serde(rename = "Feels_Like", default)]
    feels_like: Option<String>,
    #[serde(rename = "Humidity", default)]
    humidity: Option<String>,
    #[serde(rename = "Pressure", default)]
    pressure: Option<String>,
    #[serde(rename = "Wind_Speed", default)]
    wind_speed: Option<String>,
    #[serde(rename = "Wind_Direction", default)]
    wind_direction: Option<String>,
    #[serde(rename = "Cloudiness", default)]
    cloudiness: Option<String>,
    #[serde(rename = "Precipitation_1h", default)]
    precipitation_1h: Option<String>,
    #[serde(rename = "Precipitation_3h", default)]
    precipitation_3h: Option<String>,
    #[serde(rename = "Weather_Condition", default)]
    condition: Option<String>,
    #[serde(rename = "Weather_Description", default)]
    description: Option<String>,
}

/// Row counts from one archive load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub rows: usize,
    pub kept: usize,
    pub bad_timestamp: usize,
    pub missing_zone: usize,
    pub missing_temperature: usize,
    /// Rows the CSV layer could not map onto the archive columns
    pub malformed: usize,
    /// Cells holding bytes that are not UTF-8, read as missing
    pub undecodable_fields: usize,
}

/// Parse an archive timestamp; RFC 3339 values are converted to naive UTC
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|ts| ts.naive_utc())
        })
}

/// Parse a numeric field; empty, malformed and non-finite values are missing
pub fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Decode a raw record field by field; undecodable bytes become empty cells
fn decode_record(raw: &csv::ByteRecord, summary: &mut LoadSummary) -> csv::StringRecord {
    raw.iter()
        .map(|field| {
            std::str::from_utf8(field).unwrap_or_else(|_| {
                summary.undecodable_fields += 1;
                ""
            })
        })
        .collect()
}

/// Read every usable observation from CSV input
pub fn read_observations<R: Read>(
    reader: R,
) -> AppResult<(Vec<WeatherObservation>, LoadSummary)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| AppError::Archive(format!("CSV header error: {}", e)))?
        .clone();

    let mut summary = LoadSummary::default();
    let mut observations = Vec::new();

    for result in csv_reader.byte_records() {
        let raw = result.map_err(|e| AppError::Archive(format!("CSV parse error: {}", e)))?;
        summary.rows += 1;

        let record = decode_record(&raw, &mut summary);
        let row: ArchiveRow = match record.deserialize(Some(&headers)) {
            Ok(row) => row,
            Err(e) => {
                tracing::debug!("Skipping malformed archive row {}: {}", summary.rows, e);
                summary.malformed += 1;
                continue;
            }
        };

        let Some(timestamp) = row.timestamp.as_deref().and_then(parse_timestamp) else {
            summary.bad_timestamp += 1;
            continue;
        };
        let Some(zone) = non_empty(row.zone) else {
            summary.missing_zone += 1;
            continue;
        };

        let mut obs = WeatherObservation::new(zone, timestamp);
        obs.temp_min = parse_number(row.t_min.as_deref());
        obs.temp_max = parse_number(row.t_max.as_deref());
        if !obs.has_temperature_range() {
            summary.missing_temperature += 1;
            continue;
        }
        obs.temp_current = parse_number(row.t_current.as_deref());
        obs.feels_like = parse_number(row.feels_like.as_deref());
        obs.humidity = parse_number(row.humidity.as_deref());
        obs.pressure = parse_number(row.pressure.as_deref());
        obs.wind_speed = parse_number(row.wind_speed.as_deref());
        obs.wind_direction = parse_number(row.wind_direction.as_deref());
        obs.cloudiness = parse_number(row.cloudiness.as_deref());
        obs.precipitation_1h = parse_number(row.precipitation_1h.as_deref());
        obs.precipitation_3h = parse_number(row.precipitation_3h.as_deref());
        obs.condition = non_empty(row.condition);
        obs.description = non_empty(row.description);

        summary.kept += 1;
        observations.push(obs);
    }

    Ok((observations, summary))
}

/// Daily series of one zone
#[derive(Debug, Clone, Default)]
pub struct ZoneSeries {
    pub observation_count: usize,
    pub daily: Vec<DailyAggregate>,
}

/// All zones' daily series, keyed case-insensitively by zone name
#[derive(Debug, Clone, Default)]
pub struct WeatherArchive {
    zones: HashMap<String, ZoneSeries>,
}

impl WeatherArchive {
    /// Load the archive file. A missing file yields an empty archive.
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!("Weather archive {} not found, starting empty", path.display());
            return Ok(Self::default());
        }
        let file = std::fs::File::open(path).map_err(|e| {
            AppError::Archive(format!("Cannot open {}: {}", path.display(), e))
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> AppResult<Self> {
        let (observations, summary) = read_observations(reader)?;
        tracing::info!(
            rows = summary.rows,
            kept = summary.kept,
            bad_timestamp = summary.bad_timestamp,
            missing_zone = summary.missing_zone,
            missing_temperature = summary.missing_temperature,
            malformed = summary.malformed,
            undecodable_fields = summary.undecodable_fields,
            "Weather archive read"
        );
        Ok(Self::from_observations(observations))
    }

    pub fn from_observations(observations: Vec<WeatherObservation>) -> Self {
        let mut grouped: HashMap<String, Vec<WeatherObservation>> = HashMap::new();
        for obs in observations {
            grouped.entry(obs.zone.to_lowercase()).or_default().push(obs);
        }

        let zones = grouped
            .into_iter()
            .map(|(key, mut observations)| {
                // Stable, so equal timestamps keep file order for last-write-wins
                observations.sort_by_key(|o| o.timestamp);
                let daily = aggregate_daily(&observations);
                tracing::debug!(zone = %key, days = daily.len(), "Zone aggregated");
                let series = ZoneSeries {
                    observation_count: observations.len(),
                    daily,
                };
                (key, series)
            })
            .collect();

        Self { zones }
    }

    /// Daily series of a zone; empty when the archive has no data for it
    pub fn daily(&self, zone: &str) -> &[DailyAggregate] {
        self.zones
            .get(&zone.to_lowercase())
            .map(|s| s.daily.as_slice())
            .unwrap_or(&[])
    }

    pub fn observation_count(&self, zone: &str) -> usize {
        self.zones
            .get(&zone.to_lowercase())
            .map_or(0, |s| s.observation_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    const HEADER: &str = "Timestamp,Zone,T_current,T_min,T_max,Feels_Like,Humidity,Pressure,Wind_Speed,Wind_Direction,Cloudiness,Precipitation_1h,Precipitation_3h,Weather_Condition,Weather_Description";

    fn csv(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2024-05-01 12:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01T12:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01T13:00:00+01:00"), Some(expected));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_parse_number_coerces_garbage_to_missing() {
        assert_eq!(parse_number(Some(" 3.5 ")), Some(3.5));
        assert_eq!(parse_number(Some("")), None);
        assert_eq!(parse_number(Some("n/a")), None);
        assert_eq!(parse_number(Some("NaN")), None);
        assert_eq!(parse_number(None), None);
    }

    #[test]
    fn test_read_observations_drops_unusable_rows() {
        let data = csv(&[
            "2024-05-01 06:00:00,Aba,24,22,27,25,80,1012,2.1,180,75,1.5,,Rain,light rain",
            "2024-05-01 12:00:00,Aba,30,abc,31,33,60,1010,3.0,200,40,,,Clouds,",
            "not a date,Aba,30,22,31,33,60,1010,3.0,200,40,0,0,Clear,clear sky",
            "2024-05-01 18:00:00,Aba,28,,,30,70,1011,1.0,90,20,0,0,Clear,clear sky",
        ]);
        let (observations, summary) = read_observations(data.as_bytes()).unwrap();
        assert_eq!(
            summary,
            LoadSummary {
                rows: 4,
                kept: 2,
                bad_timestamp: 1,
                missing_zone: 0,
                missing_temperature: 1,
                malformed: 0,
                undecodable_fields: 0,
            }
        );
        assert_eq!(observations[0].precipitation_1h, Some(1.5));
        assert_eq!(observations[0].condition.as_deref(), Some("Rain"));
        assert_eq!(observations[1].temp_min, None);
        assert_eq!(observations[1].temp_max, Some(31.0));
        assert_eq!(observations[1].description, None);
    }

    #[test]
    fn test_non_utf8_cell_reads_as_missing() {
        let mut data =
            csv(&["2024-05-01 06:00:00,Aba,24,22,27,25,80,1012,2.1,180,75,1.5,,Rain,light rain"])
                .into_bytes();
        data.extend_from_slice(b"\n2024-05-01 12:00:00,Aba,30,21,31,33,8\xff0,1010,3.0,200,40,0,,Clouds,");
        data.extend_from_slice(b"\n2024-05-01 18:00:00,Aba,28,20,29,30,70,1011,1.0,90,20,0,0,Clear,clear sky");

        let (observations, summary) = read_observations(data.as_slice()).unwrap();
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.kept, 3);
        assert_eq!(summary.undecodable_fields, 1);
        assert_eq!(observations[1].humidity, None);
        assert_eq!(observations[1].temp_max, Some(31.0));
        assert_eq!(observations[1].pressure, Some(1010.0));

        let archive = WeatherArchive::from_reader(data.as_slice()).unwrap();
        assert_eq!(archive.daily("Aba").len(), 1);
    }

    #[test]
    fn test_archive_groups_by_zone_case_insensitively() {
        let data = csv(&[
            "2024-05-02 06:00:00,Aba,24,22,27,,,,,,,0,,,",
            "2024-05-01 06:00:00,Aba,24,21,28,,,,,,,2,,,",
            "2024-05-01 06:00:00,Bende,24,20,26,,,,,,,0,,,",
        ]);
        let archive = WeatherArchive::from_reader(data.as_bytes()).unwrap();
        assert_eq!(archive.observation_count("aba"), 2);
        let daily = archive.daily("ABA");
        assert_eq!(daily.len(), 2);
        assert!(daily[0].date < daily[1].date);
        assert_eq!(archive.daily("Umuahia").len(), 0);
    }

    #[test]
    fn test_missing_file_is_empty_archive() {
        let archive = WeatherArchive::load("definitely/not/here.csv").unwrap();
        assert!(archive.daily("Aba").is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Any text parses to a finite number or to missing, never a panic
        #[test]
        fn prop_parse_number_is_finite_or_missing(raw in ".{0,12}") {
            if let Some(v) = parse_number(Some(&raw)) {
                prop_assert!(v.is_finite());
            }
        }

        /// Well-formed numbers survive surrounding whitespace
        #[test]
        fn prop_parse_number_round_trips(v in -1000.0f64..1000.0) {
            prop_assert_eq!(parse_number(Some(&format!("  {}  ", v))), Some(v));
        }
    }
}
