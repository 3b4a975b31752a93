//! Configuration management for the Agricultural Advisory Server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with AGRO_ prefix

use std::collections::BTreeMap;

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::catalog::{default_catalog, default_zones};
use shared::{
    validate_catalog, validate_coordinates, validate_thresholds, CropCatalog, RiskThresholds,
    Zone, DEFAULT_DROUGHT_THRESHOLD_MM, DEFAULT_RISK_WINDOW_DAYS, DEFAULT_WET_THRESHOLD_MM,
};

use crate::error::{AppError, AppResult};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Weather archive configuration
    pub archive: ArchiveConfig,

    /// Rainfall risk thresholds
    pub risk: RiskConfig,

    /// Crop catalog override
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Zone name -> location. Empty means the built-in zones.
    #[serde(default)]
    pub zones: BTreeMap<String, ZoneConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ArchiveConfig {
    /// Path of the CSV weather archive
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RiskConfig {
    /// Trailing rainfall at or below which a day is a drought day (mm)
    pub drought_mm: f64,

    /// Trailing rainfall at or above which a day is a waterlogging day (mm)
    pub waterlogging_mm: f64,

    /// Trailing window length in days
    pub window_days: u32,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// JSON file with a list of crop profiles
    pub path: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ZoneConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation_m: Option<f64>,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AGRO_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("archive.path", "data/weather_history.csv")?
            .set_default("risk.drought_mm", DEFAULT_DROUGHT_THRESHOLD_MM)?
            .set_default("risk.waterlogging_mm", DEFAULT_WET_THRESHOLD_MM)?
            .set_default("risk.window_days", i64::from(DEFAULT_RISK_WINDOW_DAYS))?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGRO_ prefix)
            .add_source(
                Environment::with_prefix("AGRO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn thresholds(&self) -> RiskThresholds {
        RiskThresholds {
            drought_mm: self.risk.drought_mm,
            waterlogging_mm: self.risk.waterlogging_mm,
            window_days: self.risk.window_days,
        }
    }

    /// Configured zones in name order, or the built-in zones when none are configured
    pub fn zones(&self) -> Vec<Zone> {
        if self.zones.is_empty() {
            return default_zones();
        }
        self.zones
            .iter()
            .map(|(name, zone)| {
                let z = Zone::new(name.clone(), zone.latitude, zone.longitude);
                match zone.elevation_m {
                    Some(elevation) => z.with_elevation(elevation),
                    None => z,
                }
            })
            .collect()
    }

    /// Crop catalog from the configured JSON file, or the built-in catalog
    pub fn load_catalog(&self) -> AppResult<CropCatalog> {
        let Some(path) = &self.catalog.path else {
            return Ok(default_catalog());
        };
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Configuration(format!("Cannot read crop catalog {}: {}", path, e))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            AppError::Configuration(format!("Invalid crop catalog {}: {}", path, e))
        })
    }

    /// Check zones, thresholds and the crop catalog before the server starts
    pub fn validate(&self, catalog: &CropCatalog) -> AppResult<()> {
        for zone in self.zones() {
            validate_coordinates(zone.coordinates.latitude, zone.coordinates.longitude)
                .map_err(|e| AppError::Configuration(format!("Zone {}: {}", zone.name, e)))?;
        }
        validate_thresholds(&self.thresholds())
            .map_err(|e| AppError::Configuration(e.to_string()))?;
        if catalog.is_empty() {
            return Err(AppError::Configuration("Crop catalog is empty".to_string()));
        }
        validate_catalog(catalog).map_err(|e| AppError::Configuration(e.to_string()))?;
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
        }
    }
}

#[cfg(test)]
impl Config {
    /// Built-in zones and catalog, default thresholds, no archive file
    pub fn for_tests() -> Self {
        Config {
            environment: "test".to_string(),
            server: ServerConfig::default(),
            archive: ArchiveConfig {
                path: "missing.csv".to_string(),
            },
            risk: RiskConfig {
                drought_mm: DEFAULT_DROUGHT_THRESHOLD_MM,
                waterlogging_mm: DEFAULT_WET_THRESHOLD_MM,
                window_days: DEFAULT_RISK_WINDOW_DAYS,
            },
            catalog: CatalogConfig::default(),
            zones: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_builtin_zones_and_catalog() {
        let config = Config::for_tests();
        assert_eq!(config.zones().len(), 3);
        let catalog = config.load_catalog().unwrap();
        assert!(config.validate(&catalog).is_ok());
        assert_eq!(config.thresholds(), RiskThresholds::default());
    }

    #[test]
    fn test_invalid_zone_aborts_validation() {
        let mut config = Config::for_tests();
        config.zones.insert(
            "Nowhere".to_string(),
            ZoneConfig {
                latitude: 95.0,
                longitude: 7.0,
                elevation_m: None,
            },
        );
        let catalog = default_catalog();
        assert!(matches!(
            config.validate(&catalog),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn test_inverted_thresholds_abort_validation() {
        let mut config = Config::for_tests();
        config.risk.drought_mm = 200.0;
        assert!(config.validate(&default_catalog()).is_err());
    }

    #[test]
    fn test_missing_catalog_file_is_configuration_error() {
        let mut config = Config::for_tests();
        config.catalog.path = Some("does/not/exist.json".to_string());
        assert!(matches!(config.load_catalog(), Err(AppError::Configuration(_))));
    }
}
