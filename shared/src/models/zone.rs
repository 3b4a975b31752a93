//! Agricultural zone models

use serde::{Deserialize, Serialize};

use crate::types::GpsCoordinates;

/// A named agricultural zone with its location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Zone {
    pub name: String,
    pub coordinates: GpsCoordinates,
    /// Elevation above sea level in metres
    pub elevation_m: Option<f64>,
}

impl Zone {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            coordinates: GpsCoordinates::new(latitude, longitude),
            elevation_m: None,
        }
    }

    pub fn with_elevation(mut self, elevation_m: f64) -> Self {
        self.elevation_m = Some(elevation_m);
        self
    }
}
