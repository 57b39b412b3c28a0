use serde::{Deserialize, Serialize};

pub const DEFAULT_LATITUDE: f64 = 41.6734;
pub const DEFAULT_LONGITUDE: f64 = -91.75705;

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn from_coords(lat: f64, lon: f64) -> Self {
        Self {
            name: format!("{lat:.4}, {lon:.4}"),
            latitude: lat,
            longitude: lon,
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::from_coords(DEFAULT_LATITUDE, DEFAULT_LONGITUDE)
    }
}

/// Current conditions as reported by the provider, in US units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// °F
    pub temperature: f64,
    /// Fraction of sky covered, `[0, 1]`.
    pub cloud_cover: f64,
    /// Inches per hour.
    pub precip_intensity: f64,
    /// mph
    pub wind_speed: f64,
}
