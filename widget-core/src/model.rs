use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One excuse as served by `/random-excuse` and `/excuse/{category}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcuseRecord {
    /// Category key, e.g. `late_home`.
    pub category: String,
    pub excuse: String,
}

/// Body of `POST /add-excuse`. `category` is already a normalized key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExcuse {
    pub category: String,
    pub excuse: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddExcuseReply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WeatherRequest {
    City(String),
    Coordinates(Coordinates),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub location: String,
    pub country_code: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_ms: f64,
    pub pressure_hpa: u32,
    /// Provider condition group, e.g. `Clear`, `Clouds`, `Rain`.
    pub condition_code: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<DateTime<Utc>>,
}
