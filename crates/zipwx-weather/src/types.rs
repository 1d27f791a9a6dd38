use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::zipcode::ZipCode;

/// Unit system requested from the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    Standard,
}

impl Units {
    /// Value of the `units` query parameter
    pub fn as_query(&self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
            Self::Standard => "standard",
        }
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
            Self::Standard => "K",
        }
    }

    pub fn speed_symbol(&self) -> &'static str {
        match self {
            Self::Imperial => "mph",
            Self::Metric | Self::Standard => "m/s",
        }
    }
}

/// One entry of the `weather` array
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `main` block: temperatures, pressure and humidity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub feels_like: f64,
    pub pressure: f64,
    pub humidity: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Wind {
    #[serde(default)]
    pub speed: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Current weather as returned by the API.
///
/// Fields the panel does not read are kept in `extra` so a stored payload
/// serializes back with everything the API sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub main: MainReadings,
    #[serde(default)]
    pub wind: Wind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WeatherPayload {
    /// Icon code of the primary condition, e.g. `"04d"`
    pub fn icon(&self) -> Option<&str> {
        self.weather
            .first()
            .map(|c| c.icon.as_str())
            .filter(|icon| !icon.is_empty())
    }

    pub fn description(&self) -> Option<&str> {
        self.weather
            .first()
            .map(|c| c.description.as_str())
            .filter(|d| !d.is_empty())
    }
}

/// A registered postal code and its last fetched weather
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub zip_code: ZipCode,
    pub weather: WeatherPayload,
    /// Absent in documents written before fetch times were recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,
}

impl Location {
    pub fn new(zip_code: ZipCode, weather: WeatherPayload) -> Self {
        Self {
            zip_code,
            weather,
            fetched_at: Some(Utc::now()),
        }
    }
}

/// The persisted snapshot of every registered location
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub locations: Vec<Location>,
}

/// Weather client errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("API returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
}
