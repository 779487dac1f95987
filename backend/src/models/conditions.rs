use serde::{Deserialize, Serialize};

/// Feature names in the fixed column order of the feature matrix.
pub const FEATURE_NAMES: [&str; 3] = ["temperature", "humidity", "wind_speed"];

/// Upper limit for a "SAFE" temperature card, in °C.
pub const SAFE_TEMPERATURE_MAX: f64 = 35.0;
/// Upper limit for a "SAFE" humidity card, in %.
pub const SAFE_HUMIDITY_MAX: f64 = 80.0;
/// Upper limit for a "SAFE" wind card, in m/s.
pub const SAFE_WIND_SPEED_MAX: f64 = 6.0;

/// Slider range for one input. Bounds are only applied by the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputBounds {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

pub const TEMPERATURE_BOUNDS: InputBounds = InputBounds { min: 0.0, max: 50.0, default: 25.0 };
pub const HUMIDITY_BOUNDS: InputBounds = InputBounds { min: 0.0, max: 100.0, default: 60.0 };
pub const WIND_SPEED_BOUNDS: InputBounds = InputBounds { min: 0.0, max: 10.0, default: 2.0 };

/// Environmental conditions entered by the user: the model's three inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    /// °C
    pub temperature: f64,
    /// %
    pub humidity: f64,
    /// m/s
    pub wind_speed: f64,
}

impl Default for Conditions {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE_BOUNDS.default,
            humidity: HUMIDITY_BOUNDS.default,
            wind_speed: WIND_SPEED_BOUNDS.default,
        }
    }
}

impl Conditions {
    pub fn new(temperature: f64, humidity: f64, wind_speed: f64) -> Self {
        Self {
            temperature,
            humidity,
            wind_speed,
        }
    }

    /// Values in [`FEATURE_NAMES`] order.
    pub fn as_features(&self) -> [f64; 3] {
        [self.temperature, self.humidity, self.wind_speed]
    }

    /// Safety cards for temperature, humidity and wind, in that order.
    pub fn status_cards(&self) -> [StatusCard; 3] {
        [
            StatusCard::new("Temperature", self.temperature, "°C", SAFE_TEMPERATURE_MAX),
            StatusCard::new("Humidity", self.humidity, "%", SAFE_HUMIDITY_MAX),
            StatusCard::new("Wind Speed", self.wind_speed, "m/s", SAFE_WIND_SPEED_MAX),
        ]
    }
}

/// Boolean range check for one input, for display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCard {
    pub title: String,
    /// Input value rounded to 2 decimals.
    pub value: f64,
    pub unit: String,
    pub limit: f64,
    pub safe: bool,
    /// "SAFE" or "UNSAFE"
    pub label: String,
}

impl StatusCard {
    pub fn new(title: &str, value: f64, unit: &str, limit: f64) -> Self {
        let safe = value <= limit;
        Self {
            title: title.to_string(),
            value: round2(value),
            unit: unit.to_string(),
            limit,
            safe,
            label: if safe { "SAFE" } else { "UNSAFE" }.to_string(),
        }
    }
}

/// Round half away from zero to 2 decimal places.
///
/// Ties are decided on `value * 100` in binary, so an exact tie such as
/// `0.125` goes up to `0.13` rather than to the even neighbour.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
