//! Column-name matching for the raw sources.
//!
//! Matching is an explicit table plus a first-match scan over normalized
//! header names.

use crate::error::{EcoError, EcoResult};

/// Substring identifying the AQI column of the station source.
pub const AQI_MARKER: &str = "aqi";

/// One of the three model inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherField {
    Temperature,
    Humidity,
    WindSpeed,
}

impl WeatherField {
    /// Feature-matrix column order.
    pub const ORDER: [WeatherField; 3] = [
        WeatherField::Temperature,
        WeatherField::Humidity,
        WeatherField::WindSpeed,
    ];

    pub fn canonical_name(&self) -> &'static str {
        match self {
            WeatherField::Temperature => "temperature",
            WeatherField::Humidity => "humidity",
            WeatherField::WindSpeed => "wind_speed",
        }
    }
}

/// Normalized weather header → canonical field.
pub const WEATHER_SYNONYMS: [(&str, WeatherField); 6] = [
    ("temp", WeatherField::Temperature),
    ("temperature", WeatherField::Temperature),
    ("humidity", WeatherField::Humidity),
    ("wind_speed", WeatherField::WindSpeed),
    ("wind-speed", WeatherField::WindSpeed),
    ("windspeed", WeatherField::WindSpeed),
];

/// Lower-case and trim a header.
pub fn normalize_header(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Index of the first header containing `"aqi"`.
pub fn find_aqi_column(headers: &[String]) -> Option<usize> {
    headers.iter().position(|h| h.contains(AQI_MARKER))
}

fn synonym_for(header: &str) -> Option<WeatherField> {
    WEATHER_SYNONYMS
        .iter()
        .find(|(name, _)| *name == header)
        .map(|(_, field)| *field)
}

/// Column index for each field in [`WeatherField::ORDER`].
///
/// When several headers map to the same field, the leftmost one is used.
///
/// # Errors
/// [`EcoError::Configuration`] naming the fields with no matching header.
pub fn resolve_weather_columns(headers: &[String]) -> EcoResult<[usize; 3]> {
    let mut resolved: [Option<usize>; 3] = [None; 3];

    for (idx, header) in headers.iter().enumerate() {
        if let Some(field) = synonym_for(header) {
            let slot = WeatherField::ORDER
                .iter()
                .position(|f| *f == field)
                .unwrap_or_default();
            resolved[slot].get_or_insert(idx);
        }
    }

    let missing: Vec<&str> = WeatherField::ORDER
        .iter()
        .zip(resolved.iter())
        .filter(|(_, idx)| idx.is_none())
        .map(|(field, _)| field.canonical_name())
        .collect();

    match resolved {
        [Some(t), Some(h), Some(w)] => Ok([t, h, w]),
        _ => Err(EcoError::Configuration(format!(
            "weather_data.csv is missing required column(s): {} (found: {})",
            missing.join(", "),
            headers.join(", ")
        ))),
    }
}

/// Coerce a cell to a number; empty, non-numeric and NaN cells are `None`.
pub fn parse_numeric(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}
