use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::category::AqiCategory;
use super::conditions::{round2, Conditions};

/// Timestamp format used in the `Time` column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Fixed header of the history log.
pub const HISTORY_HEADER: [&str; 8] = [
    "Time",
    "Temperature",
    "Humidity",
    "Wind Speed",
    "AQI",
    "Category",
    "Health Impact",
    "Action",
];

/// One row of `aqi_history.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(rename = "Time", with = "timestamp")]
    pub time: NaiveDateTime,
    #[serde(rename = "Temperature")]
    pub temperature: f64,
    #[serde(rename = "Humidity")]
    pub humidity: f64,
    #[serde(rename = "Wind Speed")]
    pub wind_speed: f64,
    /// Predicted AQI rounded to 2 decimals.
    #[serde(rename = "AQI")]
    pub aqi: f64,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Health Impact")]
    pub health_impact: String,
    #[serde(rename = "Action")]
    pub action: String,
}

impl HistoryRecord {
    /// Build a record from an unrounded prediction. The category is taken
    /// from the raw value; only the stored AQI is rounded.
    pub fn from_prediction(time: NaiveDateTime, conditions: &Conditions, aqi: f64) -> Self {
        let category = AqiCategory::from_aqi(aqi);
        Self {
            time: truncate_to_seconds(time),
            temperature: conditions.temperature,
            humidity: conditions.humidity,
            wind_speed: conditions.wind_speed,
            aqi: round2(aqi),
            category: category.label().to_string(),
            health_impact: category.health_impact().to_string(),
            action: category.action().to_string(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.time.date()
    }
}

fn truncate_to_seconds(time: NaiveDateTime) -> NaiveDateTime {
    use chrono::Timelike;
    time.with_nanosecond(0).unwrap_or(time)
}

mod timestamp {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&time.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
