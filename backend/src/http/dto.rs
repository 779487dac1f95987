//! Data Transfer Objects for the HTTP API.
//!
//! Domain types that already derive Serialize/Deserialize are re-exported
//! rather than wrapped.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use crate::models::{Conditions, InputBounds, StatusCard};
pub use crate::services::{FeatureInfluence, HistoryView, PredictionOutcome, TrendPoint};

/// Request body for `POST /v1/predict`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
}

impl From<PredictRequest> for Conditions {
    fn from(req: PredictRequest) -> Self {
        Conditions::new(req.temperature, req.humidity, req.wind_speed)
    }
}

/// Query parameters for `GET /v1/status`. Missing values use slider defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StatusQuery {
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub wind_speed: Option<f64>,
}

impl StatusQuery {
    pub fn conditions(&self) -> Conditions {
        let defaults = Conditions::default();
        Conditions::new(
            self.temperature.unwrap_or(defaults.temperature),
            self.humidity.unwrap_or(defaults.humidity),
            self.wind_speed.unwrap_or(defaults.wind_speed),
        )
    }
}

/// Safety cards response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub conditions: Conditions,
    pub cards: Vec<StatusCard>,
}

/// Query parameters for `GET /v1/history`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HistoryQuery {
    /// Calendar date (YYYY-MM-DD); defaults to the latest record's date
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Model coefficients and influence statements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelResponse {
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    pub influences: Vec<FeatureInfluence>,
}

/// Slider configuration for the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputsResponse {
    pub temperature: InputBounds,
    pub humidity: InputBounds,
    pub wind_speed: InputBounds,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Fitted model artifact the server loaded
    pub model_file: String,
    /// History log location
    pub history_file: String,
}
