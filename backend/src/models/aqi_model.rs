use ndarray::{Array1, ArrayView2};
use serde::{Deserialize, Serialize};

use super::conditions::{Conditions, FEATURE_NAMES};

/// Fitted linear map from (temperature, humidity, wind_speed) to AQI.
///
/// Predictions are not clamped; extreme inputs can produce negative or
/// arbitrarily large values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AqiModel {
    pub feature_names: Vec<String>,
    pub coefficients: [f64; 3],
    pub intercept: f64,
}

impl AqiModel {
    pub fn new(coefficients: [f64; 3], intercept: f64) -> Self {
        Self {
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            coefficients,
            intercept,
        }
    }

    pub fn predict(&self, conditions: &Conditions) -> f64 {
        self.predict_row(&conditions.as_features())
    }

    pub fn predict_row(&self, row: &[f64; 3]) -> f64 {
        self.coefficients
            .iter()
            .zip(row.iter())
            .map(|(c, x)| c * x)
            .sum::<f64>()
            + self.intercept
    }

    /// Predict every row of an N×3 matrix.
    pub fn predict_matrix(&self, features: ArrayView2<'_, f64>) -> Array1<f64> {
        let weights = Array1::from(self.coefficients.to_vec());
        features.dot(&weights) + self.intercept
    }
}
