use serde::{Deserialize, Serialize};

use crate::models::{round2, AqiCategory, AqiModel, Conditions};

/// A single AQI prediction with its band and advice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub conditions: Conditions,
    /// Raw model output.
    pub aqi: f64,
    /// `aqi` rounded to 2 decimals, as logged.
    pub aqi_rounded: f64,
    pub category: AqiCategory,
    pub indicator: String,
    pub health_impact: String,
    pub action: String,
    pub recommendation: String,
}

pub fn predict(model: &AqiModel, conditions: &Conditions) -> Prediction {
    let aqi = model.predict(conditions);
    let category = AqiCategory::from_aqi(aqi);

    Prediction {
        conditions: *conditions,
        aqi,
        aqi_rounded: round2(aqi),
        category,
        indicator: category.indicator().to_string(),
        health_impact: category.health_impact().to_string(),
        action: category.action().to_string(),
        recommendation: category.recommendation().to_string(),
    }
}
