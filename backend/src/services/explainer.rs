use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{round2, AqiModel, FEATURE_NAMES};

/// Direction of a feature's effect on AQI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    Increases,
    Reduces,
}

impl Effect {
    /// Positive weights increase AQI; zero and negative weights reduce it.
    pub fn of(coefficient: f64) -> Self {
        if coefficient > 0.0 {
            Effect::Increases
        } else {
            Effect::Reduces
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Effect::Increases => "increases AQI",
            Effect::Reduces => "reduces AQI",
        }
    }
}

/// One feature's influence statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureInfluence {
    pub feature: String,
    pub effect: Effect,
    /// Coefficient rounded to 2 decimals.
    pub weight: f64,
}

impl fmt::Display for FeatureInfluence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- {}: {} (weight = {:?})",
            self.feature,
            self.effect.describe(),
            self.weight
        )
    }
}

/// Influence of each feature, in feature-matrix order.
pub fn explain(model: &AqiModel) -> Vec<FeatureInfluence> {
    FEATURE_NAMES
        .iter()
        .zip(model.coefficients.iter())
        .map(|(name, &coef)| FeatureInfluence {
            feature: name.to_string(),
            effect: Effect::of(coef),
            weight: round2(coef),
        })
        .collect()
}

/// Header line plus one line per feature.
pub fn render_explanation(model: &AqiModel) -> String {
    let mut lines = vec!["AQI Influence Explanation:".to_string()];
    lines.extend(explain(model).iter().map(ToString::to_string));
    lines.join("\n")
}
