use serde::{Deserialize, Serialize};
use std::fmt;

/// AQI health-risk band.
///
/// Upper bounds are inclusive: 50 is Good, 50.01 is Moderate. Every `f64`
/// maps to exactly one band; NaN compares false against every bound and
/// lands in [`AqiCategory::Hazardous`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AqiCategory {
    Good,
    Moderate,
    Unhealthy,
    #[serde(rename = "Very Unhealthy")]
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    /// All bands in ascending order of severity.
    pub const ALL: [AqiCategory; 5] = [
        AqiCategory::Good,
        AqiCategory::Moderate,
        AqiCategory::Unhealthy,
        AqiCategory::VeryUnhealthy,
        AqiCategory::Hazardous,
    ];

    pub fn from_aqi(aqi: f64) -> Self {
        if aqi <= 50.0 {
            AqiCategory::Good
        } else if aqi <= 100.0 {
            AqiCategory::Moderate
        } else if aqi <= 200.0 {
            AqiCategory::Unhealthy
        } else if aqi <= 300.0 {
            AqiCategory::VeryUnhealthy
        } else {
            AqiCategory::Hazardous
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }

    /// Parse a label as written to the history log.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    /// Colour marker shown next to the label.
    pub fn indicator(&self) -> &'static str {
        match self {
            AqiCategory::Good => "🟢",
            AqiCategory::Moderate => "🟡",
            AqiCategory::Unhealthy => "🟠",
            AqiCategory::VeryUnhealthy => "🔴",
            AqiCategory::Hazardous => "🟣",
        }
    }

    pub fn health_impact(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Air quality is satisfactory.",
            AqiCategory::Moderate => "Minor discomfort to sensitive groups.",
            AqiCategory::Unhealthy => "Breathing discomfort possible.",
            AqiCategory::VeryUnhealthy => "High risk of respiratory effects.",
            AqiCategory::Hazardous => "Serious health impacts.",
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            AqiCategory::Good => "No action required.",
            AqiCategory::Moderate => "Limit prolonged outdoor activity.",
            AqiCategory::Unhealthy => "Reduce outdoor exposure.",
            AqiCategory::VeryUnhealthy => "Avoid outdoor activity.",
            AqiCategory::Hazardous => "Emergency response required.",
        }
    }

    /// Longer public-health recommendation for authorities.
    pub fn recommendation(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good air quality. No action needed.",
            AqiCategory::Moderate => {
                "Moderate air quality. Sensitive individuals should limit outdoor activity."
            }
            AqiCategory::Unhealthy => {
                "Unhealthy air. Reduce outdoor exposure. Wear masks if needed."
            }
            AqiCategory::VeryUnhealthy => {
                "Very unhealthy air. Avoid outdoor activity. Issue public health alerts."
            }
            AqiCategory::Hazardous => "Hazardous air. Emergency response required.",
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
