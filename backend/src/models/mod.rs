//! Domain types: input conditions, AQI bands, the fitted model and history rows.

pub mod aqi_model;
pub mod category;
pub mod conditions;
pub mod history;

pub use aqi_model::AqiModel;
pub use category::AqiCategory;
pub use conditions::{round2, Conditions, InputBounds, StatusCard, FEATURE_NAMES};
pub use history::{HistoryRecord, HISTORY_HEADER, TIMESTAMP_FORMAT};
