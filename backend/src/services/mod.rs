//! Service layer: training, explanation, prediction and history.
//!
//! These services sit between the persisted artifacts and the HTTP / batch
//! entry points.

pub mod dashboard;
pub mod explainer;
pub mod history;
pub mod pipeline;
pub mod predictor;
pub mod trainer;


pub use dashboard::{DashboardService, PredictionOutcome};
pub use explainer::{explain, render_explanation, Effect, FeatureInfluence};
pub use history::{HistoryLog, HistoryView, TrendPoint};
pub use pipeline::{run_pipeline, Explainer, PipelineSummary};
pub use predictor::{predict, Prediction};
pub use trainer::{fit_model, Trainer, TrainingReport};
