//! Dashboard service: the fitted model plus the history log.
//!
//! The model is loaded once when the service is built and shared read-only.
//! History is written through [`DashboardService::record_prediction`] and
//! re-read from disk by every query.

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::config::PathSettings;
use crate::error::EcoResult;
use crate::io::artifacts;
use crate::models::{AqiModel, Conditions, HistoryRecord, StatusCard};
use crate::services::explainer::{explain, FeatureInfluence};
use crate::services::history::{HistoryLog, HistoryView};
use crate::services::predictor::{predict, Prediction};

/// A prediction together with the row it appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutcome {
    pub prediction: Prediction,
    pub record: HistoryRecord,
}

#[derive(Clone)]
pub struct DashboardService {
    model: Arc<AqiModel>,
    model_path: PathBuf,
    history: HistoryLog,
}

impl DashboardService {
    pub fn new(model: AqiModel, model_path: impl Into<PathBuf>, history: HistoryLog) -> Self {
        Self {
            model: Arc::new(model),
            model_path: model_path.into(),
            history,
        }
    }

    /// Load the model and make sure the history file exists.
    ///
    /// # Errors
    /// Fails if the model artifact is missing or unreadable.
    pub fn load(paths: &PathSettings) -> EcoResult<Self> {
        Self::load_from(paths.model_file(), &paths.history_file)
    }

    pub fn load_from(model_path: impl AsRef<Path>, history_path: impl AsRef<Path>) -> EcoResult<Self> {
        let model = artifacts::load_model(model_path.as_ref())?;
        info!(
            path = %model_path.as_ref().display(),
            coefficients = ?model.coefficients,
            intercept = model.intercept,
            "Model loaded"
        );

        let history = HistoryLog::new(history_path.as_ref());
        history.ensure_exists()?;

        Ok(Self::new(model, model_path.as_ref(), history))
    }

    pub fn model(&self) -> &AqiModel {
        &self.model
    }

    /// Where the model was loaded from.
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn status(&self, conditions: &Conditions) -> [StatusCard; 3] {
        conditions.status_cards()
    }

    /// Predict without touching the log.
    pub fn predict(&self, conditions: &Conditions) -> Prediction {
        predict(&self.model, conditions)
    }

    /// Predict and append the result to the history log, stamped with `time`.
    pub fn record_prediction(
        &self,
        conditions: &Conditions,
        time: NaiveDateTime,
    ) -> EcoResult<PredictionOutcome> {
        let prediction = self.predict(conditions);
        let record = HistoryRecord::from_prediction(time, conditions, prediction.aqi);
        self.history.append(&record)?;

        info!(
            aqi = record.aqi,
            category = %record.category,
            "Prediction recorded"
        );
        Ok(PredictionOutcome { prediction, record })
    }

    /// [`record_prediction`](Self::record_prediction) at the current local time.
    pub fn predict_now(&self, conditions: &Conditions) -> EcoResult<PredictionOutcome> {
        self.record_prediction(conditions, Local::now().naive_local())
    }

    pub fn history_view(&self, date: Option<NaiveDate>) -> EcoResult<HistoryView> {
        let records = self.history.read_all()?;
        Ok(HistoryView::build(&records, date))
    }

    pub fn export_csv(&self) -> EcoResult<String> {
        self.history.raw_csv()
    }

    pub fn explanation(&self) -> Vec<FeatureInfluence> {
        explain(&self.model)
    }
}
