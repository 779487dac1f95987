//! Offline batch job: preprocess, train, explain.
//!
//! Stages run sequentially; the first failing stage aborts the rest.

use std::path::Path;
use tracing::info;

use crate::config::AppConfig;
use crate::error::EcoResult;
use crate::io::artifacts;
use crate::models::AqiModel;
use crate::preprocessing::{PreprocessPipeline, PreprocessResult};
use crate::services::explainer::{explain, render_explanation, FeatureInfluence};
use crate::services::trainer::{Trainer, TrainingReport};

/// Load the persisted model and describe each coefficient.
pub struct Explainer;

impl Explainer {
    pub fn run(model_path: impl AsRef<Path>) -> EcoResult<(AqiModel, Vec<FeatureInfluence>)> {
        let model = artifacts::load_model(model_path)?;
        let influences = explain(&model);
        Ok((model, influences))
    }
}

/// Outcome of a full pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineSummary {
    pub preprocess: PreprocessResult,
    pub training: TrainingReport,
    pub model: AqiModel,
    pub influences: Vec<FeatureInfluence>,
}

pub fn run_pipeline(config: &AppConfig) -> EcoResult<PipelineSummary> {
    println!("Running preprocessing...");
    let preprocess = PreprocessPipeline::new(config.paths.clone()).run()?;
    println!(
        "Preprocessing completed successfully: X_train {:?}, y_train {:?}",
        preprocess.features.shape(),
        preprocess.target.shape()
    );

    println!("Training model...");
    let trainer = Trainer::new(config.paths.clone(), config.training.clone());
    let (_, training) = trainer.run()?;
    println!("{}", training);
    println!("Model saved at: {}", config.paths.model_file().display());

    println!("Explaining AQI...");
    let (model, influences) = Explainer::run(config.paths.model_file())?;
    println!("{}", render_explanation(&model));

    info!(samples = training.n_samples, "Pipeline finished");
    Ok(PipelineSummary {
        preprocess,
        training,
        model,
        influences,
    })
}
