use linfa::prelude::*;
use linfa_linear::LinearRegression;
use ndarray::{Array1, Array2, ArrayView1, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

use crate::config::{PathSettings, TrainingSettings};
use crate::error::{EcoError, EcoResult};
use crate::io::artifacts;
use crate::models::{AqiModel, FEATURE_NAMES};

/// Rows of the feature matrix and target partitioned into train and test.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub train_x: Array2<f64>,
    pub train_y: Array1<f64>,
    pub test_x: Array2<f64>,
    pub test_y: Array1<f64>,
}

/// Shuffle row indices with a seeded RNG and hold out
/// `ceil(test_fraction * n)` rows for evaluation.
///
/// At least one row always stays in the training set; with fewer than two
/// rows the test set is empty.
pub fn train_test_split(
    features: &Array2<f64>,
    target: &Array1<f64>,
    test_fraction: f64,
    seed: u64,
) -> TrainTestSplit {
    let n = features.nrows();
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = if n < 2 {
        0
    } else {
        ((test_fraction * n as f64).ceil() as usize).clamp(1, n - 1)
    };
    let (test_idx, train_idx) = indices.split_at(n_test);

    TrainTestSplit {
        train_x: features.select(Axis(0), train_idx),
        train_y: target.select(Axis(0), train_idx),
        test_x: features.select(Axis(0), test_idx),
        test_y: target.select(Axis(0), test_idx),
    }
}

pub fn mean_absolute_error(actual: ArrayView1<'_, f64>, predicted: ArrayView1<'_, f64>) -> f64 {
    if actual.is_empty() {
        return f64::NAN;
    }
    actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / actual.len() as f64
}

/// Coefficient of determination. NaN when the actual values have no variance.
pub fn r2_score(actual: ArrayView1<'_, f64>, predicted: ArrayView1<'_, f64>) -> f64 {
    if actual.is_empty() {
        return f64::NAN;
    }
    let mean = actual.sum() / actual.len() as f64;
    let ss_res: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    if ss_tot == 0.0 {
        return f64::NAN;
    }
    1.0 - ss_res / ss_tot
}

/// Held-out evaluation of a fitted model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub mae: f64,
    pub r2: f64,
}

/// Summary of one training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub n_samples: usize,
    pub n_train: usize,
    pub n_test: usize,
    /// `None` when there were too few rows to hold any out.
    pub evaluation: Option<Evaluation>,
}

impl fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model trained successfully")?;
        writeln!(
            f,
            "Samples: {} (train {}, test {})",
            self.n_samples, self.n_train, self.n_test
        )?;
        match self.evaluation {
            Some(eval) => {
                writeln!(f, "MAE: {:.2}", eval.mae)?;
                write!(f, "R² Score: {:.2}", eval.r2)
            }
            None => write!(f, "MAE: n/a\nR² Score: n/a"),
        }
    }
}

/// Fit OLS with an intercept on `features` → `target`.
///
/// Columns with a single repeated value carry no signal once the intercept
/// is fitted; they are left out of the solve and get a coefficient of 0.
pub fn fit_ols(features: &Array2<f64>, target: &Array1<f64>) -> EcoResult<AqiModel> {
    if features.ncols() != FEATURE_NAMES.len() {
        return Err(EcoError::Training(format!(
            "expected {} feature columns, got {}",
            FEATURE_NAMES.len(),
            features.ncols()
        )));
    }

    let varying: Vec<usize> = (0..features.ncols())
        .filter(|&j| !is_constant(features.column(j)))
        .collect();
    for j in (0..features.ncols()).filter(|j| !varying.contains(j)) {
        warn!(feature = FEATURE_NAMES[j], "Constant feature column, coefficient fixed at 0");
    }

    let mut coefficients = [0.0; 3];
    if varying.is_empty() {
        let intercept = target
            .mean()
            .ok_or_else(|| EcoError::Training("no training rows".to_string()))?;
        return Ok(AqiModel::new(coefficients, intercept));
    }

    let dataset = Dataset::new(features.select(Axis(1), &varying), target.clone());
    let fitted = LinearRegression::new()
        .fit(&dataset)
        .map_err(|e| EcoError::Training(e.to_string()))?;

    let params = fitted.params();
    if params.len() != varying.len() {
        return Err(EcoError::Training(format!(
            "expected {} coefficients, solver returned {}",
            varying.len(),
            params.len()
        )));
    }
    for (&j, &p) in varying.iter().zip(params.iter()) {
        coefficients[j] = p;
    }

    Ok(AqiModel::new(coefficients, fitted.intercept()))
}

fn is_constant(column: ArrayView1<'_, f64>) -> bool {
    match column.first() {
        Some(&first) => column.iter().all(|&v| v == first),
        None => true,
    }
}

/// Split, fit and evaluate.
///
/// # Errors
/// [`EcoError::Data`] if `features` has no rows.
pub fn fit_model(
    features: &Array2<f64>,
    target: &Array1<f64>,
    settings: &TrainingSettings,
) -> EcoResult<(AqiModel, TrainingReport)> {
    if features.nrows() == 0 {
        return Err(EcoError::Data(
            "X_train is empty. Cannot train model.".to_string(),
        ));
    }
    if features.nrows() != target.len() {
        return Err(EcoError::Data(format!(
            "X_train has {} rows but y_train has {} values",
            features.nrows(),
            target.len()
        )));
    }

    let split = train_test_split(features, target, settings.test_fraction, settings.seed);
    let model = fit_ols(&split.train_x, &split.train_y)?;

    let evaluation = if split.test_y.is_empty() {
        None
    } else {
        let predicted = model.predict_matrix(split.test_x.view());
        Some(Evaluation {
            mae: mean_absolute_error(split.test_y.view(), predicted.view()),
            r2: r2_score(split.test_y.view(), predicted.view()),
        })
    };

    let report = TrainingReport {
        n_samples: features.nrows(),
        n_train: split.train_y.len(),
        n_test: split.test_y.len(),
        evaluation,
    };

    Ok((model, report))
}

/// Loads the processed arrays, fits the model and persists it.
pub struct Trainer {
    paths: PathSettings,
    settings: TrainingSettings,
}

impl Trainer {
    pub fn new(paths: PathSettings, settings: TrainingSettings) -> Self {
        Self { paths, settings }
    }

    /// Train and overwrite `aqi_model.json`.
    pub fn run(&self) -> EcoResult<(AqiModel, TrainingReport)> {
        let features = artifacts::load_features(self.paths.features_file())?;
        let target = artifacts::load_target(self.paths.target_file())?;
        info!(x = ?features.shape(), y = ?target.shape(), "Loaded data shapes");

        let (model, report) = fit_model(&features, &target, &self.settings)?;

        let model_path = self.paths.model_file();
        artifacts::save_model(&model_path, &model)?;
        info!(path = %model_path.display(), "Model saved");

        Ok((model, report))
    }
}
