//! Persistence for pipeline artifacts.
//!
//! Arrays are stored with `bincode`, which writes `f64` bit patterns
//! unchanged, so a saved matrix reloads bit-for-bit. The model is stored as
//! pretty JSON so it can be inspected by hand.

use ndarray::{Array1, Array2};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::error::{EcoError, EcoResult};
use crate::models::AqiModel;

/// Create `path`'s parent directories if needed.
fn ensure_parent(path: &Path) -> EcoResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| EcoError::io(parent, e))?;
        }
    }
    Ok(())
}

fn write_bincode<T: Serialize>(path: &Path, value: &T) -> EcoResult<()> {
    ensure_parent(path)?;
    let bytes = bincode::serialize(value)?;
    fs::write(path, bytes).map_err(|e| EcoError::io(path, e))
}

fn read_bincode<T: DeserializeOwned>(path: &Path) -> EcoResult<T> {
    let bytes = fs::read(path).map_err(|e| EcoError::io(path, e))?;
    Ok(bincode::deserialize(&bytes)?)
}

pub fn save_features(path: impl AsRef<Path>, features: &Array2<f64>) -> EcoResult<()> {
    write_bincode(path.as_ref(), features)
}

pub fn load_features(path: impl AsRef<Path>) -> EcoResult<Array2<f64>> {
    let features: Array2<f64> = read_bincode(path.as_ref())?;
    if features.ncols() != 3 {
        return Err(EcoError::Data(format!(
            "Feature matrix at {} has {} columns, expected 3",
            path.as_ref().display(),
            features.ncols()
        )));
    }
    Ok(features)
}

pub fn save_target(path: impl AsRef<Path>, target: &Array1<f64>) -> EcoResult<()> {
    write_bincode(path.as_ref(), target)
}

pub fn load_target(path: impl AsRef<Path>) -> EcoResult<Array1<f64>> {
    read_bincode(path.as_ref())
}

pub fn save_model(path: impl AsRef<Path>, model: &AqiModel) -> EcoResult<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(model)?;
    fs::write(path, json).map_err(|e| EcoError::io(path, e))
}

pub fn load_model(path: impl AsRef<Path>) -> EcoResult<AqiModel> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| EcoError::io(path, e))?;
    Ok(serde_json::from_str(&content)?)
}
