//! Application configuration file support.
//!
//! Configuration is read from an `ecoaqi.toml` file. Every field has a
//! default matching the standard `data/` layout, so a missing file is not an
//! error; a file that exists but cannot be parsed is.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EcoError, EcoResult};

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV_VAR: &str = "ECOAQI_CONFIG";

/// Raw station readings file name inside `raw_dir`.
pub const STATIONS_FILE: &str = "ground_stations.csv";
/// Raw weather readings file name inside `raw_dir`.
pub const WEATHER_FILE: &str = "weather_data.csv";
/// Persisted feature matrix file name inside `processed_dir`.
pub const FEATURES_FILE: &str = "X_train.bin";
/// Persisted target vector file name inside `processed_dir`.
pub const TARGET_FILE: &str = "y_train.bin";
/// Persisted model file name inside `model_dir`.
pub const MODEL_FILE: &str = "aqi_model.json";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub paths: PathSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub training: TrainingSettings,
}

/// Filesystem layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PathSettings {
    #[serde(default = "default_raw_dir")]
    pub raw_dir: PathBuf,
    #[serde(default = "default_processed_dir")]
    pub processed_dir: PathBuf,
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,
    #[serde(default = "default_history_file")]
    pub history_file: PathBuf,
}

/// HTTP bind settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Train/test split settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainingSettings {
    #[serde(default = "default_test_fraction")]
    pub test_fraction: f64,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_raw_dir() -> PathBuf {
    PathBuf::from("data/raw")
}

fn default_processed_dir() -> PathBuf {
    PathBuf::from("data/processed")
}

fn default_model_dir() -> PathBuf {
    PathBuf::from("data/processed/model")
}

fn default_history_file() -> PathBuf {
    PathBuf::from("aqi_history.csv")
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_test_fraction() -> f64 {
    0.2
}

fn default_seed() -> u64 {
    42
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            raw_dir: default_raw_dir(),
            processed_dir: default_processed_dir(),
            model_dir: default_model_dir(),
            history_file: default_history_file(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for TrainingSettings {
    fn default() -> Self {
        Self {
            test_fraction: default_test_fraction(),
            seed: default_seed(),
        }
    }
}

impl PathSettings {
    /// Rooted at `root`: `root/raw`, `root/processed`, `root/processed/model`
    /// and `root/aqi_history.csv`.
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            raw_dir: root.join("raw"),
            processed_dir: root.join("processed"),
            model_dir: root.join("processed").join("model"),
            history_file: root.join("aqi_history.csv"),
        }
    }

    pub fn stations_file(&self) -> PathBuf {
        self.raw_dir.join(STATIONS_FILE)
    }

    pub fn weather_file(&self) -> PathBuf {
        self.raw_dir.join(WEATHER_FILE)
    }

    pub fn features_file(&self) -> PathBuf {
        self.processed_dir.join(FEATURES_FILE)
    }

    pub fn target_file(&self) -> PathBuf {
        self.processed_dir.join(TARGET_FILE)
    }

    pub fn model_file(&self) -> PathBuf {
        self.model_dir.join(MODEL_FILE)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns [`EcoError::Configuration`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> EcoResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            EcoError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> EcoResult<Self> {
        toml::from_str(content)
            .map_err(|e| EcoError::Configuration(format!("Failed to parse config file: {}", e)))
    }

    /// Load configuration from the default location.
    ///
    /// Uses `$ECOAQI_CONFIG` when set. Otherwise searches for `ecoaqi.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// Falls back to [`AppConfig::default`] if no file is found.
    pub fn from_default_location() -> EcoResult<Self> {
        if let Ok(explicit) = env::var(CONFIG_ENV_VAR) {
            return Self::from_file(explicit);
        }

        let search_paths = [
            PathBuf::from("ecoaqi.toml"),
            PathBuf::from("backend/ecoaqi.toml"),
            PathBuf::from("../ecoaqi.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                tracing::info!(path = %path.display(), "Loading configuration");
                return Self::from_file(&path);
            }
        }

        tracing::debug!("No ecoaqi.toml found, using default configuration");
        Ok(Self::default())
    }

    /// Apply `HOST` / `PORT` environment overrides to the server section.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }
        if let Some(port) = env::var("PORT").ok().and_then(|s| s.parse().ok()) {
            self.server.port = port;
        }
        self
    }

    /// `host:port` string for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
