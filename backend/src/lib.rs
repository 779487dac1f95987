//! # EcoAQI
//!
//! Air-quality prediction dashboard backed by a linear model.
//!
//! The crate has two entry points sharing one library:
//!
//! - `ecoaqi-pipeline`: offline batch job that cleans the raw station and
//!   weather CSVs, fits an ordinary least-squares model mapping
//!   temperature / humidity / wind speed to AQI, and prints each feature's
//!   influence.
//! - `ecoaqi-server`: axum server for the interactive dashboard. It predicts
//!   AQI for user-entered conditions, appends every prediction to a CSV
//!   history log and serves the log back as a trend chart, a date-filtered
//!   table and a download.
//!
//! ## Architecture
//!
//! - [`preprocessing`]: column matching, cleaning and positional alignment
//! - [`io`]: persisted arrays and model
//! - [`models`]: domain types (conditions, AQI bands, model, history rows)
//! - [`services`]: trainer, explainer, predictor, history log, dashboard
//! - [`http`]: axum router and handlers
//! - [`config`]: TOML / environment configuration

pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod preprocessing;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

pub use error::{EcoError, EcoResult};
