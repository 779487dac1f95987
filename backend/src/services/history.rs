//! Append-only prediction history stored as CSV.
//!
//! The log is re-read from disk on every query; nothing is cached. Each
//! append writes one complete line with a single `write_all`, so concurrent
//! writers can interleave rows but not split one.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{EcoError, EcoResult};
use crate::models::{HistoryRecord, HISTORY_HEADER};

/// Handle on the history CSV file.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

fn csv_writer<W: Write>(inner: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(inner)
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with only the header row if it does not exist yet.
    pub fn ensure_exists(&self) -> EcoResult<()> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| EcoError::io(parent, e))?;
            }
        }

        let mut writer = csv_writer(Vec::new());
        writer.write_record(HISTORY_HEADER)?;
        let bytes = writer
            .into_inner()
            .map_err(|e| EcoError::Serialization(e.to_string()))?;
        fs::write(&self.path, bytes).map_err(|e| EcoError::io(&self.path, e))?;

        info!(path = %self.path.display(), "Created history log");
        Ok(())
    }

    /// Append one record.
    pub fn append(&self, record: &HistoryRecord) -> EcoResult<()> {
        self.ensure_exists()?;

        let mut writer = csv_writer(Vec::new());
        writer.serialize(record)?;
        let line = writer
            .into_inner()
            .map_err(|e| EcoError::Serialization(e.to_string()))?;

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| EcoError::io(&self.path, e))?;
        file.write_all(&line).map_err(|e| EcoError::io(&self.path, e))?;

        debug!(aqi = record.aqi, category = %record.category, "Appended history record");
        Ok(())
    }

    /// Every record in file order. A missing file reads as empty.
    pub fn read_all(&self) -> EcoResult<Vec<HistoryRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut rdr = csv::Reader::from_path(&self.path)?;
        let records = rdr.deserialize().collect::<Result<Vec<HistoryRecord>, _>>()?;
        Ok(records)
    }

    /// The whole file as written, for download.
    pub fn raw_csv(&self) -> EcoResult<String> {
        if !self.path.exists() {
            let mut writer = csv_writer(Vec::new());
            writer.write_record(HISTORY_HEADER)?;
            let bytes = writer
                .into_inner()
                .map_err(|e| EcoError::Serialization(e.to_string()))?;
            return String::from_utf8(bytes).map_err(|e| EcoError::Serialization(e.to_string()));
        }
        fs::read_to_string(&self.path).map_err(|e| EcoError::io(&self.path, e))
    }
}

/// One point of the AQI-vs-time chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub time: NaiveDateTime,
    pub aqi: f64,
}

pub fn trend_points(records: &[HistoryRecord]) -> Vec<TrendPoint> {
    records
        .iter()
        .map(|r| TrendPoint {
            time: r.time,
            aqi: r.aqi,
        })
        .collect()
}

/// Date of the last row in the log, the default filter selection.
pub fn latest_date(records: &[HistoryRecord]) -> Option<NaiveDate> {
    records.last().map(HistoryRecord::date)
}

/// Rows whose timestamp falls on `date`.
pub fn filter_by_date(records: &[HistoryRecord], date: NaiveDate) -> Vec<HistoryRecord> {
    records.iter().filter(|r| r.date() == date).cloned().collect()
}

/// Everything the history panel renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryView {
    pub trend: Vec<TrendPoint>,
    pub selected_date: Option<NaiveDate>,
    pub records: Vec<HistoryRecord>,
    pub total_records: usize,
}

impl HistoryView {
    /// Chart over all records plus the rows of `date` (default: latest date).
    pub fn build(records: &[HistoryRecord], date: Option<NaiveDate>) -> Self {
        let selected_date = date.or_else(|| latest_date(records));
        let filtered = selected_date
            .map(|d| filter_by_date(records, d))
            .unwrap_or_default();

        Self {
            trend: trend_points(records),
            selected_date,
            records: filtered,
            total_records: records.len(),
        }
    }
}
