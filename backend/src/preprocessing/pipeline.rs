use ndarray::{Array1, Array2};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::config::PathSettings;
use crate::error::{EcoError, EcoResult};
use crate::io::artifacts;
use crate::preprocessing::columns::{
    find_aqi_column, normalize_header, parse_numeric, resolve_weather_columns,
};

/// A raw CSV source: normalized headers plus untyped rows.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<csv::StringRecord>,
}

impl RawTable {
    /// Parse CSV text. Rows may be ragged; a short row reads as missing cells.
    pub fn from_reader<R: Read>(reader: R) -> EcoResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.iter().map(normalize_header).collect();
        let rows = rdr.records().collect::<Result<Vec<_>, _>>()?;

        Ok(Self { headers, rows })
    }

    pub fn from_path(path: &Path) -> EcoResult<Self> {
        let file = File::open(path).map_err(|e| EcoError::io(path, e))?;
        Self::from_reader(file)
    }

    fn cell(&self, row: &csv::StringRecord, idx: usize) -> Option<f64> {
        row.get(idx).and_then(parse_numeric)
    }
}

/// Output of preprocessing: aligned features and target.
#[derive(Debug, Clone)]
pub struct PreprocessResult {
    /// N×3, columns temperature / humidity / wind_speed.
    pub features: Array2<f64>,
    /// Length N.
    pub target: Array1<f64>,
    /// Normalized name of the station column used as target.
    pub aqi_column: String,
    /// Usable station rows before alignment.
    pub station_rows: usize,
    /// Usable weather rows before alignment.
    pub weather_rows: usize,
}

impl PreprocessResult {
    pub fn len(&self) -> usize {
        self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }
}

/// AQI values of the first `aqi`-named column, non-numeric entries dropped.
pub fn extract_aqi(stations: &RawTable) -> EcoResult<(String, Vec<f64>)> {
    let idx = find_aqi_column(&stations.headers).ok_or_else(|| {
        EcoError::Configuration(format!(
            "No AQI column found in ground_stations.csv (columns: {})",
            stations.headers.join(", ")
        ))
    })?;

    let values = stations
        .rows
        .iter()
        .filter_map(|row| stations.cell(row, idx))
        .collect();

    Ok((stations.headers[idx].clone(), values))
}

/// (temperature, humidity, wind_speed) rows with no missing field.
pub fn extract_weather(weather: &RawTable) -> EcoResult<Vec<[f64; 3]>> {
    let [t, h, w] = resolve_weather_columns(&weather.headers)?;

    Ok(weather
        .rows
        .iter()
        .filter_map(|row| {
            Some([
                weather.cell(row, t)?,
                weather.cell(row, h)?,
                weather.cell(row, w)?,
            ])
        })
        .collect())
}

/// Clean both sources independently, then truncate both to the shorter one.
///
/// Alignment is positional: row `i` of the station source is paired with
/// row `i` of the weather source after cleaning. There is no join key.
pub fn preprocess_tables(stations: &RawTable, weather: &RawTable) -> EcoResult<PreprocessResult> {
    let (aqi_column, aqi) = extract_aqi(stations)?;
    let readings = extract_weather(weather)?;

    let station_rows = aqi.len();
    let weather_rows = readings.len();
    let n = station_rows.min(weather_rows);

    let flat: Vec<f64> = readings[..n].iter().flatten().copied().collect();
    let features = Array2::from_shape_vec((n, 3), flat)
        .map_err(|e| EcoError::Data(format!("Failed to build feature matrix: {}", e)))?;
    let target = Array1::from(aqi[..n].to_vec());

    Ok(PreprocessResult {
        features,
        target,
        aqi_column,
        station_rows,
        weather_rows,
    })
}

/// Reads the raw sources, builds the feature matrix and persists it.
pub struct PreprocessPipeline {
    paths: PathSettings,
}

impl PreprocessPipeline {
    pub fn new(paths: PathSettings) -> Self {
        Self { paths }
    }

    /// Run preprocessing and overwrite `X_train.bin` / `y_train.bin`.
    pub fn run(&self) -> EcoResult<PreprocessResult> {
        let stations = RawTable::from_path(&self.paths.stations_file())?;
        let weather = RawTable::from_path(&self.paths.weather_file())?;
        info!(columns = ?stations.headers, "AQI columns");
        info!(columns = ?weather.headers, "Weather columns");

        let result = preprocess_tables(&stations, &weather)?;

        artifacts::save_features(self.paths.features_file(), &result.features)?;
        artifacts::save_target(self.paths.target_file(), &result.target)?;

        info!(
            aqi_column = %result.aqi_column,
            station_rows = result.station_rows,
            weather_rows = result.weather_rows,
            "Preprocessing completed successfully"
        );
        info!(shape = ?result.features.shape(), "X_train shape");
        info!(shape = ?result.target.shape(), "y_train shape");

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(csv: &str) -> RawTable {
        RawTable::from_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_headers_are_normalized() {
        let t = table(" Station , PM2.5 AQI \nA,12\n");
        assert_eq!(t.headers, vec!["station", "pm2.5 aqi"]);
        assert_eq!(t.rows.len(), 1);
    }

    #[test]
    fn test_extract_aqi_drops_non_numeric() {
        let t = table("station,AQI\nA,10\nB,n/a\nC,\nD,30.5\nE,NaN\n");
        let (col, values) = extract_aqi(&t).unwrap();
        assert_eq!(col, "aqi");
        assert_eq!(values, vec![10.0, 30.5]);
    }

    #[test]
    fn test_extract_aqi_requires_column() {
        let t = table("station,pm25\nA,10\n");
        let err = extract_aqi(&t).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("No AQI column"));
    }

    #[test]
    fn test_extract_weather_drops_incomplete_rows() {
        let t = table("Temp,Humidity,WindSpeed,city\n20,50,1,x\n21,,2,y\n22,55\nabc,60,3,z\n23,65,4,w\n");
        let rows = extract_weather(&t).unwrap();
        assert_eq!(rows, vec![[20.0, 50.0, 1.0], [23.0, 65.0, 4.0]]);
    }

    #[test]
    fn test_alignment_truncates_to_shorter_side() {
        let stations = table("aqi\n10\n20\n30\n40\n");
        let weather = table("temperature,humidity,wind_speed\n1,2,3\n4,5,6\n");
        let result = preprocess_tables(&stations, &weather).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result.features.shape(), &[2, 3]);
        assert_eq!(result.target.to_vec(), vec![10.0, 20.0]);
        assert_eq!(result.features.row(1).to_vec(), vec![4.0, 5.0, 6.0]);
        assert_eq!(result.station_rows, 4);
        assert_eq!(result.weather_rows, 2);
    }

    #[test]
    fn test_cleaning_happens_before_alignment() {
        // 3 usable station rows, 3 usable weather rows, each side dropping
        // different positions: pairing is by cleaned position
        let stations = table("aqi\n10\nbad\n20\n30\n");
        let weather = table("temp,humidity,wind_speed\n1,1,1\n2,,2\n3,3,3\n4,4,4\n");
        let result = preprocess_tables(&stations, &weather).unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(result.target.to_vec(), vec![10.0, 20.0, 30.0]);
        assert_eq!(result.features.column(0).to_vec(), vec![1.0, 3.0, 4.0]);
    }

    #[test]
    fn test_empty_sources_give_empty_result() {
        let stations = table("aqi\nx\n");
        let weather = table("temp,humidity,wind_speed\n1,2,3\n");
        let result = preprocess_tables(&stations, &weather).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.features.shape(), &[0, 3]);
    }
}
