pub mod columns;
pub mod pipeline;

pub use columns::{WeatherField, WEATHER_SYNONYMS};
pub use pipeline::{preprocess_tables, PreprocessPipeline, PreprocessResult, RawTable};
