pub mod config;
pub mod error;
pub mod models;
pub mod sentiment;
pub mod analysis;
pub mod source;
pub mod storage;

pub use config::{Config, PipelineConfig, ThresholdVariant, Thresholds};
pub use error::{Error, Result};
pub use sentiment::SentimentScorer;
pub use analysis::AnalysisPipeline;
pub use source::{CsvFileSource, SampleSource, TableSource};
pub use storage::DatasetStore;
