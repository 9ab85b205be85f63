pub mod provider;
pub mod file;
pub mod sample;

pub use provider::TableSource;
pub use file::{read_table, write_analyzed_csv, CsvFileSource};
pub use sample::{write_sample_csv, SampleSource};
