pub mod aggregator;
pub mod distribution;
pub mod pipeline;
pub mod words;

pub use aggregator::{breakdown, label_counts, polarities, summarize};
pub use distribution::cumulative_trend;
pub use pipeline::AnalysisPipeline;
pub use words::{StopwordSet, WordCounter, DEFAULT_STOPWORDS};
