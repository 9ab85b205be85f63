use async_trait::async_trait;
use csv::Writer;
use std::path::Path;

use crate::config::DEFAULT_TEXT_COLUMN;
use crate::error::Result;
use crate::models::FeedbackTable;
use crate::source::provider::TableSource;

pub const SAMPLE_FEEDBACK: [&str; 10] = [
    "EXCELLENT policy implementation! This will significantly improve public services and benefit our community tremendously.",
    "TERRIBLE decision that will negatively impact small businesses and local economy. Very disappointing approach.",
    "Reasonable policy framework with good intentions, though implementation details need more careful planning.",
    "Outstanding work by our government representatives! This initiative addresses critical community needs effectively.",
    "Complete disaster - ignores expert recommendations and will likely create more problems than solutions.",
    "Well-balanced policy approach that considers various stakeholder perspectives and long-term impacts.",
    "Very disappointing policy direction that fails to address the core issues facing our community.",
    "Fantastic initiative demonstrating innovative thinking and strong commitment to public welfare.",
    "Poorly conceived policy framework that lacks proper consultation and risk assessment.",
    "Moderate support for this proposal, though several aspects require further refinement and clarification.",
];

/// Built-in policy feedback for demos.
pub struct SampleSource;

impl SampleSource {
    pub fn table() -> FeedbackTable {
        FeedbackTable::from_texts(DEFAULT_TEXT_COLUMN, SAMPLE_FEEDBACK)
    }
}

#[async_trait]
impl TableSource for SampleSource {
    async fn load(&self) -> Result<FeedbackTable> {
        Ok(Self::table())
    }

    fn name(&self) -> &str {
        "sample"
    }
}

pub fn write_sample_csv<P: AsRef<Path>>(path: P) -> Result<()> {
    let mut writer = Writer::from_path(&path)?;
    writer.write_record([DEFAULT_TEXT_COLUMN])?;
    for text in SAMPLE_FEEDBACK {
        writer.write_record([text])?;
    }
    writer.flush()?;
    tracing::info!("Sample file written to: {}", path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisPipeline;
    use crate::models::SentimentLabel;
    use crate::source::file::CsvFileSource;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_sample_covers_every_label() {
        let table = SampleSource.load().await.unwrap();
        assert_eq!(table.len(), 10);

        let dataset = AnalysisPipeline::default().analyze(&table, "feedback").unwrap();
        for label in SentimentLabel::ALL {
            assert!(
                dataset.summary.count(label) > 0,
                "no {} rows in sample",
                label
            );
        }
    }

    #[tokio::test]
    async fn test_written_sample_reads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("policy_feedback.csv");
        write_sample_csv(&path).unwrap();

        let table = CsvFileSource::new(&path).load().await.unwrap();
        assert_eq!(table, SampleSource::table());
    }
}
