use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::time::Instant;

use crate::analysis::aggregator::{breakdown, label_counts, polarities, summarize};
use crate::analysis::distribution::cumulative_trend;
use crate::analysis::words::WordCounter;
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::models::{
    AnalyzedRow, DashboardData, Dataset, FeedbackTable, PolarityHistogram, SentimentLabel,
    TopWords, WordFrequencyTable,
};
use crate::sentiment::SentimentScorer;

pub struct AnalysisPipeline {
    scorer: SentimentScorer,
    words: WordCounter,
    config: PipelineConfig,
}

impl AnalysisPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            scorer: SentimentScorer::new(config.thresholds),
            words: WordCounter::new(config.stopwords.clone()),
            config,
        }
    }

    pub fn with_scorer(scorer: SentimentScorer, config: PipelineConfig) -> Self {
        Self {
            scorer,
            words: WordCounter::new(config.stopwords.clone()),
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn scorer(&self) -> &SentimentScorer {
        &self.scorer
    }

    pub fn analyze(&self, table: &FeedbackTable, text_column: &str) -> Result<Dataset> {
        self.analyze_at(table, text_column, Utc::now())
    }

    /// Same as [`analyze`](Self::analyze) with a caller-supplied timestamp, so repeated
    /// runs over the same table produce identical datasets.
    pub fn analyze_at(
        &self,
        table: &FeedbackTable,
        text_column: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Dataset> {
        let started = Instant::now();

        let rows = self.score_rows(table, text_column)?;
        let summary = summarize(&rows, timestamp)?;

        tracing::info!(
            total = summary.total_feedback,
            positive = summary.positive_count,
            neutral = summary.neutral_count,
            negative = summary.negative_count,
            avg_polarity = summary.avg_polarity,
            "Analysis complete"
        );
        tracing::debug!("Analyzed {} rows in {:?}", rows.len(), started.elapsed());

        Ok(Dataset {
            source: None,
            columns: table.columns().to_vec(),
            text_column: text_column.to_string(),
            rows,
            summary,
        })
    }

    pub fn score_rows(&self, table: &FeedbackTable, text_column: &str) -> Result<Vec<AnalyzedRow>> {
        table.require_column(text_column)?;
        if table.is_empty() {
            return Err(Error::EmptyDataset);
        }

        if let Some(index) = table.rows().iter().position(|r| r.get(text_column).is_none()) {
            return Err(Error::MalformedRow {
                row: index,
                column: text_column.to_string(),
            });
        }

        let pb = self.progress_bar(table.len() as u64);

        // rows were checked above, so every lookup succeeds
        let rows: Vec<AnalyzedRow> = table
            .rows()
            .par_iter()
            .map(|row| {
                let score = row
                    .get(text_column)
                    .map(|value| self.scorer.score_value(value))
                    .unwrap_or_else(|| self.scorer.score(""));
                pb.inc(1);
                AnalyzedRow::new(row.clone(), score)
            })
            .collect();

        pb.finish_and_clear();
        Ok(rows)
    }

    pub fn top_words(
        &self,
        rows: &[AnalyzedRow],
        text_column: &str,
        label: Option<SentimentLabel>,
    ) -> Result<WordFrequencyTable> {
        self.words
            .top_words(rows, text_column, label, self.config.top_words_k)
    }

    /// Collects everything a renderer needs to draw the dashboard for `dataset`.
    pub fn dashboard(&self, dataset: &Dataset) -> Result<DashboardData> {
        let rows = &dataset.rows;
        let column = dataset.text_column.as_str();

        let series = polarities(rows);
        let histogram =
            PolarityHistogram::from_values(&series, self.config.histogram_bins, self.config.thresholds);

        let top_words = TopWords {
            all: self.top_words(rows, column, None)?,
            positive: self.top_words(rows, column, Some(SentimentLabel::Positive))?,
            neutral: self.top_words(rows, column, Some(SentimentLabel::Neutral))?,
            negative: self.top_words(rows, column, Some(SentimentLabel::Negative))?,
        };

        Ok(DashboardData {
            source: dataset.source.clone(),
            summary: dataset.summary.clone(),
            label_counts: label_counts(rows),
            polarities: series,
            histogram,
            breakdown: breakdown(rows),
            top_words,
            trend: cumulative_trend(rows),
        })
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rows")
            .map(|s| s.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb
    }
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}
