use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::row::FeedbackRow;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
}

impl SentimentLabel {
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
    ];

    pub fn sentiment(&self) -> i8 {
        match self {
            SentimentLabel::Positive => 1,
            SentimentLabel::Neutral => 0,
            SentimentLabel::Negative => -1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub polarity: f64,
    pub subjectivity: f64,
    pub label: SentimentLabel,
    pub sentiment: i8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedRow {
    #[serde(flatten)]
    pub row: FeedbackRow,
    pub sentiment: i8,
    pub sentiment_label: SentimentLabel,
    pub polarity: f64,
    pub subjectivity: f64,
}

impl AnalyzedRow {
    pub fn new(row: FeedbackRow, score: SentimentScore) -> Self {
        Self {
            row,
            sentiment: score.sentiment,
            sentiment_label: score.label,
            polarity: score.polarity,
            subjectivity: score.subjectivity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_feedback: usize,
    pub positive_count: usize,
    pub neutral_count: usize,
    pub negative_count: usize,
    pub positive_percentage: f64,
    pub neutral_percentage: f64,
    pub negative_percentage: f64,
    pub avg_polarity: f64,
    pub avg_subjectivity: f64,
    pub analysis_timestamp: DateTime<Utc>,
}

impl AnalysisSummary {
    pub fn count(&self, label: SentimentLabel) -> usize {
        match label {
            SentimentLabel::Positive => self.positive_count,
            SentimentLabel::Neutral => self.neutral_count,
            SentimentLabel::Negative => self.negative_count,
        }
    }

    pub fn percentage(&self, label: SentimentLabel) -> f64 {
        match label {
            SentimentLabel::Positive => self.positive_percentage,
            SentimentLabel::Neutral => self.neutral_percentage,
            SentimentLabel::Negative => self.negative_percentage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelStats {
    pub label: SentimentLabel,
    pub count: usize,
    pub polarity_mean: f64,
    pub polarity_std: f64,
    pub subjectivity_mean: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordFrequencyTable {
    pub label: Option<SentimentLabel>,
    pub words: Vec<WordCount>,
}

impl WordFrequencyTable {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn pairs(&self) -> Vec<(&str, usize)> {
        self.words.iter().map(|w| (w.word.as_str(), w.count)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarityHistogram {
    pub bins: Vec<HistogramBin>,
    pub positive_threshold: f64,
    pub negative_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub index: usize,
    pub cumulative_positive: usize,
    pub cumulative_negative: usize,
}

/// Analyzed rows together with the summary computed over them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub source: Option<String>,
    pub columns: Vec<String>,
    pub text_column: String,
    pub rows: Vec<AnalyzedRow>,
    pub summary: AnalysisSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopWords {
    pub all: WordFrequencyTable,
    pub positive: WordFrequencyTable,
    pub neutral: WordFrequencyTable,
    pub negative: WordFrequencyTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub source: Option<String>,
    pub summary: AnalysisSummary,
    pub label_counts: Vec<(SentimentLabel, usize)>,
    pub polarities: Vec<f64>,
    pub histogram: PolarityHistogram,
    pub breakdown: Vec<LabelStats>,
    pub top_words: TopWords,
    pub trend: Vec<TrendPoint>,
}
