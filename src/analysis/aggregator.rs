use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::models::{AnalysisSummary, AnalyzedRow, LabelStats, SentimentLabel};

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[derive(Debug, Default, Clone, Copy)]
struct Partial {
    positive: usize,
    neutral: usize,
    negative: usize,
    polarity_sum: f64,
    subjectivity_sum: f64,
}

impl Partial {
    fn add(mut self, row: &AnalyzedRow) -> Self {
        match row.sentiment_label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Neutral => self.neutral += 1,
            SentimentLabel::Negative => self.negative += 1,
        }
        self.polarity_sum += row.polarity;
        self.subjectivity_sum += row.subjectivity;
        self
    }
}

pub fn summarize(rows: &[AnalyzedRow], timestamp: DateTime<Utc>) -> Result<AnalysisSummary> {
    if rows.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let totals = rows.iter().fold(Partial::default(), Partial::add);
    let total = rows.len();
    let percentage = |count: usize| round_to(100.0 * count as f64 / total as f64, 2);

    Ok(AnalysisSummary {
        total_feedback: total,
        positive_count: totals.positive,
        neutral_count: totals.neutral,
        negative_count: totals.negative,
        positive_percentage: percentage(totals.positive),
        neutral_percentage: percentage(totals.neutral),
        negative_percentage: percentage(totals.negative),
        avg_polarity: round_to(totals.polarity_sum / total as f64, 3),
        avg_subjectivity: round_to(totals.subjectivity_sum / total as f64, 3),
        analysis_timestamp: timestamp,
    })
}

/// Per-label polarity mean/std and subjectivity mean, ordered by label name.
/// Standard deviation is the sample deviation; a single-row group reports 0.
pub fn breakdown(rows: &[AnalyzedRow]) -> Vec<LabelStats> {
    let mut groups: BTreeMap<&str, (SentimentLabel, Vec<&AnalyzedRow>)> = BTreeMap::new();
    for row in rows {
        groups
            .entry(row.sentiment_label.as_str())
            .or_insert_with(|| (row.sentiment_label, Vec::new()))
            .1
            .push(row);
    }

    groups
        .into_values()
        .map(|(label, members)| {
            let n = members.len() as f64;
            let polarity_mean = members.iter().map(|r| r.polarity).sum::<f64>() / n;
            let subjectivity_mean = members.iter().map(|r| r.subjectivity).sum::<f64>() / n;

            let polarity_std = if members.len() < 2 {
                0.0
            } else {
                let variance = members
                    .iter()
                    .map(|r| (r.polarity - polarity_mean).powi(2))
                    .sum::<f64>()
                    / (n - 1.0);
                variance.sqrt()
            };

            LabelStats {
                label,
                count: members.len(),
                polarity_mean: round_to(polarity_mean, 3),
                polarity_std: round_to(polarity_std, 3),
                subjectivity_mean: round_to(subjectivity_mean, 3),
            }
        })
        .collect()
}

/// Non-zero label counts, most frequent first.
pub fn label_counts(rows: &[AnalyzedRow]) -> Vec<(SentimentLabel, usize)> {
    let totals = rows.iter().fold(Partial::default(), Partial::add);
    let mut counts: Vec<(SentimentLabel, usize)> = vec![
        (SentimentLabel::Positive, totals.positive),
        (SentimentLabel::Neutral, totals.neutral),
        (SentimentLabel::Negative, totals.negative),
    ];
    counts.retain(|(_, count)| *count > 0);
    // stable: equal counts stay in Positive, Neutral, Negative order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

pub fn polarities(rows: &[AnalyzedRow]) -> Vec<f64> {
    rows.iter().map(|r| r.polarity).collect()
}
