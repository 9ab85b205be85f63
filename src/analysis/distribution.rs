use crate::config::Thresholds;
use crate::models::{AnalyzedRow, HistogramBin, PolarityHistogram, SentimentLabel, TrendPoint};

impl PolarityHistogram {
    /// Equal-width bins over the observed range of `values`. The last bin is closed on
    /// both ends, so the maximum lands in it. A degenerate range is widened by 0.5 each way.
    pub fn from_values(values: &[f64], bins: usize, thresholds: Thresholds) -> Self {
        let mut histogram = PolarityHistogram {
            bins: Vec::new(),
            positive_threshold: thresholds.positive,
            negative_threshold: thresholds.negative,
        };

        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() || bins == 0 {
            return histogram;
        }

        let mut low = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let mut high = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if low == high {
            low -= 0.5;
            high += 0.5;
        }

        let width = (high - low) / bins as f64;
        let mut counts = vec![0usize; bins];
        for v in &finite {
            let index = (((v - low) / width) as usize).min(bins - 1);
            counts[index] += 1;
        }

        histogram.bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                lower: low + width * i as f64,
                upper: if i + 1 == bins {
                    high
                } else {
                    low + width * (i + 1) as f64
                },
                count,
            })
            .collect();

        histogram
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Running Positive/Negative totals after each row, in input order.
pub fn cumulative_trend(rows: &[AnalyzedRow]) -> Vec<TrendPoint> {
    let mut positive = 0;
    let mut negative = 0;

    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            match row.sentiment_label {
                SentimentLabel::Positive => positive += 1,
                SentimentLabel::Negative => negative += 1,
                SentimentLabel::Neutral => {}
            }
            TrendPoint {
                index,
                cumulative_positive: positive,
                cumulative_negative: negative,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeedbackRow, SentimentScore};

    #[test]
    fn test_histogram_counts_every_value() {
        let values = [-1.0, -0.5, 0.0, 0.0, 0.25, 0.5, 1.0];
        let histogram = PolarityHistogram::from_values(&values, 4, Thresholds::granular());
        assert_eq!(histogram.bins.len(), 4);
        assert_eq!(histogram.total(), values.len());
        assert_eq!(histogram.bins[0].lower, -1.0);
        assert_eq!(histogram.bins[3].upper, 1.0);
        // 1.0 sits on the closing edge of the last bin
        assert_eq!(histogram.bins[3].count, 2);
        assert_eq!(histogram.positive_threshold, 0.2);
        assert_eq!(histogram.negative_threshold, -0.2);
    }

    #[test]
    fn test_histogram_single_value() {
        let histogram = PolarityHistogram::from_values(&[0.0, 0.0], 2, Thresholds::granular());
        assert_eq!(histogram.bins[0].lower, -0.5);
        assert_eq!(histogram.bins[1].upper, 0.5);
        assert_eq!(histogram.bins[1].count, 2);
    }

    #[test]
    fn test_histogram_empty() {
        let histogram = PolarityHistogram::from_values(&[], 20, Thresholds::granular());
        assert!(histogram.bins.is_empty());
        assert_eq!(histogram.total(), 0);
    }

    #[test]
    fn test_cumulative_trend() {
        let labels = [
            SentimentLabel::Positive,
            SentimentLabel::Neutral,
            SentimentLabel::Negative,
            SentimentLabel::Positive,
        ];
        let rows: Vec<AnalyzedRow> = labels
            .iter()
            .map(|label| {
                AnalyzedRow::new(
                    FeedbackRow::new().with("feedback", "x"),
                    SentimentScore {
                        polarity: 0.0,
                        subjectivity: 0.0,
                        label: *label,
                        sentiment: label.sentiment(),
                    },
                )
            })
            .collect();

        let trend = cumulative_trend(&rows);
        assert_eq!(trend.len(), 4);
        assert_eq!(trend[1].cumulative_positive, 1);
        assert_eq!(trend[2].cumulative_negative, 1);
        let last = trend.last().unwrap();
        assert_eq!((last.cumulative_positive, last.cumulative_negative), (2, 1));
    }
}
