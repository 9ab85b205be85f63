use lazy_static::lazy_static;
use regex::Regex;

use crate::config::Thresholds;
use crate::models::{FieldValue, SentimentScore};
use crate::sentiment::lexicon::SentimentLexicon;

lazy_static! {
    static ref WORD_RE: Regex = Regex::new(r"[a-z]+(?:'[a-z]+)*").unwrap();
}

// Scale applied to a negated assessment; negation flips and dampens.
const NEGATION_FACTOR: f64 = -0.5;

pub struct SentimentScorer {
    lexicon: SentimentLexicon,
    thresholds: Thresholds,
}

impl SentimentScorer {
    pub fn new(thresholds: Thresholds) -> Self {
        Self::with_lexicon(SentimentLexicon::new(), thresholds)
    }

    pub fn with_lexicon(lexicon: SentimentLexicon, thresholds: Thresholds) -> Self {
        Self {
            lexicon,
            thresholds,
        }
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn score(&self, text: &str) -> SentimentScore {
        let (polarity, subjectivity) = self.assess(text);
        let label = self.thresholds.classify(polarity);

        SentimentScore {
            polarity,
            subjectivity,
            label,
            sentiment: label.sentiment(),
        }
    }

    pub fn score_value(&self, value: &FieldValue) -> SentimentScore {
        self.score(&value.to_string())
    }

    /// Averages every lexicon hit in `text` into (polarity, subjectivity).
    pub fn assess(&self, text: &str) -> (f64, f64) {
        let normalized = text.to_lowercase().replace('\u{2019}', "'");

        let mut polarities = Vec::new();
        let mut subjectivities = Vec::new();
        let mut negate = false;
        let mut multiplier = 1.0;

        for token in WORD_RE.find_iter(&normalized).map(|m| m.as_str()) {
            if self.lexicon.is_negation(token) {
                negate = true;
                continue;
            }

            if let Some(m) = self.lexicon.intensifier(token) {
                multiplier *= m;
                continue;
            }

            if let Some(entry) = self.lexicon.lookup(token) {
                let mut polarity = entry.polarity * multiplier;
                if negate {
                    polarity *= NEGATION_FACTOR;
                }
                polarities.push(polarity);
                subjectivities.push(entry.subjectivity * multiplier);

                negate = false;
                multiplier = 1.0;
            } else if !self.lexicon.is_pass_through(token) {
                negate = false;
                multiplier = 1.0;
            }
        }

        if polarities.is_empty() {
            return (0.0, 0.0);
        }

        let n = polarities.len() as f64;
        let polarity = (polarities.iter().sum::<f64>() / n).clamp(-1.0, 1.0);
        let subjectivity = (subjectivities.iter().sum::<f64>() / n).clamp(0.0, 1.0);

        (polarity, subjectivity)
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SentimentLabel;

    #[test]
    fn test_strongly_valenced_examples() {
        let scorer = SentimentScorer::default();
        assert_eq!(scorer.score("Excellent policy!").label, SentimentLabel::Positive);
        assert_eq!(scorer.score("Terrible decision.").label, SentimentLabel::Negative);
        assert_eq!(scorer.score("It is fine.").label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_empty_text_is_neutral() {
        let scorer = SentimentScorer::default();
        let score = scorer.score("");
        assert_eq!(score.polarity, 0.0);
        assert_eq!(score.subjectivity, 0.0);
        assert_eq!(score.label, SentimentLabel::Neutral);
        assert_eq!(score.sentiment, 0);
    }

    #[test]
    fn test_unicode_text_does_not_fail() {
        let scorer = SentimentScorer::default();
        let score = scorer.score("Très bien — 政策は素晴らしい 👍");
        assert!((-1.0..=1.0).contains(&score.polarity));
        assert!((0.0..=1.0).contains(&score.subjectivity));
    }

    #[test]
    fn test_negation_flips_polarity() {
        let scorer = SentimentScorer::default();
        let plain = scorer.score("the plan is good");
        let negated = scorer.score("the plan is not good");
        let contracted = scorer.score("the plan isn\u{2019}t good");
        assert!(plain.polarity > 0.0);
        assert!(negated.polarity < 0.0);
        assert_eq!(negated.polarity, contracted.polarity);
    }

    #[test]
    fn test_intensifier_strengthens() {
        let scorer = SentimentScorer::default();
        let normal = scorer.score("a good plan");
        let intensified = scorer.score("a very good plan");
        assert!(intensified.polarity > normal.polarity);
        assert!(intensified.subjectivity >= normal.subjectivity);
    }

    #[test]
    fn test_scores_stay_in_range() {
        let scorer = SentimentScorer::default();
        let texts = [
            "extremely incredibly absolutely excellent perfect",
            "extremely incredibly absolutely terrible awful",
            "not not not bad",
            "12345",
            "NaN",
        ];
        for text in texts {
            let score = scorer.score(text);
            assert!((-1.0..=1.0).contains(&score.polarity), "{}", text);
            assert!((0.0..=1.0).contains(&score.subjectivity), "{}", text);
        }
    }

    #[test]
    fn test_non_string_values_are_coerced() {
        let scorer = SentimentScorer::default();
        assert_eq!(scorer.score_value(&FieldValue::Int(5)).label, SentimentLabel::Neutral);
        assert_eq!(scorer.score_value(&FieldValue::Null).polarity, 0.0);
        assert_eq!(
            scorer.score_value(&FieldValue::Float(f64::NAN)).label,
            SentimentLabel::Neutral
        );
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let scorer = SentimentScorer::default();
        let text = "Reasonable policy framework with good intentions, though details need work.";
        assert_eq!(scorer.score(text), scorer.score(text));
    }
}
