use crate::analysis::words::StopwordSet;
use crate::error::{Error, Result};
use crate::models::SentimentLabel;
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_TEXT_COLUMN: &str = "feedback";
pub const DEFAULT_TOP_WORDS_K: usize = 8;
pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThresholdVariant {
    /// 0.2 / -0.2
    Granular,
    /// 0.1 / -0.1
    Permissive,
}

impl std::str::FromStr for ThresholdVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "granular" | "a" => Ok(ThresholdVariant::Granular),
            "permissive" | "b" => Ok(ThresholdVariant::Permissive),
            other => Err(Error::Config(format!(
                "unknown threshold variant '{}', expected 'granular' or 'permissive'",
                other
            ))),
        }
    }
}

/// Polarity cut-offs. Both bounds are exclusive, so a score exactly on a bound is Neutral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub positive: f64,
    pub negative: f64,
}

impl Thresholds {
    pub fn new(positive: f64, negative: f64) -> Result<Self> {
        let thresholds = Self { positive, negative };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn granular() -> Self {
        Self {
            positive: 0.2,
            negative: -0.2,
        }
    }

    pub fn permissive() -> Self {
        Self {
            positive: 0.1,
            negative: -0.1,
        }
    }

    pub fn for_variant(variant: ThresholdVariant) -> Self {
        match variant {
            ThresholdVariant::Granular => Self::granular(),
            ThresholdVariant::Permissive => Self::permissive(),
        }
    }

    pub fn classify(&self, polarity: f64) -> SentimentLabel {
        if polarity > self.positive {
            SentimentLabel::Positive
        } else if polarity < self.negative {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    fn validate(&self) -> Result<()> {
        let in_range = |v: f64| (-1.0..=1.0).contains(&v);
        if !in_range(self.positive) || !in_range(self.negative) {
            return Err(Error::Config(format!(
                "thresholds must lie in [-1, 1], got {} / {}",
                self.positive, self.negative
            )));
        }
        if self.negative > self.positive {
            return Err(Error::Config(format!(
                "negative threshold {} is above positive threshold {}",
                self.negative, self.positive
            )));
        }
        Ok(())
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::granular()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub text_column: String,
    pub thresholds: Thresholds,
    pub top_words_k: usize,
    pub stopwords: Option<Vec<String>>,
    pub histogram_bins: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source. Variables that are set but blank
    /// fall back to their defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| -> Option<String> {
            let raw = lookup(name)?;
            if raw.trim().is_empty() {
                tracing::warn!("{} is set but empty, using the default", name);
                return None;
            }
            Some(raw)
        };

        let text_column = var("FEEDBACK_TEXT_COLUMN")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| DEFAULT_TEXT_COLUMN.to_string());

        let variant = match var("SENTIMENT_THRESHOLD_VARIANT") {
            Some(v) => v.parse()?,
            None => ThresholdVariant::Granular,
        };
        let base = Thresholds::for_variant(variant);

        let positive = parse_var("POSITIVE_THRESHOLD", var("POSITIVE_THRESHOLD"))?
            .unwrap_or(base.positive);
        let negative = parse_var("NEGATIVE_THRESHOLD", var("NEGATIVE_THRESHOLD"))?
            .unwrap_or(base.negative);
        let thresholds = Thresholds::new(positive, negative)?;

        let top_words_k =
            parse_var("TOP_WORDS_K", var("TOP_WORDS_K"))?.unwrap_or(DEFAULT_TOP_WORDS_K);

        let stopwords = var("STOPWORDS").and_then(|v| {
            let words: Vec<String> = v
                .split(',')
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect();
            if words.is_empty() {
                tracing::warn!("STOPWORDS lists no words, using the default list");
                None
            } else {
                Some(words)
            }
        });

        let histogram_bins =
            parse_var("HISTOGRAM_BINS", var("HISTOGRAM_BINS"))?.unwrap_or(DEFAULT_HISTOGRAM_BINS);

        let config = Self {
            text_column,
            thresholds,
            top_words_k,
            stopwords,
            histogram_bins,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        if self.top_words_k == 0 {
            return Err(Error::Config("TOP_WORDS_K must be at least 1".to_string()));
        }
        if self.histogram_bins == 0 {
            return Err(Error::Config("HISTOGRAM_BINS must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            text_column: DEFAULT_TEXT_COLUMN.to_string(),
            thresholds: Thresholds::default(),
            top_words_k: DEFAULT_TOP_WORDS_K,
            stopwords: None,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: Option<String>) -> Result<Option<T>> {
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::Config(format!("{} has an invalid value: '{}'", name, raw))),
        None => Ok(None),
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub text_column: String,
    pub thresholds: Thresholds,
    pub top_words_k: usize,
    pub stopwords: StopwordSet,
    pub histogram_bins: usize,
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        let stopwords = match &config.stopwords {
            Some(words) => StopwordSet::from_words(words.iter().map(String::as_str)),
            None => StopwordSet::default(),
        };

        Self {
            text_column: config.text_column.clone(),
            thresholds: config.thresholds,
            top_words_k: config.top_words_k,
            stopwords,
            histogram_bins: config.histogram_bins,
            show_progress: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_boundaries_are_neutral() {
        let t = Thresholds::granular();
        assert_eq!(t.classify(0.2), SentimentLabel::Neutral);
        assert_eq!(t.classify(-0.2), SentimentLabel::Neutral);
        assert_eq!(t.classify(0.2001), SentimentLabel::Positive);
        assert_eq!(t.classify(-0.2001), SentimentLabel::Negative);
        assert_eq!(t.classify(0.0), SentimentLabel::Neutral);
    }

    #[test]
    fn test_permissive_variant() {
        let t = Thresholds::for_variant(ThresholdVariant::Permissive);
        assert_eq!(t.classify(0.15), SentimentLabel::Positive);
        assert_eq!(t.classify(-0.15), SentimentLabel::Negative);
        assert_eq!(t.classify(0.1), SentimentLabel::Neutral);
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        assert!(Thresholds::new(-0.3, 0.3).is_err());
        assert!(Thresholds::new(1.5, -0.2).is_err());
        assert!(Thresholds::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_variant_parsing() {
        assert_eq!(
            "Permissive".parse::<ThresholdVariant>().unwrap(),
            ThresholdVariant::Permissive
        );
        assert!("strict".parse::<ThresholdVariant>().is_err());
    }

    #[test]
    fn test_default_config_validates() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        let pipeline = PipelineConfig::from(&config);
        assert_eq!(pipeline.text_column, "feedback");
        assert_eq!(pipeline.top_words_k, 8);
        assert!(pipeline.stopwords.contains("the"));
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_from_lookup_reads_values() {
        let config = Config::from_lookup(lookup(&[
            ("FEEDBACK_TEXT_COLUMN", " comment "),
            ("SENTIMENT_THRESHOLD_VARIANT", "permissive"),
            ("TOP_WORDS_K", "5"),
            ("STOPWORDS", "Policy, plan"),
        ]))
        .unwrap();
        assert_eq!(config.text_column, "comment");
        assert_eq!(config.thresholds, Thresholds::permissive());
        assert_eq!(config.top_words_k, 5);
        assert_eq!(
            config.stopwords,
            Some(vec!["policy".to_string(), "plan".to_string()])
        );
        assert!(Config::from_lookup(lookup(&[("TOP_WORDS_K", "many")])).is_err());
    }

    #[test]
    fn test_blank_values_fall_back_with_warning() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let config = tracing::subscriber::with_default(subscriber, || {
            Config::from_lookup(lookup(&[
                ("FEEDBACK_TEXT_COLUMN", "   "),
                ("TOP_WORDS_K", ""),
                ("STOPWORDS", " , "),
            ]))
        })
        .unwrap();

        assert_eq!(config.text_column, DEFAULT_TEXT_COLUMN);
        assert_eq!(config.top_words_k, DEFAULT_TOP_WORDS_K);
        assert_eq!(config.stopwords, None);

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("FEEDBACK_TEXT_COLUMN is set but empty"));
        assert!(output.contains("TOP_WORDS_K is set but empty"));
        assert!(output.contains("STOPWORDS lists no words"));
    }

    #[test]
    fn test_zero_top_words_rejected() {
        let config = Config {
            top_words_k: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
