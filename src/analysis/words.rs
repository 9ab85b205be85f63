use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::models::{AnalyzedRow, SentimentLabel, WordCount, WordFrequencyTable};

lazy_static! {
    static ref TOKEN_RE: Regex = Regex::new(r"\b[a-z]{3,15}\b").unwrap();
}

/// Articles, conjunctions, auxiliaries, pronouns and demonstratives.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "the", "and", "for", "that", "with", "this", "have", "from", "they", "will", "their", "has",
    "been", "are", "what", "were", "your", "there", "about", "which", "when", "would", "could",
    "should", "them", "then", "than", "was", "had", "its", "into", "also", "these", "those",
    "our", "but",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn from_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            words: words.into_iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::from_words(DEFAULT_STOPWORDS.iter().copied())
    }
}

pub struct WordCounter {
    stopwords: StopwordSet,
}

impl WordCounter {
    pub fn new(stopwords: StopwordSet) -> Self {
        Self { stopwords }
    }

    /// Counts non-stopword tokens in `text` and returns the `k` most frequent.
    /// Equal counts keep the order in which the words first appeared.
    pub fn most_common(&self, text: &str, k: usize) -> Vec<WordCount> {
        let lowered = text.to_lowercase();

        // word -> (count, first position)
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (position, word) in TOKEN_RE
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|w| !self.stopwords.contains(w))
            .enumerate()
        {
            counts.entry(word).or_insert((0, position)).0 += 1;
        }

        let mut ranked: Vec<(&str, usize, usize)> = counts
            .into_iter()
            .map(|(word, (count, first))| (word, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        ranked.truncate(k);

        ranked
            .into_iter()
            .map(|(word, count, _)| WordCount {
                word: word.to_string(),
                count,
            })
            .collect()
    }

    pub fn top_words(
        &self,
        rows: &[AnalyzedRow],
        text_column: &str,
        label: Option<SentimentLabel>,
        k: usize,
    ) -> Result<WordFrequencyTable> {
        let mut texts = Vec::new();
        for (index, row) in rows.iter().enumerate() {
            if label.map_or(false, |l| row.sentiment_label != l) {
                continue;
            }
            let text = row.row.text(text_column).ok_or_else(|| Error::MalformedRow {
                row: index,
                column: text_column.to_string(),
            })?;
            texts.push(text);
        }

        let words = self.most_common(&texts.join(" "), k);
        if words.is_empty() {
            tracing::warn!(
                "No significant words found for {}",
                label.map(|l| l.as_str()).unwrap_or("all")
            );
        }

        Ok(WordFrequencyTable { label, words })
    }
}

impl Default for WordCounter {
    fn default() -> Self {
        Self::new(StopwordSet::default())
    }
}
