use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LexiconEntry {
    pub polarity: f64,
    pub subjectivity: f64,
}

/// Word-level polarity/subjectivity lexicon with negation and intensifier modifiers.
pub struct SentimentLexicon {
    entries: HashMap<String, LexiconEntry>,
    intensifiers: HashMap<String, f64>,
    negations: HashSet<String>,
    pass_through: HashSet<String>,
}

impl SentimentLexicon {
    pub fn new() -> Self {
        let mut lexicon = Self {
            entries: HashMap::new(),
            intensifiers: HashMap::new(),
            negations: HashSet::new(),
            pass_through: HashSet::new(),
        };

        lexicon.init_positive();
        lexicon.init_negative();
        lexicon.init_intensifiers();
        lexicon.init_negations();
        lexicon.init_pass_through();

        lexicon
    }

    fn init_positive(&mut self) {
        let words = vec![
            ("excellent", 1.0, 1.0),
            ("outstanding", 0.8, 0.9),
            ("fantastic", 0.8, 0.9),
            ("great", 0.8, 0.75),
            ("best", 1.0, 0.3),
            ("amazing", 0.6, 0.9),
            ("wonderful", 1.0, 1.0),
            ("perfect", 1.0, 1.0),
            ("superb", 1.0, 1.0),
            ("brilliant", 0.9, 1.0),
            ("impressive", 1.0, 1.0),
            ("good", 0.7, 0.6),
            ("nice", 0.6, 1.0),
            ("happy", 0.8, 1.0),
            ("glad", 0.5, 1.0),
            ("pleased", 0.5, 1.0),
            ("satisfied", 0.5, 1.0),
            ("love", 0.5, 0.6),
            ("wise", 0.7, 0.9),
            ("successful", 0.75, 0.95),
            ("success", 0.6, 0.6),
            ("commendable", 0.6, 0.8),
            ("effective", 0.6, 0.8),
            ("effectively", 0.6, 0.8),
            ("valuable", 0.5, 0.6),
            ("beneficial", 0.5, 0.5),
            ("helpful", 0.5, 0.5),
            ("innovative", 0.5, 0.6),
            ("robust", 0.5, 0.6),
            ("strong", 0.43, 0.73),
            ("positive", 0.4, 0.5),
            ("important", 0.4, 1.0),
            ("smart", 0.4, 0.6),
            ("supportive", 0.4, 0.5),
            ("thorough", 0.4, 0.5),
            ("improve", 0.4, 0.4),
            ("improved", 0.4, 0.4),
            ("improvement", 0.4, 0.4),
            ("fair", 0.35, 0.6),
            ("benefit", 0.3, 0.3),
            ("useful", 0.3, 0.1),
            ("comprehensive", 0.3, 0.5),
            ("balanced", 0.3, 0.4),
            ("reasonable", 0.2, 0.4),
            ("sustainable", 0.2, 0.4),
            ("transparent", 0.2, 0.5),
            ("accountable", 0.2, 0.4),
            ("fine", 0.15, 0.5),
            ("clear", 0.1, 0.4),
            ("okay", 0.1, 0.5),
            ("acceptable", 0.1, 0.4),
            ("adequate", 0.1, 0.3),
        ];

        for (word, polarity, subjectivity) in words {
            self.add_word(word, polarity, subjectivity);
        }
    }

    fn init_negative(&mut self) {
        let words = vec![
            ("terrible", -1.0, 1.0),
            ("horrible", -1.0, 1.0),
            ("awful", -1.0, 1.0),
            ("worst", -1.0, 1.0),
            ("disastrous", -0.9, 0.9),
            ("disaster", -0.8, 0.9),
            ("stupid", -0.8, 1.0),
            ("unacceptable", -0.8, 0.9),
            ("hate", -0.8, 0.9),
            ("disappointed", -0.75, 0.75),
            ("bad", -0.7, 0.67),
            ("destroy", -0.7, 0.7),
            ("reckless", -0.7, 0.8),
            ("corrupt", -0.7, 0.8),
            ("disappointing", -0.6, 0.7),
            ("harmful", -0.6, 0.7),
            ("damaging", -0.6, 0.6),
            ("failure", -0.6, 0.6),
            ("misguided", -0.6, 0.7),
            ("ridiculous", -0.6, 0.9),
            ("inadequate", -0.5, 0.6),
            ("hurt", -0.5, 0.6),
            ("unfair", -0.5, 0.8),
            ("wrong", -0.5, 0.9),
            ("useless", -0.5, 0.2),
            ("wasteful", -0.5, 0.6),
            ("ineffective", -0.5, 0.6),
            ("fail", -0.5, 0.5),
            ("fails", -0.5, 0.5),
            ("failed", -0.5, 0.5),
            ("flawed", -0.5, 0.6),
            ("angry", -0.5, 1.0),
            ("frustrating", -0.5, 0.7),
            ("sad", -0.5, 1.0),
            ("poor", -0.4, 0.6),
            ("poorly", -0.4, 0.6),
            ("insufficient", -0.4, 0.5),
            ("worried", -0.4, 0.7),
            ("problematic", -0.4, 0.6),
            ("overreach", -0.4, 0.5),
            ("weak", -0.4, 0.6),
            ("negative", -0.3, 0.4),
            ("negatively", -0.3, 0.4),
            ("concerning", -0.3, 0.5),
            ("concerned", -0.3, 0.5),
            ("confusing", -0.3, 0.6),
            ("lacking", -0.3, 0.4),
            ("lacks", -0.3, 0.4),
            ("costly", -0.3, 0.5),
            ("expensive", -0.3, 0.7),
            ("unclear", -0.2, 0.5),
        ];

        for (word, polarity, subjectivity) in words {
            self.add_word(word, polarity, subjectivity);
        }
    }

    fn init_intensifiers(&mut self) {
        let intensifiers = vec![
            ("very", 1.3),
            ("really", 1.2),
            ("so", 1.2),
            ("truly", 1.2),
            ("highly", 1.3),
            ("deeply", 1.3),
            ("significantly", 1.3),
            ("completely", 1.3),
            ("totally", 1.3),
            ("absolutely", 1.4),
            ("extremely", 1.5),
            ("incredibly", 1.5),
            ("tremendously", 1.5),
            ("quite", 1.1),
            ("fairly", 0.8),
            ("rather", 0.8),
            ("somewhat", 0.6),
            ("slightly", 0.5),
        ];

        for (word, multiplier) in intensifiers {
            self.intensifiers.insert(word.to_string(), multiplier);
        }
    }

    fn init_negations(&mut self) {
        let negations = vec![
            "not", "no", "never", "nothing", "neither", "nor", "cannot", "hardly", "barely",
            "without",
        ];

        self.negations = negations.into_iter().map(String::from).collect();
    }

    // Words that may sit between a modifier and the word it modifies.
    fn init_pass_through(&mut self) {
        let words = vec![
            "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "it", "this",
            "that", "at", "all",
        ];

        self.pass_through = words.into_iter().map(String::from).collect();
    }

    pub fn add_word(&mut self, word: &str, polarity: f64, subjectivity: f64) {
        self.entries.insert(
            word.to_lowercase(),
            LexiconEntry {
                polarity: polarity.clamp(-1.0, 1.0),
                subjectivity: subjectivity.clamp(0.0, 1.0),
            },
        );
    }

    pub fn lookup(&self, word: &str) -> Option<LexiconEntry> {
        self.entries.get(word).copied()
    }

    pub fn intensifier(&self, word: &str) -> Option<f64> {
        self.intensifiers.get(word).copied()
    }

    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word) || word.ends_with("n't")
    }

    pub fn is_pass_through(&self, word: &str) -> bool {
        self.pass_through.contains(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SentimentLexicon {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicon_values_in_range() {
        let lexicon = SentimentLexicon::new();
        assert!(!lexicon.is_empty());
        for entry in lexicon.entries.values() {
            assert!((-1.0..=1.0).contains(&entry.polarity));
            assert!((0.0..=1.0).contains(&entry.subjectivity));
        }
    }

    #[test]
    fn test_negation_forms() {
        let lexicon = SentimentLexicon::new();
        assert!(lexicon.is_negation("not"));
        assert!(lexicon.is_negation("isn't"));
        assert!(lexicon.is_negation("don't"));
        assert!(!lexicon.is_negation("excellent"));
    }

    #[test]
    fn test_add_word_clamps() {
        let mut lexicon = SentimentLexicon::new();
        lexicon.add_word("Stellar", 3.0, -1.0);
        let entry = lexicon.lookup("stellar").unwrap();
        assert_eq!(entry.polarity, 1.0);
        assert_eq!(entry.subjectivity, 0.0);
    }
}
