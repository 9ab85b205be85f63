pub mod lexicon;
pub mod scorer;

pub use lexicon::{LexiconEntry, SentimentLexicon};
pub use scorer::SentimentScorer;
