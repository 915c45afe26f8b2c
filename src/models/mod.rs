pub mod corpus_entry;
pub mod outcome;

pub use corpus_entry::{CorpusEntry, SentimentScores};
pub use outcome::MatchOutcome;
