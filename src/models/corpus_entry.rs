use serde::{Deserialize, Serialize};

/// Sentiment scores attached to a corpus entry.
///
/// The compound score is the only one the matching engine reads: the entry
/// whose compound is closest to zero serves as the neutral fallback response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SentimentScores {
    pub negative: f32,
    pub neutral: f32,
    pub positive: f32,
    pub compound: f32,
}

impl SentimentScores {
    pub fn new(negative: f32, neutral: f32, positive: f32, compound: f32) -> Self {
        Self {
            negative,
            neutral,
            positive,
            compound,
        }
    }

    /// Fixed scores assigned to taught entries. Taught responses are assumed
    /// mildly positive/neutral rather than sentiment-analyzed.
    pub fn taught_default() -> Self {
        Self {
            negative: 0.0,
            neutral: 0.8,
            positive: 0.2,
            compound: 0.4,
        }
    }

    /// Distance from neutral sentiment (absolute compound)
    pub fn neutral_distance(&self) -> f32 {
        self.compound.abs()
    }
}

/// One query/response pair in the corpus.
///
/// The constructor enforces the storage normalization: queries are stored
/// stripped and lowercased, responses stripped. Every code path that creates
/// an entry (table load, teaching) goes through it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CorpusEntry {
    pub query: String,
    pub response: String,
    pub sentiment: SentimentScores,
}

impl CorpusEntry {
    pub fn new(query: &str, response: &str, sentiment: SentimentScores) -> Self {
        Self {
            query: query.trim().to_lowercase(),
            response: response.trim().to_string(),
            sentiment,
        }
    }

    /// Create a taught entry with the default sentiment
    pub fn taught(query: &str, response: &str) -> Self {
        Self::new(query, response, SentimentScores::taught_default())
    }
}
