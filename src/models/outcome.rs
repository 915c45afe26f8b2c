/// Result of matching one query against the corpus.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// Rejected by the moderation policy before any retrieval work
    Blocked,
    /// Best similarity cleared the confidence threshold
    Accepted { response: String, score: f32 },
    /// Best similarity at or below the threshold, no confident answer
    NeedsTeaching { best_score: f32 },
    /// Empty input or an internal failure, degraded to the safe response
    Fallback { response: String },
}

impl MatchOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, MatchOutcome::Accepted { .. })
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, MatchOutcome::Blocked)
    }

    /// The similarity score, when one was computed
    pub fn score(&self) -> Option<f32> {
        match self {
            MatchOutcome::Accepted { score, .. } => Some(*score),
            MatchOutcome::NeedsTeaching { best_score } => Some(*best_score),
            _ => None,
        }
    }
}
