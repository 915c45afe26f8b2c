//! Query moderation.
//!
//! A blocklist check that runs before any retrieval work. Blocked queries
//! never reach the embedding model, and the caller gets an explicit refusal
//! rather than a low-confidence fallback.

use lazy_static::lazy_static;
use regex::RegexSet;

use crate::error::{RecallChatError, Result};

/// Policy seam for rejecting queries up front.
pub trait ModerationPolicy: Send + Sync {
    /// True when the text must not be answered.
    fn is_blocked(&self, text: &str) -> bool;
}

/// Built-in blocklist patterns, matched against lowercased text. The first
/// group blocks derived forms too, the second exact words only.
const DEFAULT_PATTERNS: [&str; 2] = [
    r"\b(fuck|shit|damn|bitch|asshole|idiot|stupid|fool|dumb|cunt|nigger|retard|bastard|whore)\w*\b",
    r"\b(hate|kill|die|fag|slut)\b",
];

lazy_static! {
    static ref DEFAULT_SET: RegexSet = RegexSet::new(DEFAULT_PATTERNS).unwrap();
}

/// Regex blocklist: a query matching any pattern is blocked.
#[derive(Debug)]
pub struct RegexBlocklist {
    patterns: RegexSet,
}

impl RegexBlocklist {
    /// Compile a blocklist from explicit patterns.
    pub fn new(patterns: &[&str]) -> Result<Self> {
        let set = RegexSet::new(patterns).map_err(|e| {
            RecallChatError::invalid_config(format!("invalid moderation pattern: {}", e))
        })?;

        Ok(Self { patterns: set })
    }

    /// The built-in pattern set.
    pub fn with_default_patterns() -> Self {
        Self {
            patterns: DEFAULT_SET.clone(),
        }
    }

    /// The built-in set extended with additional patterns from configuration.
    pub fn with_extra_patterns(extra: &[String]) -> Result<Self> {
        if extra.is_empty() {
            return Ok(Self::with_default_patterns());
        }

        let patterns: Vec<&str> = DEFAULT_PATTERNS
            .iter()
            .copied()
            .chain(extra.iter().map(|s| s.as_str()))
            .collect();

        Self::new(&patterns)
    }
}

impl ModerationPolicy for RegexBlocklist {
    fn is_blocked(&self, text: &str) -> bool {
        self.patterns.is_match(&text.to_lowercase())
    }
}
