use std::collections::HashMap;
use std::sync::Arc;

use recallchat::config::MatcherConfig;
use recallchat::corpus::CorpusStore;
use recallchat::embedding::TextEmbedder;
use recallchat::moderation::{ModerationPolicy, RegexBlocklist};
use recallchat::models::{CorpusEntry, SentimentScores};
use recallchat::services::{ChatService, BLOCKED_RESPONSE};
use tempfile::TempDir;

struct FixtureEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    dimensions: usize,
}

impl FixtureEmbedder {
    fn new(mapping: &[(&str, &[f32])]) -> Self {
        let dimensions = mapping.first().map(|(_, v)| v.len()).unwrap_or(0);
        let vectors = mapping
            .iter()
            .map(|(text, vector)| (text.to_string(), vector.to_vec()))
            .collect();

        Self {
            vectors,
            dimensions,
        }
    }
}

impl TextEmbedder for FixtureEmbedder {
    fn embed_batch(&self, texts: &[&str]) -> recallchat::Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| {
                self.vectors
                    .get(*text)
                    .cloned()
                    .unwrap_or_else(|| vec![0.0; self.dimensions])
            })
            .collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

fn build_service(dir: &TempDir, moderation: Option<Arc<dyn ModerationPolicy>>) -> ChatService {
    // The offensive query is itself a stored corpus entry with an exact
    // vector match, so moderation is the only thing standing in the way.
    let entries = vec![
        CorpusEntry::new(
            "you are stupid",
            "that's not nice",
            SentimentScores::new(0.9, 0.1, 0.0, -0.8),
        ),
        CorpusEntry::new(
            "hello",
            "hi there!",
            SentimentScores::new(0.0, 1.0, 0.0, 0.0),
        ),
    ];
    let mapping: Vec<(&str, &[f32])> = vec![
        ("you are stupid", &[1.0, 0.0]),
        ("hello", &[0.0, 1.0]),
        ("who is voldemort", &[1.0, 1.0]),
    ];

    let store = CorpusStore::with_entries(dir.path().join("corpus.csv"), entries).unwrap();
    let embedder = Arc::new(FixtureEmbedder::new(&mapping));

    ChatService::with_parts(store, embedder, moderation, MatcherConfig::default()).unwrap()
}

#[tokio::test]
async fn test_blocked_query_gets_refusal() {
    let dir = TempDir::new().unwrap();
    let policy = Arc::new(RegexBlocklist::with_default_patterns());
    let service = build_service(&dir, Some(policy));

    let outcome = service.match_query("you are stupid").await;
    assert!(outcome.is_blocked());

    let reply = service.submit_query("you are stupid").await;
    assert_eq!(reply.response.as_deref(), Some(BLOCKED_RESPONSE));
    assert!(reply.score.is_none());
    assert!(reply.waiting_for_teaching.is_none());
}

#[tokio::test]
async fn test_blocking_happens_before_similarity() {
    // Without moderation the same query is a perfect corpus match, which
    // shows the refusal is not a retrieval miss.
    let dir = TempDir::new().unwrap();
    let unmoderated = build_service(&dir, None);

    let outcome = unmoderated.match_query("you are stupid").await;
    assert!(outcome.is_accepted());

    let moderated_dir = TempDir::new().unwrap();
    let policy = Arc::new(RegexBlocklist::with_default_patterns());
    let moderated = build_service(&moderated_dir, Some(policy));

    assert!(moderated.match_query("you are stupid").await.is_blocked());
}

#[tokio::test]
async fn test_blocklist_matches_any_casing() {
    let dir = TempDir::new().unwrap();
    let policy = Arc::new(RegexBlocklist::with_default_patterns());
    let service = build_service(&dir, Some(policy));

    assert!(service.match_query("You Are STUPID").await.is_blocked());
}

#[tokio::test]
async fn test_clean_queries_pass_moderation() {
    let dir = TempDir::new().unwrap();
    let policy = Arc::new(RegexBlocklist::with_default_patterns());
    let service = build_service(&dir, Some(policy));

    let outcome = service.match_query("hello").await;

    assert!(outcome.is_accepted());
}

#[tokio::test]
async fn test_extra_patterns_extend_the_blocklist() {
    let dir = TempDir::new().unwrap();
    let policy =
        Arc::new(RegexBlocklist::with_extra_patterns(&[r"\bvoldemort\b".to_string()]).unwrap());
    let service = build_service(&dir, Some(policy));

    assert!(service.match_query("who is voldemort").await.is_blocked());
    assert!(!service.match_query("hello").await.is_blocked());
}

#[test]
fn test_blocklist_respects_word_boundaries() {
    let policy = RegexBlocklist::with_default_patterns();

    // "hate" only matches as a whole word
    assert!(policy.is_blocked("i hate this"));
    assert!(!policy.is_blocked("whatever works"));

    // The first pattern group allows suffix growth
    assert!(policy.is_blocked("such stupidity"));
}

#[test]
fn test_invalid_extra_pattern_is_rejected() {
    assert!(RegexBlocklist::with_extra_patterns(&["(unclosed".to_string()]).is_err());
}
