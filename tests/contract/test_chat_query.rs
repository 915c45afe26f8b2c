use std::collections::HashMap;
use std::sync::Arc;

use recallchat::config::MatcherConfig;
use recallchat::corpus::CorpusStore;
use recallchat::embedding::TextEmbedder;
use recallchat::models::{CorpusEntry, MatchOutcome, SentimentScores};
use recallchat::services::{ChatService, RETRY_PROMPT};
use tempfile::TempDir;

/// Embedder with preset vectors per normalized query. Unknown text maps to
/// the zero vector, which scores 0.0 against everything.
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

fn sample_entries() -> Vec<CorpusEntry> {
    vec![
        CorpusEntry::new("hello", "hi there!", SentimentScores::new(0.0, 0.7, 0.3, 0.3)),
        CorpusEntry::new(
            "bad day",
            "sorry to hear that",
            SentimentScores::new(0.6, 0.4, 0.0, -0.7),
        ),
        CorpusEntry::new(
            "thanks",
            "you're welcome",
            SentimentScores::new(0.0, 1.0, 0.0, 0.0),
        ),
    ]
}

fn sample_mapping() -> Vec<(&'static str, &'static [f32])> {
    vec![
        ("hello", &[1.0, 0.0, 0.0, 0.0]),
        ("bad day", &[0.0, 1.0, 0.0, 0.0]),
        ("thanks", &[0.0, 0.0, 1.0, 0.0]),
        ("almost hello", &[1.0, 1.0, 0.0, 0.0]),
    ]
}

fn build_service(
    dir: &TempDir,
    entries: Vec<CorpusEntry>,
    mapping: &[(&str, &[f32])],
    matcher: MatcherConfig,
) -> ChatService {
    let store = CorpusStore::with_entries(dir.path().join("corpus.csv"), entries).unwrap();
    let embedder = Arc::new(FixtureEmbedder::new(mapping));

    ChatService::with_parts(store, embedder, None, matcher).unwrap()
}

#[tokio::test]
async fn test_accepted_match_returns_stored_response() {
    let dir = TempDir::new().unwrap();
    let service = build_service(
        &dir,
        sample_entries(),
        &sample_mapping(),
        MatcherConfig::default(),
    );

    let outcome = service.match_query("hello").await;

    match outcome {
        MatchOutcome::Accepted { response, score } => {
            assert_eq!(response, "hi there!");
            assert!(score > 0.99);
        }
        other => panic!("expected accepted match, got {other:?}"),
    }
}

#[tokio::test]
async fn test_match_is_case_and_whitespace_insensitive() {
    let dir = TempDir::new().unwrap();
    let service = build_service(
        &dir,
        sample_entries(),
        &sample_mapping(),
        MatcherConfig::default(),
    );

    let outcome = service.match_query("  HeLLo  ").await;

    assert!(outcome.is_accepted());
}

#[tokio::test]
async fn test_score_exactly_at_threshold_is_not_accepted() {
    // cosine([1,0,0,0], [1,1,1,1]) = 1 / 2 = 0.5 exactly, and the
    // threshold comparison is strict.
    let dir = TempDir::new().unwrap();
    let entries = vec![CorpusEntry::new(
        "greetings",
        "hello friend",
        SentimentScores::new(0.0, 1.0, 0.0, 0.0),
    )];
    let mapping: Vec<(&str, &[f32])> = vec![
        ("greetings", &[1.0, 1.0, 1.0, 1.0]),
        ("hello", &[1.0, 0.0, 0.0, 0.0]),
    ];
    let service = build_service(&dir, entries, &mapping, MatcherConfig::default());

    let outcome = service.match_query("hello").await;

    match outcome {
        MatchOutcome::NeedsTeaching { best_score } => assert_eq!(best_score, 0.5),
        other => panic!("expected low-confidence outcome, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_query_needs_teaching() {
    let dir = TempDir::new().unwrap();
    let service = build_service(
        &dir,
        sample_entries(),
        &sample_mapping(),
        MatcherConfig::default(),
    );

    let outcome = service.match_query("xyzzy quux").await;

    match outcome {
        MatchOutcome::NeedsTeaching { best_score } => assert_eq!(best_score, 0.0),
        other => panic!("expected low-confidence outcome, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_query_falls_back_to_safest_response() {
    let dir = TempDir::new().unwrap();
    let service = build_service(
        &dir,
        sample_entries(),
        &sample_mapping(),
        MatcherConfig::default(),
    );

    // "thanks" has the compound score closest to zero
    let outcome = service.match_query("   ").await;

    match outcome {
        MatchOutcome::Fallback { response } => assert_eq!(response, "you're welcome"),
        other => panic!("expected fallback, got {other:?}"),
    }
}

#[tokio::test]
async fn test_accepted_wire_shape() {
    let dir = TempDir::new().unwrap();
    let service = build_service(
        &dir,
        sample_entries(),
        &sample_mapping(),
        MatcherConfig::default(),
    );

    let reply = service.submit_query("hello").await;

    assert_eq!(reply.response.as_deref(), Some("hi there!"));
    assert!(reply.score.unwrap() > 0.99);
    assert!(reply.waiting_for_teaching.is_none());
}

#[tokio::test]
async fn test_low_confidence_waits_for_teaching() {
    let dir = TempDir::new().unwrap();
    let service = build_service(
        &dir,
        sample_entries(),
        &sample_mapping(),
        MatcherConfig::default(),
    );

    let reply = service.submit_query("xyzzy quux").await;

    assert_eq!(reply.waiting_for_teaching, Some(true));
    assert!(reply.response.is_none());
    assert!(reply.score.is_none());
}

#[tokio::test]
async fn test_low_confidence_with_teaching_disabled_prompts_retry() {
    let dir = TempDir::new().unwrap();
    let matcher = MatcherConfig {
        teaching_enabled: false,
        ..MatcherConfig::default()
    };
    let service = build_service(&dir, sample_entries(), &sample_mapping(), matcher);

    let reply = service.submit_query("xyzzy quux").await;

    assert_eq!(reply.response.as_deref(), Some(RETRY_PROMPT));
    assert_eq!(reply.score, Some(0.0));
    assert!(reply.waiting_for_teaching.is_none());
}

#[tokio::test]
async fn test_threshold_is_configurable() {
    // cosine([1,1,0,0], [1,0,0,0]) ~ 0.707: accepted at the default
    // threshold, rejected at 0.9.
    let dir = TempDir::new().unwrap();
    let service = build_service(
        &dir,
        sample_entries(),
        &sample_mapping(),
        MatcherConfig::default(),
    );

    assert!(service.match_query("almost hello").await.is_accepted());

    let strict_dir = TempDir::new().unwrap();
    let strict = build_service(
        &strict_dir,
        sample_entries(),
        &sample_mapping(),
        MatcherConfig {
            confidence_threshold: 0.9,
            ..MatcherConfig::default()
        },
    );

    assert!(!strict.match_query("almost hello").await.is_accepted());
}

#[tokio::test]
async fn test_match_scores_stay_within_cosine_bounds() {
    let dir = TempDir::new().unwrap();
    let service = build_service(
        &dir,
        sample_entries(),
        &sample_mapping(),
        MatcherConfig::default(),
    );

    for query in ["hello", "bad day", "thanks", "almost hello", "unknown"] {
        if let Some(score) = service.match_query(query).await.score() {
            assert!((-1.0..=1.0).contains(&score), "score {score} for {query}");
        }
    }
}
