use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use recallchat::config::MatcherConfig;
use recallchat::corpus::table::CORPUS_HEADER;
use recallchat::corpus::CorpusStore;
use recallchat::embedding::TextEmbedder;
use recallchat::services::ChatService;
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

fn fixture_embedder() -> Arc<FixtureEmbedder> {
    let mapping: Vec<(&str, &[f32])> = vec![
        ("hello", &[1.0, 0.0, 0.0]),
        ("thanks", &[0.0, 1.0, 0.0]),
        ("does it rain", &[0.0, 0.0, 1.0]),
    ];

    Arc::new(FixtureEmbedder::new(&mapping))
}

fn write_seed_corpus(path: &Path) {
    let content = "Query,Response,neg,neu,pos,compound\n\
                   hello,hi there!,0.0,0.7,0.3,0.3\n\
                   thanks,you're welcome,0.0,1.0,0.0,0.0\n";
    fs::write(path, content).unwrap();
}

fn service_at(path: &Path) -> ChatService {
    let store = CorpusStore::load(path).unwrap();

    ChatService::with_parts(store, fixture_embedder(), None, MatcherConfig::default()).unwrap()
}

#[tokio::test]
async fn test_full_teach_cycle_survives_restart() {
    let dir = TempDir::new().unwrap();
    let corpus_path = dir.path().join("corpus.csv");
    write_seed_corpus(&corpus_path);

    // First run: the query is unknown, gets taught, then answers
    let service = service_at(&corpus_path);

    let first = service.submit_query("does it rain").await;
    assert_eq!(first.waiting_for_teaching, Some(true));

    let taught = service.teach("does it rain", "take an umbrella").await;
    assert_eq!(taught.response, "take an umbrella");

    let second = service.submit_query("does it rain").await;
    assert_eq!(second.response.as_deref(), Some("take an umbrella"));
    assert!(second.score.unwrap() > 0.99);

    drop(service);

    // Second run: a fresh service over the same file re-encodes the taught
    // entry and still answers
    let restarted = service_at(&corpus_path);

    assert_eq!(restarted.corpus_len().await, 3);
    let after_restart = restarted.submit_query("Does It Rain").await;
    assert_eq!(after_restart.response.as_deref(), Some("take an umbrella"));
}

#[tokio::test]
async fn test_taught_row_lands_in_the_file_as_written() {
    let dir = TempDir::new().unwrap();
    let corpus_path = dir.path().join("corpus.csv");
    write_seed_corpus(&corpus_path);

    let service = service_at(&corpus_path);
    service.teach("does it rain", "take an umbrella").await;

    let content = fs::read_to_string(&corpus_path).unwrap();
    let mut lines = content.lines();

    assert_eq!(lines.next(), Some(CORPUS_HEADER));
    assert!(content.contains("does it rain,take an umbrella,0,0.8,0.2,0.4"));
}

#[tokio::test]
async fn test_failed_persist_leaves_service_consistent() {
    let dir = TempDir::new().unwrap();
    let corpus_path = dir.path().join("corpus.csv");
    write_seed_corpus(&corpus_path);

    let store = CorpusStore::load(&corpus_path).unwrap();
    let service =
        ChatService::with_parts(store, fixture_embedder(), None, MatcherConfig::default())
            .unwrap();

    // Make the next persist fail by replacing the corpus file's directory
    // entry with a directory of the same name
    fs::remove_file(&corpus_path).unwrap();
    fs::create_dir(&corpus_path).unwrap();

    let reply = service.teach("does it rain", "take an umbrella").await;

    // Degraded to the safest response, nothing stored in memory
    assert_eq!(reply.response, "you're welcome");
    assert_eq!(service.corpus_len().await, 2);

    // Matching still works against the unchanged index
    let hello = service.submit_query("hello").await;
    assert_eq!(hello.response.as_deref(), Some("hi there!"));
}

#[tokio::test]
async fn test_teaching_applies_to_concurrent_readers() {
    let dir = TempDir::new().unwrap();
    let corpus_path = dir.path().join("corpus.csv");
    write_seed_corpus(&corpus_path);

    let service = Arc::new(service_at(&corpus_path));

    let writer = Arc::clone(&service);
    let teach_task =
        tokio::spawn(async move { writer.teach("does it rain", "take an umbrella").await });

    // Concurrent reads during the teach see either the old or the new corpus
    for _ in 0..10 {
        let reply = service.submit_query("hello").await;
        assert_eq!(reply.response.as_deref(), Some("hi there!"));
    }

    teach_task.await.unwrap();

    assert_eq!(service.corpus_len().await, 3);
    let taught = service.submit_query("does it rain").await;
    assert_eq!(taught.response.as_deref(), Some("take an umbrella"));
}
