//! Chat matching and teaching service.
//!
//! `ChatService` owns the corpus store and its embedding index behind one
//! lock and exposes the three request operations: query matching, teaching,
//! and skip. Internal failures never surface to callers as errors; every
//! well-formed request gets some response.

use std::sync::Arc;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::config::{Config, MatcherConfig};
use crate::corpus::CorpusStore;
use crate::embedding::{EmbeddingConfig, EmbeddingService, TextEmbedder};
use crate::error::{RecallChatError, Result};
use crate::logging::log_error_detailed;
use crate::models::{CorpusEntry, MatchOutcome};
use crate::moderation::{ModerationPolicy, RegexBlocklist};
use crate::vector_index::VectorIndex;

/// Default acceptance threshold. A match must score strictly above it.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.5;

/// Refusal returned for blocked queries.
pub const BLOCKED_RESPONSE: &str = "I can't respond to that.";

/// Prompt returned on low confidence when teaching is disabled.
pub const RETRY_PROMPT: &str = "I'm not sure about that. Can you ask differently?";

/// Last-resort response when even the fallback entry is unavailable.
pub const DEGRADED_RESPONSE: &str = "Oops! Something went wrong.";

/// Wire shape of a chat answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waiting_for_teaching: Option<bool>,
}

impl QueryResponse {
    pub fn response_only<S: Into<String>>(response: S) -> Self {
        Self {
            response: Some(response.into()),
            score: None,
            waiting_for_teaching: None,
        }
    }

    pub fn with_score<S: Into<String>>(response: S, score: f32) -> Self {
        Self {
            response: Some(response.into()),
            score: Some(score),
            waiting_for_teaching: None,
        }
    }

    pub fn waiting_for_teaching() -> Self {
        Self {
            response: None,
            score: None,
            waiting_for_teaching: Some(true),
        }
    }
}

/// Wire shape of a teaching confirmation, also used by `skip`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeachResponse {
    pub response: String,
}

/// Corpus and model summary for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStats {
    pub entries: usize,
    pub dimensions: usize,
    pub model: String,
}

struct EngineState {
    store: CorpusStore,
    index: VectorIndex,
}

/// The retrieval engine.
///
/// Store and index always hold one vector per entry, in the same order. The
/// lock makes every teaching event atomic against concurrent matches: a
/// match observes the corpus either before or after a teach, never between
/// the store append and the index swap.
pub struct ChatService {
    state: RwLock<EngineState>,
    embedder: Arc<dyn TextEmbedder>,
    moderation: Option<Arc<dyn ModerationPolicy>>,
    confidence_threshold: f32,
    teaching_enabled: bool,
    model_name: String,
}

impl ChatService {
    /// Build the service from configuration: load the corpus, initialize the
    /// embedding backend, compile the moderation policy, encode the index.
    /// Any failure here is a startup failure.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let corpus_path = config.resolve_corpus_path()?;
        let store = CorpusStore::load(&corpus_path)
            .with_context(|| format!("Failed to load corpus from {}", corpus_path.display()))?;

        let embedding_config = EmbeddingConfig::from_settings(&config.embedding)?;
        let embedding_service =
            EmbeddingService::new(embedding_config).context("Failed to initialize embeddings")?;
        let model_name = embedding_service.model_info().name.clone();

        let moderation: Option<Arc<dyn ModerationPolicy>> = if config.moderation.enabled {
            Some(Arc::new(RegexBlocklist::with_extra_patterns(
                &config.moderation.extra_patterns,
            )?))
        } else {
            None
        };

        let service = Self::build(
            store,
            Arc::new(embedding_service),
            moderation,
            config.matcher.clone(),
            model_name,
        )?;

        Ok(service)
    }

    /// Assemble a service from parts. Used by tests and callers that bring
    /// their own embedder or moderation policy.
    pub fn with_parts(
        store: CorpusStore,
        embedder: Arc<dyn TextEmbedder>,
        moderation: Option<Arc<dyn ModerationPolicy>>,
        matcher: MatcherConfig,
    ) -> Result<Self> {
        Self::build(store, embedder, moderation, matcher, "custom".to_string())
    }

    fn build(
        store: CorpusStore,
        embedder: Arc<dyn TextEmbedder>,
        moderation: Option<Arc<dyn ModerationPolicy>>,
        matcher: MatcherConfig,
        model_name: String,
    ) -> Result<Self> {
        let queries = store.queries();
        let vectors = embedder.embed_batch(&queries)?;
        let index = VectorIndex::from_embeddings(embedder.dimensions(), vectors)?;

        info!(
            entries = store.len(),
            dimensions = index.dimensions(),
            model = %model_name,
            "Corpus index ready"
        );

        Ok(Self {
            state: RwLock::new(EngineState { store, index }),
            embedder,
            moderation,
            confidence_threshold: matcher.confidence_threshold,
            teaching_enabled: matcher.teaching_enabled,
            model_name,
        })
    }

    /// Match a query against the corpus.
    ///
    /// Empty input short-circuits to the fallback before moderation and
    /// encoding. Encoding happens outside the state lock; the similarity
    /// scan holds the read side, so it sees one consistent corpus snapshot.
    pub async fn match_query(&self, text: &str) -> MatchOutcome {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return self.fallback_outcome().await;
        }

        let normalized = trimmed.to_lowercase();

        if let Some(policy) = &self.moderation {
            if policy.is_blocked(&normalized) {
                warn!(length = normalized.len(), "Query blocked by moderation policy");
                return MatchOutcome::Blocked;
            }
        }

        let query_vector = match self.encode(normalized).await {
            Ok(vector) => vector,
            Err(e) => {
                log_error_detailed(&e, "failed to encode query", e.category(), "match_query");
                return self.fallback_outcome().await;
            }
        };

        let state = self.state.read().await;

        let best = match state.index.best_match(&query_vector) {
            Ok(best) => best,
            Err(e) => {
                log_error_detailed(&e, "similarity scan failed", e.category(), "match_query");
                return Self::fallback_from(&state);
            }
        };

        match best {
            Some(result) if result.score > self.confidence_threshold => {
                match state.store.get(result.index) {
                    Some(entry) => MatchOutcome::Accepted {
                        response: entry.response.clone(),
                        score: result.score,
                    },
                    None => {
                        let e = RecallChatError::similarity(format!(
                            "match index {} out of range for {} entries",
                            result.index,
                            state.store.len()
                        ));
                        log_error_detailed(&e, "index out of sync", e.category(), "match_query");
                        Self::fallback_from(&state)
                    }
                }
            }
            Some(result) => MatchOutcome::NeedsTeaching {
                best_score: result.score,
            },
            None => Self::fallback_from(&state),
        }
    }

    /// Handle one chat turn, mapped to the wire response shape.
    pub async fn submit_query(&self, text: &str) -> QueryResponse {
        match self.match_query(text).await {
            MatchOutcome::Blocked => QueryResponse::response_only(BLOCKED_RESPONSE),
            MatchOutcome::Accepted { response, score } => {
                QueryResponse::with_score(response, score)
            }
            MatchOutcome::NeedsTeaching { best_score } => {
                if self.teaching_enabled {
                    QueryResponse::waiting_for_teaching()
                } else {
                    QueryResponse::with_score(RETRY_PROMPT, best_score)
                }
            }
            MatchOutcome::Fallback { response } => QueryResponse::response_only(response),
        }
    }

    /// Store a corrective query/response pair and re-encode the index.
    ///
    /// Returns the stored response as confirmation. Degenerate input (empty
    /// query or response after trimming) and internal failures both degrade
    /// to the fallback response instead of storing anything.
    pub async fn teach(&self, query: &str, response: &str) -> TeachResponse {
        let entry = CorpusEntry::taught(query, response);
        if entry.query.is_empty() || entry.response.is_empty() {
            info!("Rejected teaching input with empty query or response");
            return self.fallback_teach_response().await;
        }

        let stored_response = entry.response.clone();

        match self.apply_teaching(entry).await {
            Ok(total) => {
                info!(entries = total, "Corpus extended by teaching");
                TeachResponse {
                    response: stored_response,
                }
            }
            Err(e) => {
                log_error_detailed(&e, "teaching failed", e.category(), "teach");
                self.fallback_teach_response().await
            }
        }
    }

    /// Decline to teach. The caller gets the safe fallback response.
    pub async fn skip(&self) -> TeachResponse {
        self.fallback_teach_response().await
    }

    /// Corpus and model summary.
    pub async fn stats(&self) -> ServiceStats {
        let state = self.state.read().await;

        ServiceStats {
            entries: state.store.len(),
            dimensions: state.index.dimensions(),
            model: self.model_name.clone(),
        }
    }

    /// Number of stored entries.
    pub async fn corpus_len(&self) -> usize {
        self.state.read().await.store.len()
    }

    /// The append + rebuild critical section. Holds the write lock across
    /// encode, persist, and swap so concurrent matches never observe a
    /// store/index length mismatch. Nothing is committed unless the whole
    /// extended query set encodes cleanly.
    async fn apply_teaching(&self, entry: CorpusEntry) -> Result<usize> {
        let mut state = self.state.write().await;

        let mut texts: Vec<String> = state
            .store
            .entries()
            .iter()
            .map(|e| e.query.clone())
            .collect();
        texts.push(entry.query.clone());

        let embedder = Arc::clone(&self.embedder);
        let vectors = tokio::task::spawn_blocking(move || {
            let refs: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();
            embedder.embed_batch(&refs)
        })
        .await??;

        let expected = state.store.len() + 1;
        if vectors.len() != expected {
            return Err(RecallChatError::embedding(format!(
                "encoder returned {} vectors for {} queries",
                vectors.len(),
                expected
            )));
        }
        let dimensions = state.index.dimensions();
        if vectors.iter().any(|v| v.len() != dimensions) {
            return Err(RecallChatError::embedding(
                "encoder returned vectors with unexpected dimensions",
            ));
        }

        state.store.append(entry)?;
        state.index.replace(vectors)?;

        Ok(state.store.len())
    }

    async fn encode(&self, text: String) -> Result<Vec<f32>> {
        let embedder = Arc::clone(&self.embedder);
        tokio::task::spawn_blocking(move || embedder.embed_text(&text)).await?
    }

    async fn fallback_outcome(&self) -> MatchOutcome {
        let state = self.state.read().await;
        Self::fallback_from(&state)
    }

    fn fallback_from(state: &EngineState) -> MatchOutcome {
        MatchOutcome::Fallback {
            response: Self::safest_response(state),
        }
    }

    async fn fallback_teach_response(&self) -> TeachResponse {
        let state = self.state.read().await;
        TeachResponse {
            response: Self::safest_response(&state),
        }
    }

    fn safest_response(state: &EngineState) -> String {
        state
            .store
            .safest_entry()
            .map(|entry| entry.response.clone())
            .unwrap_or_else(|| DEGRADED_RESPONSE.to_string())
    }
}
