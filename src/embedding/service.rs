//! Embedding service for generating text embeddings.

use crate::error::{RecallChatError, Result};

use super::config::EmbeddingConfig;
use super::models::ModelInfo;

/// The opaque text-to-vector seam the matching engine works against.
///
/// Implementations must be deterministic for a fixed model: embedding the
/// same text twice yields bit-identical vectors, which keeps matching
/// reproducible and makes the full index rebuild after a teaching event
/// equivalent to an incremental append.
pub trait TextEmbedder: Send + Sync {
    /// Generate embeddings for multiple texts, one vector per input, in
    /// input order. An empty input slice yields an empty output.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// The fixed dimension of produced vectors.
    fn dimensions(&self) -> usize;

    /// Generate an embedding for a single text.
    fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        let mut embeddings = self.embed_batch(&[text])?;
        embeddings
            .pop()
            .ok_or_else(|| RecallChatError::embedding("no embedding returned"))
    }
}

/// Service for generating text embeddings using local models.
///
/// With the `semantic-search` feature this wraps FastEmbed-rs for real
/// sentence embeddings; models are downloaded on first use and cached
/// locally. Without the feature it produces deterministic hashed embeddings
/// of the same dimension, which keeps development and CI builds free of
/// model downloads. Hashed embeddings carry no semantic signal, so match
/// quality in that mode is only useful for exercising the engine.
pub struct EmbeddingService {
    info: ModelInfo,
    #[cfg(feature = "semantic-search")]
    model: fastembed::TextEmbedding,
}

impl EmbeddingService {
    /// Create a new embedding service with the given configuration.
    ///
    /// With `semantic-search` enabled this will download the model on first
    /// use if not already cached.
    #[cfg(feature = "semantic-search")]
    pub fn new(config: EmbeddingConfig) -> Result<Self> {
        let fastembed_model = Self::to_fastembed_model(&config.model);

        let init_options = fastembed::InitOptions::new(fastembed_model)
            .with_cache_dir(config.get_cache_dir())
            .with_show_download_progress(config.show_download_progress);

        let model = fastembed::TextEmbedding::try_new(init_options).map_err(|e| {
            RecallChatError::embedding(format!(
                "failed to initialize model {}: {}",
                config.model, e
            ))
        })?;

        Ok(Self {
            info: ModelInfo::from(config.model),
            model,
        })
    }

    /// Create a new embedding service with the given configuration.
    #[cfg(not(feature = "semantic-search"))]
    pub fn new(config: EmbeddingConfig) -> Result<Self> {
        Ok(Self {
            info: ModelInfo::from(config.model),
        })
    }

    /// Create a new embedding service with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(EmbeddingConfig::default())
    }

    /// Get information about the loaded model.
    pub fn model_info(&self) -> &ModelInfo {
        &self.info
    }

    /// Convert our model enum to FastEmbed's model enum.
    ///
    /// Quantized variants run on the same base FastEmbed model.
    #[cfg(feature = "semantic-search")]
    fn to_fastembed_model(model: &super::models::EmbeddingModel) -> fastembed::EmbeddingModel {
        use super::models::EmbeddingModel;
        use fastembed::EmbeddingModel as FastEmbedModel;

        match model {
            EmbeddingModel::AllMiniLML6V2 => FastEmbedModel::AllMiniLML6V2,
            EmbeddingModel::AllMiniLML6V2Q => FastEmbedModel::AllMiniLML6V2,
            EmbeddingModel::BGESmallENV15 => FastEmbedModel::BGESmallENV15,
            EmbeddingModel::BGESmallENV15Q => FastEmbedModel::BGESmallENV15,
        }
    }

    /// Deterministic hashed embedding: the text's hash seeds an LCG that
    /// fills the vector, which is then L2-normalized to unit length.
    #[cfg(not(feature = "semantic-search"))]
    fn hashed_embedding(&self, text: &str) -> Vec<f32> {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let seed = hasher.finish();

        let mut embedding = Vec::with_capacity(self.info.dimensions);
        let mut rng_state = seed;

        for _ in 0..self.info.dimensions {
            rng_state = rng_state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = (rng_state >> 32) as u32;
            // Normalize to [-1, 1] range
            let normalized = (value as f32 / u32::MAX as f32) * 2.0 - 1.0;
            embedding.push(normalized);
        }

        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut embedding {
                *value /= magnitude;
            }
        }

        embedding
    }
}

impl TextEmbedder for EmbeddingService {
    #[cfg(feature = "semantic-search")]
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        self.model
            .embed(texts.to_vec(), None)
            .map_err(|e| RecallChatError::embedding(format!("batch embedding failed: {}", e)))
    }

    #[cfg(not(feature = "semantic-search"))]
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.hashed_embedding(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.info.dimensions
    }
}
