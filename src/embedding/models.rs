//! Supported embedding models and their metadata.

use std::fmt;

/// Supported embedding models.
///
/// These map to FastEmbed model variants. Quantized versions (with Q suffix)
/// are smaller and faster but may have slightly lower quality. The corpus
/// match quality was tuned against All MiniLM L6 v2, which is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingModel {
    /// All MiniLM L6 v2 - Fast and lightweight.
    /// 384 dimensions, ~23MB model size.
    AllMiniLML6V2,

    /// All MiniLM L6 v2 (Quantized) - Fastest option.
    /// 384 dimensions, ~12MB model size.
    AllMiniLML6V2Q,

    /// BGE Small English v1.5 - Good balance of quality and speed.
    /// 384 dimensions, ~33MB model size.
    BGESmallENV15,

    /// BGE Small English v1.5 (Quantized) - Faster, smaller.
    /// 384 dimensions, ~17MB model size.
    BGESmallENV15Q,
}

impl EmbeddingModel {
    /// Get the number of dimensions for this model's embeddings.
    pub fn dimensions(&self) -> usize {
        match self {
            Self::AllMiniLML6V2 | Self::AllMiniLML6V2Q => 384,
            Self::BGESmallENV15 | Self::BGESmallENV15Q => 384,
        }
    }

    /// Check if this is a quantized model variant.
    pub fn is_quantized(&self) -> bool {
        matches!(self, Self::AllMiniLML6V2Q | Self::BGESmallENV15Q)
    }

    /// Get the model name as used by FastEmbed.
    pub fn fastembed_name(&self) -> &'static str {
        match self {
            Self::AllMiniLML6V2 | Self::AllMiniLML6V2Q => {
                "sentence-transformers/all-MiniLM-L6-v2"
            }
            Self::BGESmallENV15 | Self::BGESmallENV15Q => "BAAI/bge-small-en-v1.5",
        }
    }
}

impl fmt::Display for EmbeddingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllMiniLML6V2 => write!(f, "AllMiniLML6V2"),
            Self::AllMiniLML6V2Q => write!(f, "AllMiniLML6V2Q"),
            Self::BGESmallENV15 => write!(f, "BGESmallENV15"),
            Self::BGESmallENV15Q => write!(f, "BGESmallENV15Q"),
        }
    }
}

impl std::str::FromStr for EmbeddingModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "allminiml6v2" | "all-minilm-l6-v2" => Ok(Self::AllMiniLML6V2),
            "allminiml6v2q" | "all-minilm-l6-v2-q" => Ok(Self::AllMiniLML6V2Q),
            "bgesmallenv15" | "bge-small-en-v1.5" => Ok(Self::BGESmallENV15),
            "bgesmallenv15q" | "bge-small-en-v1.5-q" => Ok(Self::BGESmallENV15Q),
            _ => Err(format!("Unknown embedding model: {s}")),
        }
    }
}

/// Information about the loaded embedding model.
#[derive(Debug, Clone)]
pub struct ModelInfo {
    /// The model variant.
    pub model: EmbeddingModel,

    /// Human-readable model name.
    pub name: String,

    /// Number of embedding dimensions.
    pub dimensions: usize,

    /// Whether the model is quantized.
    pub quantized: bool,
}

impl From<EmbeddingModel> for ModelInfo {
    fn from(model: EmbeddingModel) -> Self {
        Self {
            name: model.to_string(),
            dimensions: model.dimensions(),
            quantized: model.is_quantized(),
            model,
        }
    }
}
