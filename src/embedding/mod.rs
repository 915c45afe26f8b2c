//! Text embedding generation.
//!
//! The matching engine sees embeddings through the [`TextEmbedder`] trait.
//! The shipped [`EmbeddingService`] backs it with FastEmbed local models
//! when the `semantic-search` feature is enabled, and with deterministic
//! hashed vectors otherwise.

mod config;
mod models;
mod service;

pub use config::EmbeddingConfig;
pub use models::{EmbeddingModel, ModelInfo};
pub use service::{EmbeddingService, TextEmbedder};
