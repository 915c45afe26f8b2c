//! Configuration for embedding generation.

use std::path::PathBuf;

use crate::config::EmbeddingSettings;
use crate::error::{RecallChatError, Result};

use super::models::EmbeddingModel;

/// Configuration for the embedding service.
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    /// The embedding model to use.
    pub model: EmbeddingModel,

    /// Directory to cache downloaded models.
    /// Defaults to `~/.recallchat/models/` if not specified.
    pub cache_dir: Option<PathBuf>,

    /// Whether to show download progress when fetching models.
    pub show_download_progress: bool,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: EmbeddingModel::AllMiniLML6V2,
            cache_dir: None,
            show_download_progress: true,
        }
    }
}

impl EmbeddingConfig {
    /// Create a new configuration with the specified model.
    pub fn new(model: EmbeddingModel) -> Self {
        Self {
            model,
            ..Default::default()
        }
    }

    /// Build a configuration from the application config section.
    pub fn from_settings(settings: &EmbeddingSettings) -> Result<Self> {
        let model: EmbeddingModel = settings
            .model
            .parse()
            .map_err(RecallChatError::invalid_config)?;

        Ok(Self {
            model,
            cache_dir: settings.cache_dir.clone(),
            show_download_progress: true,
        })
    }

    /// Set the cache directory for downloaded models.
    pub fn with_cache_dir(mut self, path: PathBuf) -> Self {
        self.cache_dir = Some(path);
        self
    }

    /// Set whether to show download progress.
    pub fn with_show_download_progress(mut self, show: bool) -> Self {
        self.show_download_progress = show;
        self
    }

    /// Get the cache directory, using default if not specified.
    pub fn get_cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".recallchat")
                .join("models")
        })
    }
}
