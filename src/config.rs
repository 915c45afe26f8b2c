//! Configuration file management for recallchat
//!
//! This module handles reading and writing configuration values to ~/.recallchat/config.toml
//! Configuration values can be overridden by environment variables.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::env::{corpus as env_corpus, embedding as env_embedding, server as env_server};
use crate::error::RecallChatError;

/// Configuration structure matching config.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub moderation: ModerationConfig,
    #[serde(default)]
    pub embedding: EmbeddingSettings,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CorpusConfig {
    /// Path to the corpus table file. Defaults to ~/.recallchat/corpus.csv
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Minimum similarity for accepting a stored response (strict greater-than)
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,
    /// When false, low-confidence queries get a retry prompt instead of a
    /// teaching invitation
    #[serde(default = "default_enabled")]
    pub teaching_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Additional blocklist patterns appended to the built-in set
    #[serde(default)]
    pub extra_patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingSettings {
    /// Embedding model name, parsed by `embedding::EmbeddingModel`
    #[serde(default = "default_embedding_model")]
    pub model: String,
    /// Directory where downloaded models are cached
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_confidence_threshold() -> f32 {
    0.5
}

fn default_enabled() -> bool {
    true
}

fn default_embedding_model() -> String {
    "all-minilm-l6-v2".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            teaching_enabled: default_enabled(),
        }
    }
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            extra_patterns: Vec::new(),
        }
    }
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model: default_embedding_model(),
            cache_dir: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Get the config file path (~/.recallchat/config.toml)
    pub fn get_config_path() -> Result<PathBuf> {
        Ok(get_data_dir()?.join("config.toml"))
    }

    /// Load configuration from file, then apply environment overrides.
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        let mut config = if config_path.exists() {
            let contents = fs::read_to_string(&config_path).with_context(|| {
                format!("Failed to read config file: {}", config_path.display())
            })?;

            toml::from_str(&contents).with_context(|| {
                format!("Failed to parse config file: {}", config_path.display())
            })?
        } else {
            Self::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    /// Resolve the corpus file path with priority:
    /// environment variable > config file > default location
    pub fn resolve_corpus_path(&self) -> Result<PathBuf> {
        if let Ok(path) = std::env::var(env_corpus::CORPUS_FILE) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }

        if let Some(ref path) = self.corpus.path {
            return Ok(path.clone());
        }

        Ok(get_data_dir()?.join("corpus.csv"))
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(model) = std::env::var(env_embedding::MODEL) {
            if !model.is_empty() {
                self.embedding.model = model;
            }
        }

        if let Ok(dir) = std::env::var(env_embedding::MODEL_DIR) {
            if !dir.is_empty() {
                self.embedding.cache_dir = Some(PathBuf::from(dir));
            }
        }

        if let Ok(host) = std::env::var(env_server::HOST) {
            if !host.is_empty() {
                self.server.host = host;
            }
        }

        if let Ok(port) = std::env::var(env_server::PORT) {
            if !port.is_empty() {
                self.server.port = port
                    .parse()
                    .with_context(|| format!("Invalid {} value: {}", env_server::PORT, port))?;
            }
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> std::result::Result<(), RecallChatError> {
        let threshold = self.matcher.confidence_threshold;
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(RecallChatError::validation(
                "matcher.confidence_threshold",
                "must be a finite value between 0.0 and 1.0",
            ));
        }

        Ok(())
    }

    /// Get a config value by key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "corpus-path" | "corpus_path" => self
                .corpus
                .path
                .as_ref()
                .map(|p| p.display().to_string()),
            "confidence-threshold" | "confidence_threshold" => {
                Some(self.matcher.confidence_threshold.to_string())
            }
            "teaching-enabled" | "teaching_enabled" => {
                Some(self.matcher.teaching_enabled.to_string())
            }
            "moderation-enabled" | "moderation_enabled" => {
                Some(self.moderation.enabled.to_string())
            }
            "embedding-model" | "embedding_model" => Some(self.embedding.model.clone()),
            "server-host" | "server_host" => Some(self.server.host.clone()),
            "server-port" | "server_port" => Some(self.server.port.to_string()),
            _ => None,
        }
    }

    /// Set a config value by key
    pub fn set(&mut self, key: &str, value: String) -> Result<()> {
        match key {
            "corpus-path" | "corpus_path" => {
                self.corpus.path = Some(PathBuf::from(value));
            }
            "confidence-threshold" | "confidence_threshold" => {
                self.matcher.confidence_threshold = value
                    .parse()
                    .with_context(|| format!("Invalid threshold value: {}", value))?;
                self.validate()?;
            }
            "teaching-enabled" | "teaching_enabled" => {
                self.matcher.teaching_enabled = value
                    .parse()
                    .with_context(|| format!("Invalid boolean value: {}", value))?;
            }
            "moderation-enabled" | "moderation_enabled" => {
                self.moderation.enabled = value
                    .parse()
                    .with_context(|| format!("Invalid boolean value: {}", value))?;
            }
            "embedding-model" | "embedding_model" => {
                self.embedding.model = value;
            }
            "server-host" | "server_host" => {
                self.server.host = value;
            }
            "server-port" | "server_port" => {
                self.server.port = value
                    .parse()
                    .with_context(|| format!("Invalid port value: {}", value))?;
            }
            _ => anyhow::bail!("Unknown config key: {}", key),
        }
        Ok(())
    }

    /// Unset (reset) a config value by key
    pub fn unset(&mut self, key: &str) -> Result<()> {
        match key {
            "corpus-path" | "corpus_path" => {
                self.corpus.path = None;
            }
            "confidence-threshold" | "confidence_threshold" => {
                self.matcher.confidence_threshold = default_confidence_threshold();
            }
            "teaching-enabled" | "teaching_enabled" => {
                self.matcher.teaching_enabled = default_enabled();
            }
            "moderation-enabled" | "moderation_enabled" => {
                self.moderation.enabled = default_enabled();
            }
            "embedding-model" | "embedding_model" => {
                self.embedding.model = default_embedding_model();
            }
            "server-host" | "server_host" => {
                self.server.host = default_host();
            }
            "server-port" | "server_port" => {
                self.server.port = default_port();
            }
            _ => anyhow::bail!("Unknown config key: {}", key),
        }
        Ok(())
    }

    /// Get all config values as key-value pairs
    pub fn list(&self) -> Vec<(String, String)> {
        let mut items = Vec::new();

        if let Some(ref path) = self.corpus.path {
            items.push(("corpus-path".to_string(), path.display().to_string()));
        }
        items.push((
            "confidence-threshold".to_string(),
            self.matcher.confidence_threshold.to_string(),
        ));
        items.push((
            "teaching-enabled".to_string(),
            self.matcher.teaching_enabled.to_string(),
        ));
        items.push((
            "moderation-enabled".to_string(),
            self.moderation.enabled.to_string(),
        ));
        items.push(("embedding-model".to_string(), self.embedding.model.clone()));
        items.push(("server-host".to_string(), self.server.host.clone()));
        items.push(("server-port".to_string(), self.server.port.to_string()));

        items
    }
}

/// Get the recallchat data directory (~/.recallchat)
pub fn get_data_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().context("Could not find home directory")?;
    Ok(home_dir.join(".recallchat"))
}
