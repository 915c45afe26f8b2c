//! Environment variable constants used throughout the application
//!
//! This module centralizes all environment variable names to ensure consistency
//! and make it easier to manage configuration across the codebase.

/// Logging configuration
pub mod logging {
    /// Log level configuration (e.g., "debug", "info", "warn", "error")
    pub const LOG_LEVEL: &str = "RECALLCHAT_LOG_LEVEL";

    /// Log file path for file-based logging
    pub const LOG_FILE: &str = "RECALLCHAT_LOG_FILE";

    /// Disable colored output (follows the NO_COLOR standard)
    pub const NO_COLOR: &str = "NO_COLOR";
}

/// Corpus storage configuration
pub mod corpus {
    /// Path to the corpus table file (overrides the config file value)
    pub const CORPUS_FILE: &str = "RECALLCHAT_CORPUS";
}

/// Embedding model configuration
pub mod embedding {
    /// Embedding model name (e.g., "all-minilm-l6-v2")
    pub const MODEL: &str = "RECALLCHAT_EMBEDDING_MODEL";

    /// Directory where downloaded models are cached
    pub const MODEL_DIR: &str = "RECALLCHAT_MODEL_DIR";
}

/// HTTP server configuration
pub mod server {
    /// Bind address for the HTTP server
    pub const HOST: &str = "RECALLCHAT_HOST";

    /// Bind port for the HTTP server
    pub const PORT: &str = "RECALLCHAT_PORT";
}
