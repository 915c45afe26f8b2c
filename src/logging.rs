use anyhow::Result;
use std::env;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry,
};

use crate::env::logging as env_vars;

/// Logging configuration for recallchat
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: Level,
    /// Optional file path for logging
    pub file_path: Option<PathBuf>,
    /// Whether to use ANSI colors
    pub use_colors: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            file_path: None,
            use_colors: true,
        }
    }
}

impl LoggingConfig {
    /// Create a new logging config with reasonable defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set file path for logging
    pub fn with_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Enable/disable ANSI colors
    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.use_colors = enabled;
        self
    }

    /// Create config from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(level_str) = env::var(env_vars::LOG_LEVEL) {
            config.level = match level_str.to_lowercase().as_str() {
                "error" => Level::ERROR,
                "warn" => Level::WARN,
                "info" => Level::INFO,
                "debug" => Level::DEBUG,
                "trace" => Level::TRACE,
                _ => Level::INFO,
            };
        }

        if let Ok(file_path) = env::var(env_vars::LOG_FILE) {
            config.file_path = Some(PathBuf::from(file_path));
        }

        // Follows the NO_COLOR convention
        if env::var(env_vars::NO_COLOR).is_ok() {
            config.use_colors = false;
        }

        config
    }

    /// Create a development config with debug logging
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            file_path: None,
            use_colors: true,
        }
    }

    /// Create a production config
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            file_path: Some(PathBuf::from("/var/log/recallchat/app.log")),
            use_colors: false,
        }
    }
}

/// Initialize logging with the given configuration
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let registry = Registry::default();

    let layer = fmt::layer()
        .with_ansi(config.use_colors)
        .with_level(true)
        .with_target(true)
        .with_filter(LevelFilter::from_level(config.level));

    registry.with(layer).init();

    tracing::info!(
        level = ?config.level,
        file_path = ?config.file_path,
        "Logging initialized"
    );

    Ok(())
}

/// Initialize simple logging for development
pub fn init_simple() -> Result<()> {
    init_logging(LoggingConfig::development())
}

/// Initialize logging from environment variables
pub fn init_from_env() -> Result<()> {
    init_logging(LoggingConfig::from_env())
}

/// Log error with context
pub fn log_error<E: std::fmt::Display>(error: &E, context: &str) {
    tracing::error!(error = %error, context = context, "Error occurred");
}

/// Log error with detailed context and category
pub fn log_error_detailed<E: std::fmt::Display>(
    error: &E,
    context: &str,
    category: &str,
    operation: &str,
) {
    tracing::error!(
        error = %error,
        context = context,
        category = category,
        operation = operation,
        "Detailed error occurred"
    );
}
