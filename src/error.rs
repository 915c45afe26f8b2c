use thiserror::Error;

/// Custom error types for the recallchat service
#[derive(Error, Debug)]
pub enum RecallChatError {
    #[error("Corpus load error: {message}")]
    CorpusLoad { message: String },

    #[error("Corpus persist error: {message}")]
    CorpusPersist { message: String },

    #[error("Embedding error: {message}")]
    Embedding { message: String },

    #[error("Similarity error: {message}")]
    Similarity { message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl RecallChatError {
    /// Create a corpus load error
    pub fn corpus_load<S: Into<String>>(message: S) -> Self {
        Self::CorpusLoad {
            message: message.into(),
        }
    }

    /// Create a corpus persist error
    pub fn corpus_persist<S: Into<String>>(message: S) -> Self {
        Self::CorpusPersist {
            message: message.into(),
        }
    }

    /// Create an embedding error
    pub fn embedding<S: Into<String>>(message: S) -> Self {
        Self::Embedding {
            message: message.into(),
        }
    }

    /// Create a similarity computation error
    pub fn similarity<S: Into<String>>(message: S) -> Self {
        Self::Similarity {
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Check if this error may be absorbed at the request boundary by
    /// degrading to the fallback response. Load and configuration errors
    /// are startup preconditions and must abort instead.
    pub fn is_recoverable(&self) -> bool {
        match self {
            RecallChatError::CorpusPersist { .. } => true,
            RecallChatError::Embedding { .. } => true,
            RecallChatError::Similarity { .. } => true,
            RecallChatError::TaskJoin(_) => true,
            _ => false,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            RecallChatError::CorpusLoad { .. } => "corpus_load",
            RecallChatError::CorpusPersist { .. } => "corpus_persist",
            RecallChatError::Embedding { .. } => "embedding",
            RecallChatError::Similarity { .. } => "similarity",
            RecallChatError::InvalidConfig { .. } => "config",
            RecallChatError::Validation { .. } => "validation",
            RecallChatError::Io(_) => "io",
            RecallChatError::TaskJoin(_) => "task",
        }
    }
}

/// Result type alias for recallchat
pub type Result<T> = std::result::Result<T, RecallChatError>;
