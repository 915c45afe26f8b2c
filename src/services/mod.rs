pub mod chat_service;

pub use chat_service::{
    ChatService, QueryResponse, ServiceStats, TeachResponse, BLOCKED_RESPONSE,
    DEFAULT_CONFIDENCE_THRESHOLD, DEGRADED_RESPONSE, RETRY_PROMPT,
};
