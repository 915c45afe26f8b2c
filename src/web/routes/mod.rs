use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::services::ChatService;
use crate::web::handlers;

pub fn create_routes(service: Arc<ChatService>) -> Router {
    Router::new()
        .route("/chat", post(handlers::chat))
        .route("/teach", post(handlers::teach))
        .route("/skip", get(handlers::skip))
        .route("/health", get(handlers::health_check))
        .with_state(service)
}
