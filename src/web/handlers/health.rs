use axum::{extract::State, Json};
use std::sync::Arc;

use crate::services::ChatService;

pub async fn health_check(State(service): State<Arc<ChatService>>) -> Json<serde_json::Value> {
    let stats = service.stats().await;

    Json(serde_json::json!({
        "status": "ok",
        "service": "recallchat",
        "entries": stats.entries,
        "dimensions": stats.dimensions,
        "model": stats.model,
    }))
}
