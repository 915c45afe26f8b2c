use axum::{extract::State, Form, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::services::{ChatService, TeachResponse};

#[derive(Debug, Deserialize)]
pub struct TeachForm {
    pub query: String,
    pub response: String,
}

/// Store a taught pair and confirm with the stored response.
pub async fn teach(
    State(service): State<Arc<ChatService>>,
    Form(form): Form<TeachForm>,
) -> Json<TeachResponse> {
    Json(service.teach(&form.query, &form.response).await)
}

/// Decline to teach after a low-confidence match.
pub async fn skip(State(service): State<Arc<ChatService>>) -> Json<TeachResponse> {
    Json(service.skip().await)
}
