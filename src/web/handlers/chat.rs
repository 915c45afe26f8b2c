use axum::{extract::State, Form, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::services::{ChatService, QueryResponse};

#[derive(Debug, Deserialize)]
pub struct ChatForm {
    pub query: String,
}

/// One chat turn. The service degrades internally, so a well-formed request
/// always gets a 200 with some response body.
pub async fn chat(
    State(service): State<Arc<ChatService>>,
    Form(form): Form<ChatForm>,
) -> Json<QueryResponse> {
    Json(service.submit_query(&form.query).await)
}
