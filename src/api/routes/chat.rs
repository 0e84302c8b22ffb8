use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::routes::error_status;
use crate::api::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub conversation_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub conversation_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SearchHit {
    pub text: String,
    pub score: f32,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: usize,
}

pub async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, StatusCode> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let response = state.chatbot.read().await.chat(message).await;

    Ok(Json(ChatResponse {
        response,
        conversation_id: request.conversation_id.unwrap_or_else(Uuid::new_v4),
    }))
}

pub async fn search_handler(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<Vec<SearchHit>>, StatusCode> {
    let (documents, scores) = state
        .chatbot
        .read()
        .await
        .search(&request.query, request.limit)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Search failed");
            error_status(&e)
        })?;

    Ok(Json(
        documents
            .into_iter()
            .zip(scores)
            .map(|(text, score)| SearchHit { text, score })
            .collect(),
    ))
}

pub async fn reset_handler(State(state): State<AppState>) -> Result<Json<CountResponse>, StatusCode> {
    let count = state.chatbot.write().await.reset().await.map_err(|e| {
        tracing::error!(error = %e, "Reset failed");
        error_status(&e)
    })?;

    Ok(Json(CountResponse { count }))
}

pub async fn count_handler(State(state): State<AppState>) -> Result<Json<CountResponse>, StatusCode> {
    let count = state.chatbot.read().await.count().await.map_err(|e| {
        tracing::error!(error = %e, "Count failed");
        error_status(&e)
    })?;

    Ok(Json(CountResponse { count }))
}
