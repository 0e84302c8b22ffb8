use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::api::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub vector_store: String,
    pub documents: usize,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// Ready once the vector store answers and holds at least one document.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<ReadinessResponse>, StatusCode> {
    let count = state.chatbot.read().await.count().await;

    match count {
        Ok(documents) if documents > 0 => Ok(Json(ReadinessResponse {
            status: "ready".into(),
            vector_store: "connected".into(),
            documents,
        })),
        Ok(_) => Err(StatusCode::SERVICE_UNAVAILABLE),
        Err(e) => {
            tracing::warn!(error = %e, "Vector store unavailable");
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
