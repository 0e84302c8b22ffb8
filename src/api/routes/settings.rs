use axum::{extract::State, http::StatusCode, Json};

use crate::api::routes::error_status;
use crate::api::state::AppState;
use crate::application::{RagSettings, SettingsPatch};

pub async fn get_settings(State(state): State<AppState>) -> Result<Json<RagSettings>, StatusCode> {
    state
        .chatbot
        .read()
        .await
        .settings()
        .map(Json)
        .map_err(|e| error_status(&e))
}

pub async fn update_settings(
    State(state): State<AppState>,
    Json(patch): Json<SettingsPatch>,
) -> Result<Json<RagSettings>, StatusCode> {
    state
        .chatbot
        .read()
        .await
        .update_settings(&patch)
        .map(Json)
        .map_err(|e| {
            tracing::warn!(error = %e, "Settings update rejected");
            error_status(&e)
        })
}
