use axum::{Json, extract::State};
use std::sync::Arc;

use super::now_ms;
use crate::models::HealthResponse;
use crate::state::AppState;

pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        cooldown_remaining_seconds: state.cooldown.remaining_seconds(now_ms()),
    })
}
