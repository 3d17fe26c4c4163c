use axum::{extract::State, Json};

use crate::api::{state::AppState, types::HealthResponse};

/// GET /health -- lightweight liveness probe
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.model_label.to_string(),
        uptime_secs: state.uptime_seconds(),
    })
}
