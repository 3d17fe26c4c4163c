use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::api::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(handlers::index))
        .route("/predict", post(handlers::predict))
        .route("/results", get(handlers::results))
        // Liveness probe
        .route("/health", get(handlers::health_handler))
        // Add state and request tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
