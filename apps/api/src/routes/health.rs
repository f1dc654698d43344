//! Liveness and database reachability.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::warn;

use crate::dto::HealthResponse;
use crate::AppState;

/// `GET /health`: 200 when the database answers, 503 otherwise.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    if state.db.health_check().await {
        let body = HealthResponse {
            status: "ok".to_string(),
            database: true,
        };
        return (StatusCode::OK, Json(body));
    }

    warn!("Health check failed: database unreachable");
    let body = HealthResponse {
        status: "degraded".to_string(),
        database: false,
    };
    (StatusCode::SERVICE_UNAVAILABLE, Json(body))
}
