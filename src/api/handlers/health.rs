use crate::models::HealthStatus;
use axum::Json;

/// Liveness check.
///
/// GET /api/health
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "Server is running!".to_string(),
    })
}
