//! System endpoints

use axum::Json;

use streamlens_api::responses::HealthResponse;

/// Daemon health check
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Daemon is healthy", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
