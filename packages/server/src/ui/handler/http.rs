//! HTTP API endpoint handlers.

use axum::Json;

use crate::infrastructure::dto::http::HealthDto;

/// Liveness check. Exposes no room state.
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto {
        status: "OK".to_string(),
    })
}
