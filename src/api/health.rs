//! Health check handler

use crate::config::ServiceSelection;
use axum::response::Json;
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "healthy" while the process serves requests
    pub status: String,
    /// Crate version
    pub version: String,
    /// Upload endpoints served by this process
    pub service: String,
}

/// GET /health - Report liveness and the served endpoints
pub async fn health_check(service: ServiceSelection) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        service: service.to_string(),
    })
}
