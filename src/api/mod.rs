//! API module
//!
//! Contains HTTP request handlers and the router that mounts them

pub mod health;
pub mod uploads;

use crate::config::IntakeConfig;
use crate::schema::{Projects, Resources};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

/// Build the router for the configured upload endpoints
///
/// Request tracing is layered on by the binary; CORS and the body limit are
/// part of the API itself.
pub fn router(config: &IntakeConfig) -> Router {
    let service = config.service;
    let mut router = Router::new().route("/health", get(move || health::health_check(service)));

    if service.serves_projects() {
        router = router.route(
            "/upload_project_file",
            post(uploads::upload_file::<Projects>),
        );
    }

    if service.serves_resources() {
        router = router.route(
            "/upload_resource_file",
            post(uploads::upload_file::<Resources>),
        );
    }

    router
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(CorsLayer::permissive())
}
