use axum::{Json, response::IntoResponse};
use serde_json::json;
use utoipa::OpenApi;

use crate::routes::ApiDoc;

/// Liveness probe.
#[utoipa::path(get, path = "/api/health", responses((status = 200, description = "Service is up")))]
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Serves the generated OpenAPI document.
pub async fn openapi() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
