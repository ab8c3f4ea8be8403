// src/handlers/markup.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        markup::{RenderResponse, SanitizeHtmlRequest},
        security::SanitizedResponse,
    },
    utils::html::{HtmlSanitizer, SafeHtml},
};

/// Filters untrusted HTML through the allow-list policy.
///
/// Caller allow-lists are optional; the deny-list cannot be overridden.
#[utoipa::path(
    post,
    path = "/api/sanitize/html",
    request_body = SanitizeHtmlRequest,
    responses(
        (status = 200, body = SanitizedResponse),
        (status = 400, description = "Malformed or oversized payload")
    )
)]
pub async fn sanitize_html(
    State(sanitizer): State<Arc<dyn HtmlSanitizer>>,
    payload: Result<Json<SanitizeHtmlRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let safe = SafeHtml::sanitize(sanitizer.as_ref(), &payload.html, &payload.policy());
    tracing::debug!(
        input_bytes = payload.html.len(),
        output_bytes = safe.as_str().len(),
        "sanitized html"
    );

    Ok(Json(SanitizedResponse {
        sanitized: safe.into_inner(),
    }))
}

/// Sanitizes and wraps the result in a container element, ready for injection.
#[utoipa::path(
    post,
    path = "/api/sanitize/render",
    request_body = SanitizeHtmlRequest,
    responses(
        (status = 200, body = RenderResponse),
        (status = 400, description = "Malformed or oversized payload")
    )
)]
pub async fn render_html(
    State(sanitizer): State<Arc<dyn HtmlSanitizer>>,
    payload: Result<Json<SanitizeHtmlRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let markup = SafeHtml::sanitize(sanitizer.as_ref(), &payload.html, &payload.policy())
        .render(payload.class_name.as_deref());

    Ok(Json(RenderResponse { markup }))
}
