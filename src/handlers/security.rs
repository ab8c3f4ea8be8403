// src/handlers/security.rs

use axum::{
    Json,
    extract::{Path, rejection::JsonRejection},
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::security::{SanitizedResponse, TextRequest, TokenResponse, ValidationResponse},
    utils::security::{self, ValidationKind},
};

/// Strips script blocks from plain text and trims it.
#[utoipa::path(
    post,
    path = "/api/sanitize/input",
    request_body = TextRequest,
    responses(
        (status = 200, body = SanitizedResponse),
        (status = 400, description = "Malformed or oversized payload")
    )
)]
pub async fn sanitize_input(
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let sanitized = security::sanitize_input(&payload.text);
    tracing::debug!(
        removed_bytes = payload.text.len().saturating_sub(sanitized.len()),
        "sanitized text input"
    );

    Ok(Json(SanitizedResponse { sanitized }))
}

/// Checks text against a named format policy.
///
/// An ill-formed value is a `200` with `valid: false`, not an error.
/// Only an unknown policy name yields `404`.
#[utoipa::path(
    post,
    path = "/api/validate/{kind}",
    params(("kind" = String, Path, description = "email, phone or name")),
    request_body = TextRequest,
    responses(
        (status = 200, body = ValidationResponse),
        (status = 404, description = "Unknown validation kind")
    )
)]
pub async fn validate(
    Path(kind): Path<String>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let kind = ValidationKind::parse(&kind)
        .ok_or_else(|| AppError::NotFound(format!("Unknown validation kind '{}'", kind)))?;

    let Json(payload) = payload?;
    payload.validate()?;

    let valid = kind.check(&payload.text);
    // Verdict only; the value itself may be PII.
    tracing::debug!(?kind, valid, "validated input");

    Ok(Json(ValidationResponse { kind, valid }))
}

/// Issues an opaque token. Not suitable as a secret.
#[utoipa::path(post, path = "/api/token", responses((status = 200, body = TokenResponse)))]
pub async fn issue_token() -> impl IntoResponse {
    Json(TokenResponse {
        token: security::generate_verification_token(),
    })
}
