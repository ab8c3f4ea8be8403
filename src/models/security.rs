// src/models/security.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::security::ValidationKind;

/// DTO carrying a single piece of user text.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TextRequest {
    #[validate(length(max = 10000, message = "Text must be at most 10000 characters."))]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SanitizedResponse {
    pub sanitized: String,
}

/// Verdict for one named format policy.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidationResponse {
    pub kind: ValidationKind,
    pub valid: bool,
}

/// Opaque, non-cryptographic token.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}
