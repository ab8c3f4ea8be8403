// src/models/markup.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::html::MarkupPolicy;

/// DTO for sanitizing untrusted HTML.
/// Omitted allow-lists fall back to the defaults; the deny-list always applies.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SanitizeHtmlRequest {
    #[validate(length(max = 100000, message = "HTML must be at most 100000 characters."))]
    pub html: String,

    #[validate(length(max = 64, message = "At most 64 allowed tags."))]
    pub allowed_tags: Option<Vec<String>>,

    #[validate(length(max = 64, message = "At most 64 allowed attributes."))]
    pub allowed_attributes: Option<Vec<String>>,

    /// Only used by the render endpoint.
    #[validate(length(max = 200))]
    pub class_name: Option<String>,
}

impl SanitizeHtmlRequest {
    pub fn policy(&self) -> MarkupPolicy {
        MarkupPolicy::default()
            .with_tags(self.allowed_tags.as_ref())
            .with_attributes(self.allowed_attributes.as_ref())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RenderResponse {
    pub markup: String,
}
