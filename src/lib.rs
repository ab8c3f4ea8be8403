// src/lib.rs

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
pub mod utils;

// Library surface: the pure sanitization and validation layer.
pub use routes::create_router;
pub use utils::html::{
    AmmoniaSanitizer, HtmlSanitizer, MarkupPolicy, SafeHtml, SafeHtmlRenderer, escape_text,
    sanitize_html,
};
pub use utils::security::{
    ValidationKind, generate_verification_token, sanitize_input, validate_email, validate_name,
    validate_phone,
};
