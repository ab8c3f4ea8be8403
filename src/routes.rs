// src/routes.rs

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::{
    handlers::{health, markup, security},
    models,
    state::AppState,
    utils::security::ValidationKind,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        security::sanitize_input,
        security::validate,
        security::issue_token,
        markup::sanitize_html,
        markup::render_html,
    ),
    components(schemas(
        models::security::TextRequest,
        models::security::SanitizedResponse,
        models::security::ValidationResponse,
        models::security::TokenResponse,
        models::markup::SanitizeHtmlRequest,
        models::markup::RenderResponse,
        ValidationKind,
    ))
)]
pub struct ApiDoc;

/// Assembles the main application router.
///
/// * Merges the sanitize, validate and token sub-routers.
/// * Applies global middleware (Trace, CORS, body limit, optional rate limit).
/// * Injects global state (Config + HTML sanitizer).
///
/// Rate limiting keys on the peer IP, so the server must be started with
/// `into_make_service_with_connect_info::<SocketAddr>()` when it is enabled.
pub fn create_router(state: AppState) -> Router {
    let config = &state.config;

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Skipping invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let sanitize_routes = Router::new()
        .route("/input", post(security::sanitize_input))
        .route("/html", post(markup::sanitize_html))
        .route("/render", post(markup::render_html));

    let mut router = Router::new()
        .route("/api/health", get(health::health))
        .route("/api-docs/openapi.json", get(health::openapi))
        .nest("/api/sanitize", sanitize_routes)
        .route("/api/validate/{kind}", post(security::validate))
        .route("/api/token", post(security::issue_token))
        // Global Middleware (applied from outside in)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    if let Some(replenish_secs) = config.rate_limit_replenish_secs {
        match GovernorConfigBuilder::default()
            .per_second(replenish_secs)
            .burst_size(config.rate_limit_burst)
            .finish()
        {
            Some(governor_conf) => {
                tracing::info!(
                    "Rate limiting enabled: burst {} per IP, one request replenished every {}s",
                    config.rate_limit_burst,
                    replenish_secs
                );
                router = router.layer(GovernorLayer::new(Arc::new(governor_conf)));
            }
            None => tracing::warn!("Invalid rate limit settings, rate limiting disabled"),
        }
    }

    router.with_state(state)
}
