//! HTTP handlers module
//!
//! Contains the router, shared application state, and all endpoint logic

pub mod health;
pub mod tools;

use crate::config::Settings;
use crate::middleware::logging::request_logging_middleware;
use crate::services::{CompletionProvider, HttpCompletionClient, ToolQuotas};
use anyhow::Result;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

/// Application state
pub struct AppState {
    pub settings: Settings,
    pub quotas: ToolQuotas,
    pub provider: Arc<dyn CompletionProvider>,
}

/// Create application router with the HTTP generation client
pub async fn create_router(settings: Settings) -> Result<Router> {
    let provider = Arc::new(HttpCompletionClient::new(settings.provider.clone())?);
    create_router_with_provider(settings, provider)
}

/// Create application router with an injected generation provider
///
/// Tests use this to script completions without a network.
pub fn create_router_with_provider(
    settings: Settings,
    provider: Arc<dyn CompletionProvider>,
) -> Result<Router> {
    let quotas = ToolQuotas::from_config(&settings.quota);
    let max_request_size = settings.request.max_request_size;

    let cors = if settings.security.cors_enabled {
        let origins = &settings.security.allowed_origins;
        let allow_origin = if origins.iter().any(|o| o == "*") {
            AllowOrigin::any()
        } else {
            let values: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| o.parse().ok())
                .collect();
            AllowOrigin::list(values)
        };
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    let app_state = Arc::new(AppState {
        settings,
        quotas,
        provider,
    });

    let router = Router::new()
        .route("/api/tools/cover-letter", post(tools::generate_cover_letter))
        .route("/api/tools/salary-analysis", post(tools::analyze_salary))
        .route(
            "/api/tools/leadership-assessment",
            post(tools::assess_leadership),
        )
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .with_state(app_state)
        // Applied innermost-to-outermost; last `.layer` is the outermost,
        // preserving the original Trace → logging → CORS → body-limit order.
        .layer(RequestBodyLimitLayer::new(max_request_size))
        .layer(cors)
        .layer(axum::middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http());

    Ok(router)
}
