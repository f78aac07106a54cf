//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP API endpoints for the Postline post board.
//! It includes:
//! - User API endpoints (signup, login)
//! - Post API endpoints (create, list, delete)
//! - Health endpoint
//! - OpenAPI document served through Swagger UI

pub mod health;
pub mod middleware;
pub mod openapi;
pub mod posts;
pub mod users;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa_swagger_ui::SwaggerUi;

pub use middleware::{ApiError, AppState, RequestStats};

/// Build the main API router
pub fn build_api_router(state: AppState) -> Router<AppState> {
    // Post routes need a valid bearer token
    let protected_routes = posts::router().route_layer(axum_middleware::from_fn_with_state(
        state.clone(),
        middleware::require_auth,
    ));

    Router::new()
        .merge(users::router())
        .merge(health::router())
        .merge(protected_routes)
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    // CORS configuration - bearer tokens only, no cookies
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .merge(build_api_router(state.clone()))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::build_openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Request stats middleware (outermost layer, runs for all requests)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::request_stats_middleware,
        ))
        .with_state(state)
}
