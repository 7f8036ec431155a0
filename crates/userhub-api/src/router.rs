//! Route definitions for the UserHub HTTP API.
//!
//! Account routes are mounted under `/api/v1/users`; the health check
//! lives at `/api/v1/health`. Anything else falls through to the static
//! file directory when one is configured.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, patch, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let server = &state.config.server;

    let api_routes = Router::new()
        .nest("/users", user_routes(server.upload_limit_bytes))
        .merge(health_routes());

    let mut router = Router::new().nest("/api/v1", api_routes);

    if !server.static_dir.is_empty() {
        router = router.fallback_service(ServeDir::new(&server.static_dir));
    }

    router
        .layer(DefaultBodyLimit::max(server.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors::build_cors_layer(&server.cors))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Registration, session, and self-service endpoints
fn user_routes(upload_limit: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/register",
            post(handlers::auth::register).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/refresh-token", post(handlers::auth::refresh))
        .route("/change-password", post(handlers::account::change_password))
        .route("/current-user", get(handlers::account::current_user))
        .route("/update-account", patch(handlers::account::update_account))
}

/// Liveness endpoint
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
