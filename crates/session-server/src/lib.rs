pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

use state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Public routes
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/v1/auth/login", post(handlers::auth::login));

    // Routes that require a session cookie
    let session_routes = Router::new()
        .route("/api/v1/auth/logout", post(handlers::auth::logout))
        .route("/api/v1/session", get(handlers::session::show))
        .route(
            "/api/v1/session/attributes/{name}",
            get(handlers::session::get_attribute).put(handlers::session::set_attribute),
        );

    Router::new()
        .merge(public_routes)
        .merge(session_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
