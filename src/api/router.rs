use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::auth;
use super::blog;
use super::health;
use super::pages;
use super::state::AppState;
use super::users;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        // Health
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .nest("/auth", auth::create_auth_router())
        .nest("/api/users", users::create_users_router())
        .nest("/api/posts", blog::create_posts_router())
        .nest("/api/tags", blog::create_tags_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
