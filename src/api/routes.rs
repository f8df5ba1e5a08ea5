//! API route configuration.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use super::handlers;
use super::state::AppState;

/// Create the main API router with all routes.
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(public_routes())
        .nest("/api/playbooks", playbook_routes())
        .with_state(state)
}

/// Health and info routes.
fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/", get(handlers::api_info))
}

/// Playbook import, validation and rendering routes.
fn playbook_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/import-text", post(handlers::import_text))
        .route("/import-script-text", post(handlers::import_script_text))
        .route("/validate-yaml", post(handlers::validate_yaml))
        .route("/yaml", post(handlers::generate_yaml))
}
