//! Axum router setup for the Wayfinder server

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::{
    handlers::{find_path, get_buildings, health_check},
    ServerState,
};

/// Create the axum router with all routes
pub fn create_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/find-path", get(find_path))
        .route("/get-buildings", get(get_buildings))
        .route("/api/health", get(health_check))
        // The map UI is served from a different origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}
