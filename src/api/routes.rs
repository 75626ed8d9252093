//! API route definitions

use axum::routing::get;
use axum::routing::post;
use axum::Router;

use super::handlers::AppState;
use super::handlers::{
    self,
};

/// Create RESTful API router
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        // Info and health
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Search endpoints
        .route("/search", post(handlers::search))
        .route("/search/raw", post(handlers::search_raw))
        // Property endpoints
        .route("/properties", get(handlers::list_properties))
        .route("/property/:property_id", get(handlers::get_property))
        // Statistics
        .route("/stats", get(handlers::get_stats))
        // Routing errors keep the JSON error shape
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .fallback(handlers::route_not_found)
        .with_state(state)
}
