/// API request handlers
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::OnceLock;

use axum::extract::State;
use axum::http::Method;
use axum::http::Uri;
use axum::Json;
use tracing::info;

use crate::api::error::ApiError;
use crate::api::types::HealthResponse;
use crate::api::types::RootResponse;
use crate::errors::EstateRagError;
use crate::errors::Result;
use crate::service::EstateRag;

pub mod properties;
pub mod search;
pub mod stats;

pub use properties::*;
pub use search::*;
pub use stats::*;

/// Shared application state.
///
/// Services are installed once, after the listener is already up; until
/// then every data endpoint answers 503.
#[derive(Clone, Default)]
pub struct AppState {
    services: Arc<OnceLock<Arc<EstateRag>>>,
}

impl AppState {
    /// State whose services are still loading
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// State with services already loaded
    #[must_use]
    pub fn with_services(services: EstateRag) -> Self {
        let state = Self::new();
        state.install(services);
        state
    }

    /// Install loaded services; returns false when already installed
    pub fn install(&self, services: EstateRag) -> bool {
        self.services.set(Arc::new(services)).is_ok()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.services.get().is_some()
    }

    pub fn services(&self) -> Result<Arc<EstateRag>> {
        self.services.get().cloned().ok_or_else(|| {
            EstateRagError::ServiceUnavailable("Service not initialized".to_string())
        })
    }
}

/// API information (GET /)
pub async fn root() -> Json<RootResponse> {
    let endpoints = [
        ("/health", "Check API health status"),
        ("/search", "Search for properties (POST)"),
        ("/search/raw", "Raw vector search results (POST)"),
        ("/properties", "Browse properties with pagination (GET)"),
        ("/property/{property_id}", "Get specific property by ID"),
        ("/stats", "Property database statistics (GET)"),
    ]
    .into_iter()
    .map(|(path, purpose)| (path.to_string(), purpose.to_string()))
    .collect::<BTreeMap<_, _>>();

    Json(RootResponse {
        message: "Welcome to Real Estate AI API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints,
    })
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    info!("GET /health");

    let response = if state.is_loaded() {
        HealthResponse {
            status: "healthy".to_string(),
            message: "All systems operational".to_string(),
            database_loaded: true,
        }
    } else {
        HealthResponse {
            status: "unhealthy".to_string(),
            message: "Services not initialized".to_string(),
            database_loaded: false,
        }
    };

    Json(response)
}

/// Unknown path
pub async fn route_not_found(method: Method, uri: Uri) -> ApiError {
    ApiError(EstateRagError::RouteNotFound(format!("{method} {}", uri.path())))
}

/// Known path, wrong method
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError(EstateRagError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_string(),
    })
}
