//! HTTP server implementation

use std::time::Duration;

use axum::extract::Request;
use axum::extract::State;
use axum::middleware;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::api::error::ApiError;
use crate::api::handlers::AppState;
use crate::api::routes;
use crate::config::AppConfig;
use crate::config::ServerConfig;
use crate::errors::EstateRagError;
use crate::service::EstateRag;
use crate::Result;

/// Router with the middleware stack applied
pub fn build_app(state: AppState, server: &ServerConfig) -> Router {
    let mut app = routes::api_routes(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn_with_state(
            Duration::from_secs(server.request_timeout_secs),
            enforce_timeout,
        ));

    if server.enable_cors {
        info!("✅ CORS enabled");
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// Cap the whole request; dropping the handler future cancels any upstream call
async fn enforce_timeout(State(limit): State<Duration>, request: Request, next: Next) -> Response {
    let target = format!("{} {}", request.method(), request.uri().path());
    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            warn!("⏱️  {} timed out after {}s", target, limit.as_secs());
            ApiError(EstateRagError::GenerationUnavailable(format!(
                "request timed out after {}s",
                limit.as_secs()
            )))
            .into_response()
        }
    }
}

/// Start the API server.
///
/// The listener comes up immediately; services load in the background and
/// `/health` reports `database_loaded: false` until they are ready.
pub async fn serve_api(config: &AppConfig) -> Result<()> {
    info!("🚀 Starting Real Estate RAG API server...");

    let state = AppState::new();
    spawn_service_loader(config.clone(), state.clone());

    let app = build_app(state, &config.server);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 API server listening on http://{}", addr);
    info!("Available endpoints:");
    info!("  GET  /                     - API information");
    info!("  GET  /health               - Health check");
    info!("  POST /search               - RAG property search");
    info!("  POST /search/raw           - Vector search only");
    info!("  GET  /properties           - Browse properties");
    info!("  GET  /property/:id         - Get property by id");
    info!("  GET  /stats                - Statistics");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

fn spawn_service_loader(config: AppConfig, state: AppState) {
    tokio::spawn(async move {
        match EstateRag::from_config(&config).await {
            Ok(services) => {
                state.install(services);
                info!("✅ Services loaded; search endpoints are live");
            }
            Err(e) => {
                error!("❌ Failed to load services: {}", e);
                error!("Data endpoints will answer 503 until the server is restarted");
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
