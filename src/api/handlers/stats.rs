/// Stats-related API handlers
use axum::extract::State;
use axum::Json;
use tracing::info;

use super::AppState;
use crate::api::error::ApiResult;
use crate::models::PropertyStats;

/// Get stats (GET /stats)
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<PropertyStats>> {
    info!("GET /stats");

    let services = state.services()?;
    let stats = services.store().stats().await?;

    Ok(Json(stats))
}
