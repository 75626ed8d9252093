/// Property browsing handlers
use axum::extract::rejection::QueryRejection;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::Json;
use tracing::info;

use super::AppState;
use crate::api::error::ApiResult;
use crate::api::types::PropertiesParams;
use crate::api::types::PropertiesResponse;
use crate::errors::EstateRagError;
use crate::models::Property;

/// List properties (GET /properties)
pub async fn list_properties(
    State(state): State<AppState>,
    params: Result<Query<PropertiesParams>, QueryRejection>,
) -> ApiResult<Json<PropertiesResponse>> {
    let Query(params) = params?;
    let query = params.validate()?;
    info!(
        "GET /properties - limit: {}, offset: {}",
        query.limit, query.offset
    );

    let services = state.services()?;
    let (properties, total) = services.store().list_properties(&query).await?;

    Ok(Json(PropertiesResponse {
        total,
        limit: query.limit,
        offset: query.offset,
        count: properties.len(),
        properties,
    }))
}

/// Get property by id (GET /property/:property_id)
pub async fn get_property(
    State(state): State<AppState>,
    Path(property_id): Path<String>,
) -> ApiResult<Json<Property>> {
    info!("GET /property/{}", property_id);

    let services = state.services()?;
    let property = services
        .store()
        .get_property(&property_id)
        .await?
        .ok_or(EstateRagError::PropertyNotFound(property_id))?;

    Ok(Json(property))
}
