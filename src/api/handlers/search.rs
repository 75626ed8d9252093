/// Search API handlers
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::info;

use super::AppState;
use crate::api::error::ApiResult;
use crate::api::types::RawSearchResponse;
use crate::api::types::SearchRequest;
use crate::models::SearchResponse;

/// RAG property search (POST /search)
pub async fn search(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> ApiResult<Json<SearchResponse>> {
    let Json(request) = payload?;
    let query = request.validate()?;
    info!("POST /search - query: {}", query.query);

    let services = state.services()?;
    let response = services.pipeline().search(&query).await?;

    Ok(Json(response))
}

/// Vector search without generation (POST /search/raw)
pub async fn search_raw(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> ApiResult<Json<RawSearchResponse>> {
    let Json(request) = payload?;
    let query = request.validate()?;
    info!("POST /search/raw - query: {}", query.query);

    let services = state.services()?;
    let candidates = services
        .pipeline()
        .raw_search(&query.query, query.k_results)
        .await?;

    Ok(Json(RawSearchResponse {
        total_results: candidates.len(),
        results: candidates.into_iter().map(Into::into).collect(),
        query: query.query,
    }))
}
