//! API request and response types

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::errors::EstateRagError;
use crate::errors::Result;
use crate::models::Property;
use crate::models::PropertyListQuery;
use crate::rag::pipeline::DEFAULT_K_RESULTS;
use crate::rag::pipeline::DEFAULT_TEMPERATURE;
use crate::rag::Candidate;
use crate::rag::SearchQuery;

pub const DEFAULT_PAGE_LIMIT: i64 = 50;
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Property search request, shared by `/search` and `/search/raw`
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default = "default_k_results")]
    pub k_results: i64,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default)]
    pub min_price: Option<i64>,
    #[serde(default)]
    pub max_price: Option<i64>,
}

fn default_k_results() -> i64 {
    DEFAULT_K_RESULTS as i64
}

fn default_temperature() -> f64 {
    f64::from(DEFAULT_TEMPERATURE)
}

impl SearchRequest {
    pub fn validate(self) -> Result<SearchQuery> {
        let k_results = usize::try_from(self.k_results).map_err(|_| {
            EstateRagError::Validation(format!(
                "k_results must be a positive integer, got {}",
                self.k_results
            ))
        })?;
        if !self.temperature.is_finite() {
            return Err(EstateRagError::Validation(
                "temperature must be a finite number".to_string(),
            ));
        }

        Ok(SearchQuery::new(self.query, k_results, self.temperature as f32)?
            .with_price_bounds(self.min_price, self.max_price))
    }
}

/// Query string of `GET /properties`
#[derive(Debug, Deserialize)]
pub struct PropertiesParams {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
    #[serde(default)]
    pub min_price: Option<i64>,
    #[serde(default)]
    pub max_price: Option<i64>,
}

impl PropertiesParams {
    pub fn validate(self) -> Result<PropertyListQuery> {
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(EstateRagError::Validation(format!(
                "limit must be between 1 and {MAX_PAGE_LIMIT}, got {limit}"
            )));
        }
        let offset = self.offset.unwrap_or(0);
        if offset < 0 {
            return Err(EstateRagError::Validation(format!(
                "offset must not be negative, got {offset}"
            )));
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(EstateRagError::InvalidFilter { min, max });
            }
        }

        Ok(PropertyListQuery {
            limit,
            offset,
            min_price: self.min_price,
            max_price: self.max_price,
        })
    }
}

/// `GET /` response
#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    pub endpoints: BTreeMap<String, String>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub database_loaded: bool,
}

/// One retrieval hit in a raw search
#[derive(Debug, Serialize, Deserialize)]
pub struct RawSearchResult {
    pub rank: usize,
    pub property_id: String,
    pub page_content: String,
    pub metadata: serde_json::Map<String, serde_json::Value>,
    pub score: f32,
}

impl From<Candidate> for RawSearchResult {
    fn from(candidate: Candidate) -> Self {
        Self {
            rank: candidate.rank,
            property_id: candidate.property_id,
            page_content: candidate.page_content,
            metadata: candidate.metadata,
            score: candidate.score,
        }
    }
}

/// `POST /search/raw` response
#[derive(Debug, Serialize, Deserialize)]
pub struct RawSearchResponse {
    pub query: String,
    pub total_results: usize,
    pub results: Vec<RawSearchResult>,
}

/// `GET /properties` response
#[derive(Debug, Serialize, Deserialize)]
pub struct PropertiesResponse {
    /// Rows matching the bounds, across all pages
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub count: usize,
    pub properties: Vec<Property>,
}
