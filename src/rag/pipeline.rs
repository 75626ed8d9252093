//! Complete search pipeline: Retrieve -> Generate -> Filter -> Assemble

use std::collections::HashSet;

use tracing::debug;
use tracing::info;

use crate::database::PropertyStore;
use crate::errors::EstateRagError;
use crate::errors::Result;
use crate::llm::LlmService;
use crate::models::PriceFilter;
use crate::models::SearchResponse;
use crate::rag::assemble_response;
use crate::rag::prompts::build_search_prompt;
use crate::rag::Candidate;
use crate::rag::ContextAssembler;
use crate::rag::Retriever;

pub const DEFAULT_K_RESULTS: usize = 10;
pub const MAX_K_RESULTS: usize = 50;
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const MAX_TEMPERATURE: f32 = 2.0;

/// A validated search request
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub query: String,
    pub k_results: usize,
    pub temperature: f32,
    /// Explicit bounds; they override whatever the model infers
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>, k_results: usize, temperature: f32) -> Result<Self> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(EstateRagError::Validation(
                "query must not be empty".to_string(),
            ));
        }
        if !(1..=MAX_K_RESULTS).contains(&k_results) {
            return Err(EstateRagError::Validation(format!(
                "k_results must be between 1 and {MAX_K_RESULTS}, got {k_results}"
            )));
        }
        if !temperature.is_finite() || !(0.0..=MAX_TEMPERATURE).contains(&temperature) {
            return Err(EstateRagError::Validation(format!(
                "temperature must be between 0.0 and {MAX_TEMPERATURE}, got {temperature}"
            )));
        }

        Ok(Self {
            query,
            k_results,
            temperature,
            min_price: None,
            max_price: None,
        })
    }

    /// Attach explicit price bounds
    #[must_use]
    pub fn with_price_bounds(mut self, min_price: Option<i64>, max_price: Option<i64>) -> Self {
        self.min_price = min_price;
        self.max_price = max_price;
        self
    }
}

/// End-to-end property search
pub struct SearchPipeline {
    retriever: Retriever,
    context_assembler: ContextAssembler,
    llm_service: LlmService,
    store: PropertyStore,
}

impl SearchPipeline {
    #[must_use]
    pub const fn new(
        retriever: Retriever,
        context_assembler: ContextAssembler,
        llm_service: LlmService,
        store: PropertyStore,
    ) -> Self {
        Self {
            retriever,
            context_assembler,
            llm_service,
            store,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &PropertyStore {
        &self.store
    }

    #[must_use]
    pub const fn retriever(&self) -> &Retriever {
        &self.retriever
    }

    /// Run a full search.
    ///
    /// Inverted explicit bounds fail before retrieval, so no model is called.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        info!("Processing search query: {}", query.query);

        PriceFilter {
            min_price: query.min_price,
            max_price: query.max_price,
            sort_by: None,
        }
        .check()?;

        debug!("Step 1: Retrieving candidates");
        let candidates = self.retriever.retrieve(&query.query, query.k_results).await?;

        debug!("Step 2: Assembling context");
        let (context, included) = self.context_assembler.assemble(&candidates);
        debug!(
            "Context holds {} of {} candidates ({} chars)",
            included,
            candidates.len(),
            context.chars().count()
        );

        debug!("Step 3: Generating structured answer");
        let prompt = build_search_prompt(&context, &query.query);
        let generation = self
            .llm_service
            .generate_answer(&prompt, query.temperature)
            .await?;
        let mut answer = generation.answer;

        if query.min_price.is_some() {
            answer.min_price = query.min_price;
        }
        if query.max_price.is_some() {
            answer.max_price = query.max_price;
        }
        let filter = answer.price_filter();

        debug!("Step 4: Filtering matched ids ({:?})", filter);
        let retrieved: HashSet<&str> = candidates.iter().map(|c| c.property_id.as_str()).collect();
        let mut seen = HashSet::new();
        let matched_ids: Vec<String> = answer
            .matching_projects
            .iter()
            .map(|m| m.id.clone())
            .filter(|id| retrieved.contains(id.as_str()) && seen.insert(id.clone()))
            .collect();
        if matched_ids.len() < answer.matching_projects.len() {
            debug!(
                "Dropped {} matches that were duplicated or not retrieved",
                answer.matching_projects.len() - matched_ids.len()
            );
        }
        let survivors = self.store.filter_ids(&matched_ids, &filter).await?;

        debug!("Step 5: Assembling response");
        let response = assemble_response(answer, &candidates, &survivors);

        info!(
            "Search answered by {}: {} results from {} retrieved",
            generation.model, response.total_results, response.total_retrieved
        );

        Ok(response)
    }

    /// Retrieval only, without generation or filtering
    pub async fn raw_search(&self, query: &str, k_results: usize) -> Result<Vec<Candidate>> {
        info!("Processing raw search: {}", query);
        self.retriever.retrieve(query, k_results).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_validation() {
        assert!(SearchQuery::new("3BHK", 1, 0.0).is_ok());
        assert!(SearchQuery::new("3BHK", MAX_K_RESULTS, MAX_TEMPERATURE).is_ok());

        assert!(SearchQuery::new("   ", 10, 0.2).is_err());
        assert!(SearchQuery::new("3BHK", 0, 0.2).is_err());
        assert!(SearchQuery::new("3BHK", 51, 0.2).is_err());
        assert!(SearchQuery::new("3BHK", 10, -0.1).is_err());
        assert!(SearchQuery::new("3BHK", 10, f32::NAN).is_err());
    }

    #[test]
    fn test_price_bounds_attach() {
        let query = SearchQuery::new("3BHK", 10, 0.2)
            .unwrap()
            .with_price_bounds(Some(1), Some(2));
        assert_eq!(query.min_price, Some(1));
        assert_eq!(query.max_price, Some(2));
    }
}
