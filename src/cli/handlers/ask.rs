//! One-shot search handlers

use crate::cli::output::print_candidates;
use crate::cli::output::print_info;
use crate::cli::output::print_search_response;
use crate::rag::SearchQuery;
use crate::AppConfig;
use crate::EstateRag;
use crate::Result;

/// Handle `ask`: full search with generation
pub async fn handle_ask(
    config: &AppConfig,
    query: String,
    k: usize,
    temperature: f32,
    min_price: Option<i64>,
    max_price: Option<i64>,
    json: bool,
) -> Result<()> {
    let query = SearchQuery::new(query, k, temperature)?.with_price_bounds(min_price, max_price);

    print_info("Loading property store and vector index...");
    let estate = EstateRag::from_config(config).await?;

    let response = estate.pipeline().search(&query).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!();
        print_search_response(&response);
    }

    Ok(())
}

/// Handle `search`: retrieval only
pub async fn handle_search(config: &AppConfig, query: String, k: usize) -> Result<()> {
    let query = SearchQuery::new(query, k, crate::rag::pipeline::DEFAULT_TEMPERATURE)?;

    print_info("Loading property store and vector index...");
    let estate = EstateRag::from_config(config).await?;

    let candidates = estate
        .pipeline()
        .raw_search(&query.query, query.k_results)
        .await?;
    println!();
    print_candidates(&query.query, &candidates);

    Ok(())
}
