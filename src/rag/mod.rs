//! RAG (Retrieval-Augmented Generation) search over property listings
//!
//! A search runs in stages:
//! - Semantic retrieval of the top-k listings from the vector index
//! - Context assembly from the retrieved listing texts
//! - Structured answer generation with a rotating Gemini model
//! - Relational filtering of the matched ids by price, with optional sorting
//! - Response assembly from the surviving records
//!
//! # Examples
//!
//! ```rust,no_run
//! use estate_rag::config::AppConfig;
//! use estate_rag::rag::SearchQuery;
//! use estate_rag::EstateRag;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let estate = EstateRag::from_config(&config).await?;
//!
//!     let query = SearchQuery::new("3BHK under 1 crore with lift", 10, 0.2)?;
//!     let response = estate.pipeline().search(&query).await?;
//!     println!("{}", response.explanation);
//!     println!("Matches: {}", response.total_results);
//!
//!     Ok(())
//! }
//! ```

pub mod assembler;
pub mod context;
pub mod pipeline;
pub mod prompts;
pub mod retriever;

pub use assembler::assemble_response;
pub use context::ContextAssembler;
pub use pipeline::SearchPipeline;
pub use pipeline::SearchQuery;
pub use retriever::Retriever;

use serde::Serialize;

/// A listing returned by semantic retrieval
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    /// 1-based position in the retrieval ranking
    pub rank: usize,
    pub property_id: String,
    pub page_content: String,
    pub metadata: serde_json::Map<String, serde_json::Value>,
    /// Cosine similarity to the query
    pub score: f32,
}
