//! Query embedding and the pre-built property vector index
//!
//! The index is produced offline: one entry per property listing, holding
//! the listing text that was embedded, its metadata and the embedding
//! itself. At query time only the query text is embedded, with
//! [`GeminiEmbedder`] or any other [`Embedder`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use estate_rag::config::AppConfig;
//! use estate_rag::embeddings::{Embedder, GeminiEmbedder, VectorIndex};
//! use estate_rag::llm::GeminiClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let client = Arc::new(GeminiClient::new(&config.llm)?);
//!     let embedder = GeminiEmbedder::new(client, config.llm.embedding_model.clone());
//!     let index = VectorIndex::load(&config.index.path).await?;
//!
//!     let query = embedder.embed_query("3BHK with lift").await?;
//!     for (entry, score) in index.search(&query, 5)? {
//!         println!("{} {:.3}", entry.property_id, score);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod index;

pub use client::GeminiEmbedder;
pub use index::IndexEntry;
pub use index::VectorIndex;

use async_trait::async_trait;

use crate::errors::Result;

/// Turns query text into an embedding comparable with the index entries
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>>;
}
