//! Gemini-backed query embedder

use std::sync::Arc;

use async_trait::async_trait;

use super::Embedder;
use crate::errors::Result;
use crate::llm::GeminiClient;

/// Embeds queries with a Gemini embedding model
#[derive(Debug, Clone)]
pub struct GeminiEmbedder {
    client: Arc<GeminiClient>,
    model: String,
}

impl GeminiEmbedder {
    #[must_use]
    pub const fn new(client: Arc<GeminiClient>, model: String) -> Self {
        Self { client, model }
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Embedder for GeminiEmbedder {
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        self.client.embed_content(&self.model, text).await
    }
}
