//! Service wiring shared by the HTTP server and the CLI

use std::sync::Arc;

use tracing::info;

use crate::config::AppConfig;
use crate::database::PropertyStore;
use crate::embeddings::Embedder;
use crate::embeddings::GeminiEmbedder;
use crate::embeddings::VectorIndex;
use crate::errors::Result;
use crate::llm::GeminiClient;
use crate::llm::LlmService;
use crate::llm::ModelRotation;
use crate::rag::ContextAssembler;
use crate::rag::Retriever;
use crate::rag::SearchPipeline;

/// Loaded property store, vector index and generation backend
pub struct EstateRag {
    pipeline: SearchPipeline,
}

impl EstateRag {
    /// Load every dependency named in `config`.
    ///
    /// # Errors
    /// - Property database missing, unreadable or without its schema
    /// - Vector index missing or malformed
    /// - Gemini credential not configured
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let store = PropertyStore::connect(&config.database).await?;
        store.verify_schema_or_error().await?;

        let index = Arc::new(VectorIndex::load(&config.index.path).await?);

        let client = Arc::new(GeminiClient::new(&config.llm)?);
        let embedder = Arc::new(GeminiEmbedder::new(
            Arc::clone(&client),
            config.llm.embedding_model.clone(),
        ));
        let rotation = Arc::new(ModelRotation::new(config.llm.models.clone())?);
        let llm_service = LlmService::new(client, rotation);

        info!(
            "Services ready: {} indexed listings, models {:?}",
            index.len(),
            config.llm.models
        );

        Ok(Self::from_parts(
            store,
            index,
            embedder,
            llm_service,
            ContextAssembler::new(config.context.max_chars),
        ))
    }

    /// Assemble from already-built parts
    #[must_use]
    pub fn from_parts(
        store: PropertyStore,
        index: Arc<VectorIndex>,
        embedder: Arc<dyn Embedder>,
        llm_service: LlmService,
        context_assembler: ContextAssembler,
    ) -> Self {
        let retriever = Retriever::new(index, embedder);
        Self {
            pipeline: SearchPipeline::new(retriever, context_assembler, llm_service, store),
        }
    }

    #[must_use]
    pub const fn pipeline(&self) -> &SearchPipeline {
        &self.pipeline
    }

    #[must_use]
    pub const fn store(&self) -> &PropertyStore {
        self.pipeline.store()
    }
}
