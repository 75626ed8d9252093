//! Semantic retrieval against the listing vector index

use std::sync::Arc;

use tracing::debug;

use crate::embeddings::Embedder;
use crate::embeddings::VectorIndex;
use crate::errors::Result;
use crate::rag::Candidate;

/// Embeds the query and ranks listings by similarity
#[derive(Clone)]
pub struct Retriever {
    index: Arc<VectorIndex>,
    embedder: Arc<dyn Embedder>,
}

impl Retriever {
    #[must_use]
    pub fn new(index: Arc<VectorIndex>, embedder: Arc<dyn Embedder>) -> Self {
        Self { index, embedder }
    }

    #[must_use]
    pub fn index(&self) -> &VectorIndex {
        &self.index
    }

    /// Top `k` listings for `query`, ranked from 1
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<Candidate>> {
        debug!("Performing semantic search: {}", query);

        let query_embedding = self.embedder.embed_query(query).await?;
        let hits = self.index.search(&query_embedding, k)?;

        let candidates: Vec<Candidate> = hits
            .into_iter()
            .enumerate()
            .map(|(idx, (entry, score))| Candidate {
                rank: idx + 1,
                property_id: entry.property_id.clone(),
                page_content: entry.page_content.clone(),
                metadata: entry.metadata.clone(),
                score,
            })
            .collect();

        debug!("Retrieved {} candidates (k={})", candidates.len(), k);
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::embeddings::IndexEntry;

    struct Fixed(Vec<f32>);

    #[async_trait]
    impl Embedder for Fixed {
        async fn embed_query(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(self.0.clone())
        }
    }

    fn entry(id: &str, embedding: Vec<f32>) -> IndexEntry {
        IndexEntry {
            property_id: id.to_string(),
            page_content: format!("Project: {id}"),
            metadata: serde_json::Map::new(),
            embedding,
        }
    }

    #[tokio::test]
    async fn test_retrieve_ranks_from_one() {
        let index = VectorIndex::new(
            2,
            vec![entry("B", vec![0.0, 1.0]), entry("A", vec![1.0, 0.0])],
        )
        .unwrap();
        let retriever = Retriever::new(Arc::new(index), Arc::new(Fixed(vec![1.0, 0.2])));

        let candidates = retriever.retrieve("anything", 10).await.unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].rank, 1);
        assert_eq!(candidates[0].property_id, "A");
        assert_eq!(candidates[1].rank, 2);
        assert!(candidates[0].score >= candidates[1].score);
    }

    #[tokio::test]
    async fn test_retrieve_surfaces_dimension_mismatch() {
        let index = VectorIndex::new(2, vec![entry("A", vec![1.0, 0.0])]).unwrap();
        let retriever = Retriever::new(Arc::new(index), Arc::new(Fixed(vec![1.0])));
        assert!(retriever.retrieve("anything", 1).await.is_err());
    }
}
