//! In-memory cosine-similarity index over pre-built listing embeddings

use std::cmp::Ordering;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::errors::EstateRagError;
use crate::errors::Result;

/// One embedded listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub property_id: String,
    /// Listing text the embedding was computed from
    pub page_content: String,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
    pub embedding: Vec<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct IndexFile {
    dimension: usize,
    entries: Vec<IndexEntry>,
}

/// Read-only vector index, shared by all requests without locking
#[derive(Debug)]
pub struct VectorIndex {
    dimension: usize,
    entries: Vec<IndexEntry>,
    norms: Vec<f32>,
}

impl VectorIndex {
    /// Build an index, rejecting entries whose embedding length differs from `dimension`
    pub fn new(dimension: usize, entries: Vec<IndexEntry>) -> Result<Self> {
        if dimension == 0 {
            return Err(EstateRagError::VectorIndex(
                "index dimension must be positive".to_string(),
            ));
        }

        for (position, entry) in entries.iter().enumerate() {
            if entry.property_id.trim().is_empty() {
                return Err(EstateRagError::VectorIndex(format!(
                    "entry {position} has an empty property_id"
                )));
            }
            if entry.embedding.len() != dimension {
                return Err(EstateRagError::VectorIndex(format!(
                    "entry {} ({}) has {} dimensions, expected {}",
                    position,
                    entry.property_id,
                    entry.embedding.len(),
                    dimension
                )));
            }
        }

        let norms = entries.iter().map(|e| l2_norm(&e.embedding)).collect();

        Ok(Self {
            dimension,
            entries,
            norms,
        })
    }

    /// Load an index file written by the data-preparation step
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            EstateRagError::VectorIndex(format!("cannot read {}: {e}", path.display()))
        })?;

        let file: IndexFile = tokio::task::spawn_blocking(move || serde_json::from_slice(&bytes))
            .await
            .map_err(|e| EstateRagError::Custom(format!("index parse task failed: {e}")))??;

        let index = Self::new(file.dimension, file.entries)?;
        tracing::info!(
            "Vector index loaded from {}: {} entries, {} dimensions",
            path.display(),
            index.len(),
            index.dimension()
        );
        Ok(index)
    }

    /// Write the index in the format [`VectorIndex::load`] reads
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = IndexFile {
            dimension: self.dimension,
            entries: self.entries.clone(),
        };
        std::fs::write(path, serde_json::to_vec(&file)?)?;
        Ok(())
    }

    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the `k` entries most similar to `query`, best first.
    ///
    /// No minimum score is applied; a small index yields weak matches too.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(&IndexEntry, f32)>> {
        if query.len() != self.dimension {
            return Err(EstateRagError::VectorIndex(format!(
                "query embedding has {} dimensions, index has {}",
                query.len(),
                self.dimension
            )));
        }

        let query_norm = l2_norm(query);
        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .zip(&self.norms)
            .enumerate()
            .map(|(idx, (entry, norm))| (idx, cosine(query, query_norm, &entry.embedding, *norm)))
            .collect();

        // Ties keep index order so repeated queries rank identically
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .map(|(idx, score)| (&self.entries[idx], score))
            .collect())
    }
}

fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

fn cosine(a: &[f32], norm_a: f32, b: &[f32], norm_b: f32) -> f32 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    dot / (norm_a * norm_b)
}
