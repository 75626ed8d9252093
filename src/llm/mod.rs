//! Structured answer generation
//!
//! Each request picks the next model from a shared [`ModelRotation`],
//! sends the prompt once and parses the reply into a [`StructuredAnswer`].
//! A rate-limited model is reported to the caller, not retried elsewhere.

pub mod gemini;
pub mod parser;
pub mod rotation;

use std::sync::Arc;

use async_trait::async_trait;

pub use gemini::GeminiClient;
pub use parser::parse_structured_answer;
pub use rotation::ModelRotation;

use crate::errors::Result;
use crate::models::StructuredAnswer;

/// A text generation backend addressed by model name
#[async_trait]
pub trait Generator: Send + Sync {
    /// Return the raw model output for `prompt`
    async fn generate(&self, model: &str, prompt: &str, temperature: f32) -> Result<String>;
}

/// Parsed answer together with the model that produced it
#[derive(Debug, Clone)]
pub struct Generation {
    pub answer: StructuredAnswer,
    pub model: String,
}

/// Rotates requests across models and parses their output
#[derive(Clone)]
pub struct LlmService {
    generator: Arc<dyn Generator>,
    rotation: Arc<ModelRotation>,
}

impl LlmService {
    #[must_use]
    pub fn new(generator: Arc<dyn Generator>, rotation: Arc<ModelRotation>) -> Self {
        Self {
            generator,
            rotation,
        }
    }

    #[must_use]
    pub fn rotation(&self) -> &ModelRotation {
        &self.rotation
    }

    /// Generate and parse one answer.
    ///
    /// Advances the rotation exactly once, whatever the outcome.
    pub async fn generate_answer(&self, prompt: &str, temperature: f32) -> Result<Generation> {
        let model = self.rotation.next().to_string();
        tracing::info!("Generating answer with model {}", model);

        let raw = self.generator.generate(&model, prompt, temperature).await?;
        let answer = parse_structured_answer(&raw, &model)?;

        tracing::debug!(
            "Model {} matched {} properties",
            model,
            answer.matching_projects.len()
        );

        Ok(Generation { answer, model })
    }
}
