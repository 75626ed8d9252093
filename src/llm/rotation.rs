use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use crate::errors::EstateRagError;
use crate::errors::Result;

/// Round-robin model selector shared by all requests.
///
/// The counter advances once per call, so concurrent callers each get a
/// distinct slot and models are used evenly.
#[derive(Debug)]
pub struct ModelRotation {
    models: Vec<String>,
    counter: AtomicUsize,
}

impl ModelRotation {
    pub fn new(models: Vec<String>) -> Result<Self> {
        if models.is_empty() {
            return Err(EstateRagError::Validation(
                "at least one generation model is required".to_string(),
            ));
        }
        if let Some(blank) = models.iter().position(|m| m.trim().is_empty()) {
            return Err(EstateRagError::Validation(format!(
                "generation model #{blank} is blank"
            )));
        }

        Ok(Self {
            models,
            counter: AtomicUsize::new(0),
        })
    }

    /// Model for the next generation attempt
    pub fn next(&self) -> &str {
        let slot = self.counter.fetch_add(1, Ordering::Relaxed);
        &self.models[slot % self.models.len()]
    }

    /// Number of selections made so far
    pub fn calls(&self) -> usize {
        self.counter.load(Ordering::Relaxed)
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }
}
