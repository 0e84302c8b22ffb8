use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Largest number of snippets a single search may return.
pub const MAX_TOP_K: usize = 100;

/// Tunables of the retrieval pipeline, adjustable at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RagSettings {
    /// Upper bound, in characters, of a free-text chunk.
    pub chunk_size: usize,
    /// Minimum similarity score for a candidate to be kept.
    pub similarity_threshold: f32,
    pub top_k: usize,
    /// Raises retrieval diagnostics from `debug` to `info`.
    pub debug: bool,
    pub batch_size: usize,
}

impl Default for RagSettings {
    fn default() -> Self {
        Self {
            chunk_size: 600,
            similarity_threshold: 0.30,
            top_k: 3,
            debug: true,
            batch_size: 100,
        }
    }
}

impl RagSettings {
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(DomainError::validation(format!(
                "similarity_threshold must be within [0, 1], got {}",
                self.similarity_threshold
            )));
        }
        if !(1..=MAX_TOP_K).contains(&self.top_k) {
            return Err(DomainError::validation(format!(
                "top_k must be within [1, {MAX_TOP_K}], got {}",
                self.top_k
            )));
        }
        if self.chunk_size == 0 {
            return Err(DomainError::validation("chunk_size must be greater than 0"));
        }
        if self.batch_size == 0 {
            return Err(DomainError::validation("batch_size must be greater than 0"));
        }
        Ok(())
    }

    /// Applies `patch` only if the result is valid; otherwise leaves `self`
    /// untouched.
    pub fn apply(&mut self, patch: &SettingsPatch) -> Result<(), DomainError> {
        let mut next = self.clone();
        if let Some(debug) = patch.debug {
            next.debug = debug;
        }
        if let Some(threshold) = patch.similarity_threshold {
            next.similarity_threshold = threshold;
        }
        if let Some(top_k) = patch.top_k {
            next.top_k = top_k;
        }
        next.validate()?;
        *self = next;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsPatch {
    pub debug: Option<bool>,
    pub similarity_threshold: Option<f32>,
    pub top_k: Option<usize>,
}
