//! Semantic similarity — the optional embedding-based signal.
//!
//! The engine holds an `Option<Arc<dyn SemanticSimilarityProvider>>`. Whatever the
//! provider does (missing, slow, failing), the engine turns it into a
//! `SemanticOutcome` and never fails a score because of it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scoring::config::SemanticScoring;

pub mod embedding_client;

#[derive(Debug, Error)]
pub enum SemanticError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Embedding response contained no vectors")]
    EmptyEmbedding,

    #[error("Embedding dimensions differ: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("Similarity is not a finite number")]
    InvalidSimilarity,
}

/// Textual similarity between the candidate profile and a job, in `[0, 1]`
/// for typical providers (cosine similarity may dip below 0).
#[async_trait]
pub trait SemanticSimilarityProvider: Send + Sync {
    /// Short identifier recorded in the result metadata.
    fn name(&self) -> &str;

    async fn similarity(&self, profile_text: &str, job_text: &str) -> Result<f32, SemanticError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticMethod {
    /// No provider configured.
    Disabled,
    /// Description too short to compare meaningfully.
    InsufficientText,
    Embedding,
    Error,
    Timeout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticMetadata {
    pub method: SemanticMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The semantic signal for one call. `available == false` removes the semantic
/// weight from aggregation; `score` is then 0 and carries no meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticOutcome {
    pub available: bool,
    pub score: f64,
    pub metadata: SemanticMetadata,
}

impl SemanticOutcome {
    pub fn unavailable(method: SemanticMethod) -> Self {
        Self {
            available: false,
            score: 0.0,
            metadata: SemanticMetadata {
                method,
                provider: None,
                similarity: None,
                error: None,
            },
        }
    }

    pub fn failed(method: SemanticMethod, provider: &str, error: impl Into<String>) -> Self {
        let mut outcome = Self::unavailable(method);
        outcome.metadata.provider = Some(provider.to_string());
        outcome.metadata.error = Some(error.into());
        outcome
    }

    pub fn from_similarity(similarity: f64, provider: &str, scoring: &SemanticScoring) -> Self {
        Self {
            available: true,
            score: scoring.remap(similarity),
            metadata: SemanticMetadata {
                method: SemanticMethod::Embedding,
                provider: Some(provider.to_string()),
                similarity: Some((similarity * 1000.0).round() / 1000.0),
                error: None,
            },
        }
    }
}

/// Cosine similarity of two vectors; `None` when either has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<Option<f32>, SemanticError> {
    if a.len() != b.len() {
        return Err(SemanticError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(None);
    }
    Ok(Some(dot / (norm_a * norm_b)))
}
