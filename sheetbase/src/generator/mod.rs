//! Synthetic record generation
//!
//! A [`DraftProvider`] hands back a batch of drafts; committing them is the
//! job of [`crate::bulk`].

pub mod gemini;

use async_trait::async_trait;
use shared::RecordDraft;
use std::sync::Arc;
use thiserror::Error;

pub use gemini::GeminiProvider;

#[derive(Debug, Error)]
pub enum GenerationError {
    /// No provider key configured; never retried
    #[error("Gemini API Key is missing")]
    MissingCredential,

    #[error("Provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("Malformed provider response: {0}")]
    Malformed(String),

    #[error("Provider returned no records")]
    Empty,
}

/// Source of candidate drafts
#[async_trait]
pub trait DraftProvider: Send + Sync {
    async fn generate(&self) -> Result<Vec<RecordDraft>, GenerationError>;
}

#[async_trait]
impl<T: DraftProvider + ?Sized> DraftProvider for Arc<T> {
    async fn generate(&self) -> Result<Vec<RecordDraft>, GenerationError> {
        (**self).generate().await
    }
}
