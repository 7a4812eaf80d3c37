//! Capability traits for the external AI collaborators.
//!
//! The pipelines depend on these traits rather than on concrete HTTP
//! clients, so tests substitute deterministic fakes instead of performing
//! real network calls.

pub mod gemini;

use async_trait::async_trait;

use crate::types::SupportError;

pub use gemini::{
    GENERATION_FALLBACK, GeminiClient, GeminiEmbedder, GeminiGenerator, RATE_LIMIT_MESSAGE,
    build_support_prompt,
};

/// Converts text into a fixed-dimensionality embedding vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, SupportError>;
}

/// Produces a free-text answer for a question given retrieved context.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, question: &str, context: &str) -> Result<String, SupportError>;
}
