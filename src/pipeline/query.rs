//! Question answering: embed, retrieve, generate, format.

use std::sync::Arc;

use tracing::error;

use crate::ai::{Embedder, Generator};
use crate::format::format_answer;
use crate::stores::VectorStore;
use crate::types::SupportError;

/// Fixed answer used when the pipeline cannot produce anything better.
pub const NOT_FOUND_ANSWER: &str = "not found";

/// The retrieval-augmented answer pipeline.
pub struct SupportService {
    embedder: Arc<dyn Embedder>,
    generator: Arc<dyn Generator>,
    store: Arc<dyn VectorStore>,
    top_k: usize,
}

impl SupportService {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn Generator>,
        store: Arc<dyn VectorStore>,
        top_k: usize,
    ) -> Self {
        Self {
            embedder,
            generator,
            store,
            top_k,
        }
    }

    /// Answers `question` using the stored document chunks as context.
    ///
    /// An embedding failure aborts the pipeline. A retrieval failure (or an
    /// empty store) degrades to an empty context; generation is still
    /// attempted so the caller gets a best-effort answer. A blank generated
    /// answer becomes the fixed [`NOT_FOUND_ANSWER`].
    pub async fn answer(&self, question: &str) -> Result<String, SupportError> {
        let query_embedding = self.embedder.embed(question).await?;

        let context_chunks = match self
            .store
            .top_k_by_distance(&query_embedding, self.top_k)
            .await
        {
            Ok(rows) => rows,
            Err(err) => {
                error!(error = %err, "context retrieval failed, continuing without context");
                Vec::new()
            }
        };
        let context = context_chunks.join("\n");

        let answer = self.generator.generate(question, &context).await?;
        if answer.trim().is_empty() {
            return Ok(NOT_FOUND_ANSWER.to_string());
        }

        Ok(format_answer(&answer))
    }
}
