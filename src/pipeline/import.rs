//! Batch load: chunk a document, embed each chunk, replace the store.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::ai::Embedder;
use crate::chunking::chunk;
use crate::stores::{DocumentRow, VectorStore};
use crate::types::SupportError;

/// Outcome summary of one import run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportReport {
    /// Chunks produced by the chunker.
    pub chunks_total: usize,
    /// Chunks embedded and handed to the store.
    pub imported: usize,
    /// Chunks dropped: empty after flattening, or embedding failed.
    pub skipped: usize,
    /// Whether the store replace succeeded.
    pub stored: bool,
}

/// Sequential chunk → embed → store orchestration.
pub struct ImportPipeline {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
    chunk_size: usize,
}

impl ImportPipeline {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn VectorStore>,
        chunk_size: usize,
    ) -> Self {
        Self {
            embedder,
            store,
            chunk_size,
        }
    }

    /// Runs a full import over `text`.
    ///
    /// Chunks are embedded one at a time; an embedding failure skips that
    /// chunk and the loop continues. A store failure is logged and reported
    /// through [`ImportReport::stored`], but the run itself still returns
    /// `Ok` — an import can therefore leave the table empty.
    pub async fn run(&self, text: &str) -> Result<ImportReport, SupportError> {
        let chunks = chunk(text, self.chunk_size);
        if chunks.is_empty() {
            return Err(SupportError::InvalidCorpus(
                "document produced no chunks".to_string(),
            ));
        }

        let chunks_total = chunks.len();
        let mut rows = Vec::with_capacity(chunks_total);
        let mut skipped = 0usize;

        for (index, chunk_text) in chunks.into_iter().enumerate() {
            // Stored content is single-line: internal newlines flatten to
            // spaces before embedding.
            let flattened = chunk_text.replace(['\r', '\n'], " ").trim().to_string();
            if flattened.is_empty() {
                warn!(chunk = index, "skipping empty chunk");
                skipped += 1;
                continue;
            }

            match self.embedder.embed(&flattened).await {
                Ok(embedding) => rows.push(DocumentRow {
                    content: flattened,
                    embedding,
                }),
                Err(err) => {
                    error!(chunk = index, error = %err, "failed to embed chunk");
                    skipped += 1;
                }
            }
        }

        let imported = rows.len();
        let stored = match self.store.replace_all(rows).await {
            Ok(()) => true,
            Err(err) => {
                error!(error = %err, "failed to replace document rows");
                false
            }
        };

        info!(chunks_total, imported, skipped, stored, "import finished");

        Ok(ImportReport {
            chunks_total,
            imported,
            skipped,
            stored,
        })
    }
}
