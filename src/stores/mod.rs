//! Vector storage for imported document chunks.
//!
//! The import pipeline is the sole writer (full truncate + insert on every
//! run); the query pipeline is read-only. The vector-literal encoding and
//! SQL dialect stay behind [`VectorStore`] so the pipelines can run against
//! fakes in tests.

pub mod postgres;

use async_trait::async_trait;

use crate::types::SupportError;

pub use postgres::PgDocumentStore;

/// One persisted chunk: its text and embedding vector.
///
/// Dimensionality is not validated at insert; a mismatch with the stored
/// column surfaces as a query-time failure.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentRow {
    pub content: String,
    pub embedding: Vec<f32>,
}

/// Storage abstraction over the `documents` table.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Deletes every stored row, then inserts `rows`.
    ///
    /// The two steps are not atomic: a crash in between leaves the store
    /// empty, and concurrent readers may observe a transient empty table.
    /// Callers treat failures as soft (log and continue).
    async fn replace_all(&self, rows: Vec<DocumentRow>) -> Result<(), SupportError>;

    /// Returns the contents of the `k` rows nearest to `query_embedding`,
    /// ordered by ascending distance. Callers treat a failure as "no
    /// context available" rather than aborting.
    async fn top_k_by_distance(
        &self,
        query_embedding: &[f32],
        k: usize,
    ) -> Result<Vec<String>, SupportError>;
}
