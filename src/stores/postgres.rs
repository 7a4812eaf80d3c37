//! pgvector-backed document store.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{DocumentRow, VectorStore};
use crate::types::SupportError;

/// Postgres store holding one row per imported chunk in the `documents`
/// table (`content TEXT`, `embedding vector`).
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Creates a store for the database at `database_url`.
    ///
    /// The pool connects lazily: an unreachable database surfaces on first
    /// use, where callers already degrade store failures softly.
    pub fn connect(database_url: &str) -> Result<Self, SupportError> {
        let pool = PgPool::connect_lazy(database_url)
            .map_err(|err| SupportError::StoreUnavailable(format!("connect error: {err}")))?;
        Ok(Self { pool })
    }

    /// Creates the `vector` extension and the `documents` table when absent.
    ///
    /// `dims` must match what the embedding model produces; a mismatch shows
    /// up at query time, not here.
    pub async fn ensure_schema(&self, dims: usize) -> Result<(), SupportError> {
        sqlx::query("CREATE EXTENSION IF NOT EXISTS vector")
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        let ddl = format!(
            "CREATE TABLE IF NOT EXISTS documents (content TEXT NOT NULL, embedding vector({dims}) NOT NULL)"
        );
        sqlx::query(&ddl).execute(&self.pool).await.map_err(store_err)?;
        Ok(())
    }
}

#[async_trait]
impl VectorStore for PgDocumentStore {
    async fn replace_all(&self, rows: Vec<DocumentRow>) -> Result<(), SupportError> {
        // Truncate and insert stay separate statements; see the trait docs
        // for the accepted consistency gap.
        sqlx::query("TRUNCATE TABLE documents")
            .execute(&self.pool)
            .await
            .map_err(store_err)?;

        for row in rows {
            sqlx::query("INSERT INTO documents (content, embedding) VALUES ($1, $2::vector)")
                .bind(&row.content)
                .bind(vector_literal(&row.embedding))
                .execute(&self.pool)
                .await
                .map_err(store_err)?;
        }

        Ok(())
    }

    async fn top_k_by_distance(
        &self,
        query_embedding: &[f32],
        k: usize,
    ) -> Result<Vec<String>, SupportError> {
        sqlx::query_scalar("SELECT content FROM documents ORDER BY embedding <=> $1::vector LIMIT $2")
            .bind(vector_literal(query_embedding))
            .bind(k as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(store_err)
    }
}

/// Encodes an embedding as the bracketed comma-joined literal pgvector
/// accepts, e.g. `[0.1,0.2,-0.25]`.
fn vector_literal(embedding: &[f32]) -> String {
    let joined = embedding
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("[{joined}]")
}

fn store_err(err: sqlx::Error) -> SupportError {
    SupportError::StoreUnavailable(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_literal_is_bracketed_and_comma_joined() {
        assert_eq!(vector_literal(&[1.0, 2.5, -0.25]), "[1,2.5,-0.25]");
    }

    #[test]
    fn vector_literal_of_empty_embedding() {
        assert_eq!(vector_literal(&[]), "[]");
    }
}
