//! Crate-wide error taxonomy.

use thiserror::Error;

/// Errors produced by the pipelines and their external collaborators.
///
/// Recovery points differ per call site: embedding failures are skippable
/// per chunk during import but fatal during a query, store failures degrade
/// to "no context" on the query path, and the HTTP layer translates any
/// surviving error into a fixed fallback answer.
#[derive(Debug, Error)]
pub enum SupportError {
    /// A required configuration value is absent. Checked before any network
    /// call is made.
    #[error("{name} is not configured")]
    ConfigMissing { name: &'static str },

    /// A configuration value was present but could not be parsed.
    #[error("invalid value for {key}: {message}")]
    ConfigInvalid { key: &'static str, message: String },

    /// The embedding API could not produce a vector: transport failure,
    /// non-success status, or a response missing the vector field.
    #[error("embedding unavailable: {0}")]
    EmbeddingUnavailable(String),

    /// The generation API failed with a non-recoverable status.
    #[error("answer generation failed: {0}")]
    GenerationFailed(String),

    /// The vector store could not be reached or a statement failed.
    #[error("vector store unavailable: {0}")]
    StoreUnavailable(String),

    /// The import source could not be read or produced no usable chunks.
    #[error("invalid corpus: {0}")]
    InvalidCorpus(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
