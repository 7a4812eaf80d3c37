//! ragdesk — a small retrieval-augmented support assistant.
//!
//! ```text
//! corpus file ──► chunking::chunk ──► ai::Embedder ──► stores::VectorStore
//!                                                             │
//! question ──► ai::Embedder ──► stores::top_k_by_distance ◄───┘
//!                    │
//!                    └─► ai::Generator ──► format::format_answer ──► answer
//! ```
//!
//! The import binary fully replaces the stored chunks on every run; the
//! serve binary exposes the query pipeline over HTTP. External collaborators
//! (embedding API, generation API, vector store) sit behind small traits so
//! the pipelines can run against deterministic fakes in tests.

pub mod ai;
pub mod chunking;
pub mod config;
pub mod format;
pub mod pipeline;
pub mod server;
pub mod stores;
pub mod types;

pub use config::Settings;
pub use pipeline::{ImportPipeline, ImportReport, SupportService};
pub use types::SupportError;
