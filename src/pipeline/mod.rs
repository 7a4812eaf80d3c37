//! Import and query orchestration.

pub mod import;
pub mod query;

pub use import::{ImportPipeline, ImportReport};
pub use query::SupportService;
