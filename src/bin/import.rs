//! Batch import entry point: reads the corpus file and fully replaces the
//! stored chunks.
//!
//! Run with:
//!   cargo run --bin ragdesk-import
//!
//! Exits non-zero when the corpus is unreadable or produces no chunks. A
//! store failure during the replace is reported in the summary but keeps the
//! exit status at zero.

use std::process::ExitCode;
use std::sync::Arc;

use tokio::fs;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

use ragdesk::ai::{GeminiClient, GeminiEmbedder};
use ragdesk::stores::PgDocumentStore;
use ragdesk::{ImportPipeline, Settings, SupportError};

/// Embedding width of `text-embedding-004`, used for schema bootstrap.
const EMBEDDING_DIMS: usize = 768;

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("import failed: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), SupportError> {
    let settings = Settings::from_env()?;

    let text = fs::read_to_string(&settings.corpus_path)
        .await
        .map_err(|err| {
            SupportError::InvalidCorpus(format!(
                "cannot read {}: {err}",
                settings.corpus_path.display()
            ))
        })?;

    let client = GeminiClient::new(settings.gemini_api_key.clone(), &settings.api_base)?;
    let embedder = Arc::new(GeminiEmbedder::new(client, settings.embedding_model.clone()));
    let store = Arc::new(PgDocumentStore::connect(&settings.database_url)?);

    if let Err(err) = store.ensure_schema(EMBEDDING_DIMS).await {
        tracing::warn!(error = %err, "schema bootstrap failed, continuing");
    }

    let pipeline = ImportPipeline::new(embedder, store, settings.chunk_size);
    let report = pipeline.run(&text).await?;

    println!(
        "Import completed: {} chunks, {} imported, {} skipped{}",
        report.chunks_total,
        report.imported,
        report.skipped,
        if report.stored {
            ""
        } else {
            " (store replace failed, see logs)"
        }
    );

    Ok(())
}
