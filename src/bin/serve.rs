//! HTTP entry point for the support assistant.
//!
//! Run with:
//!   cargo run --bin ragdesk-serve
//!
//! Then, in another terminal:
//!   curl -X POST http://127.0.0.1:3000/ask-ai \
//!     -H 'Content-Type: application/json' \
//!     -d '{"content": "How long does delivery take?"}'

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

use ragdesk::ai::{GeminiClient, GeminiEmbedder, GeminiGenerator};
use ragdesk::server::{self, AppState};
use ragdesk::stores::PgDocumentStore;
use ragdesk::{Settings, SupportError, SupportService};

#[tokio::main]
async fn main() -> Result<(), SupportError> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let settings = Settings::from_env()?;

    let client = GeminiClient::new(settings.gemini_api_key.clone(), &settings.api_base)?;
    let embedder = Arc::new(GeminiEmbedder::new(
        client.clone(),
        settings.embedding_model.clone(),
    ));
    let generator = Arc::new(GeminiGenerator::new(
        client,
        settings.generation_model.clone(),
    ));
    let store = Arc::new(PgDocumentStore::connect(&settings.database_url)?);

    let service = SupportService::new(embedder, generator, store, settings.top_k);
    let app = server::router(AppState {
        service: Arc::new(service),
    });

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("support assistant listening on http://{}", settings.bind_addr);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
