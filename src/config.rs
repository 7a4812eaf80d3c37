//! Environment-driven configuration.
//!
//! Components receive their settings explicitly at construction; this module
//! is the only place that reads the process environment. A `.env` file is
//! honored when present.

use std::net::SocketAddr;
use std::path::PathBuf;

use url::Url;

use crate::types::SupportError;

/// Base URL of the Gemini REST API.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Fixed embedding model identifier.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-004";

/// Fixed generation model identifier.
pub const DEFAULT_GENERATION_MODEL: &str = "gemini-1.5-flash";

/// Maximum chunk length in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Number of chunks retrieved per question.
pub const DEFAULT_TOP_K: usize = 5;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_CORPUS: &str = "data/corpus.md";

/// Resolved runtime settings shared by both binaries.
#[derive(Clone, Debug)]
pub struct Settings {
    pub gemini_api_key: String,
    pub database_url: String,
    pub api_base: Url,
    pub embedding_model: String,
    pub generation_model: String,
    pub chunk_size: usize,
    pub top_k: usize,
    pub bind_addr: SocketAddr,
    pub corpus_path: PathBuf,
}

impl Settings {
    /// Loads settings from the environment.
    ///
    /// `GEMINI_API_KEY` and `DATABASE_URL` are required; everything else
    /// falls back to the defaults above.
    pub fn from_env() -> Result<Self, SupportError> {
        dotenvy::dotenv().ok();

        let gemini_api_key = require("GEMINI_API_KEY")?;
        let database_url = require("DATABASE_URL")?;

        let api_base = match std::env::var("GEMINI_API_BASE") {
            Ok(raw) => Url::parse(raw.trim()).map_err(|err| SupportError::ConfigInvalid {
                key: "GEMINI_API_BASE",
                message: err.to_string(),
            })?,
            Err(_) => Url::parse(DEFAULT_API_BASE).expect("default API base parses"),
        };

        let embedding_model = std::env::var("RAGDESK_EMBEDDING_MODEL")
            .unwrap_or_else(|_| DEFAULT_EMBEDDING_MODEL.to_string());
        let generation_model = std::env::var("RAGDESK_GENERATION_MODEL")
            .unwrap_or_else(|_| DEFAULT_GENERATION_MODEL.to_string());

        let chunk_size = parse_or("RAGDESK_CHUNK_SIZE", DEFAULT_CHUNK_SIZE)?;
        let top_k = parse_or("RAGDESK_TOP_K", DEFAULT_TOP_K)?;
        let bind_addr = parse_or(
            "RAGDESK_BIND_ADDR",
            DEFAULT_BIND_ADDR.parse().expect("default bind addr parses"),
        )?;
        let corpus_path = std::env::var("RAGDESK_CORPUS")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CORPUS));

        Ok(Self {
            gemini_api_key,
            database_url,
            api_base,
            embedding_model,
            generation_model,
            chunk_size,
            top_k,
            bind_addr,
            corpus_path,
        })
    }
}

fn require(name: &'static str) -> Result<String, SupportError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(SupportError::ConfigMissing { name }),
    }
}

fn parse_or<T>(key: &'static str, default: T) -> Result<T, SupportError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|err: T::Err| SupportError::ConfigInvalid {
                key,
                message: err.to_string(),
            }),
        Err(_) => Ok(default),
    }
}
