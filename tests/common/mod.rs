//! Deterministic fakes for the external collaborators.

#![allow(dead_code)]

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;

use async_trait::async_trait;

use ragdesk::SupportError;
use ragdesk::ai::{Embedder, Generator};
use ragdesk::stores::{DocumentRow, VectorStore};

/// Embedder that hashes text into a small fixed-width vector, optionally
/// failing on inputs containing a marker substring.
pub struct FakeEmbedder {
    fail_marker: Option<&'static str>,
}

impl FakeEmbedder {
    pub fn new() -> Self {
        Self { fail_marker: None }
    }

    pub fn failing_on(marker: &'static str) -> Self {
        Self {
            fail_marker: Some(marker),
        }
    }
}

#[async_trait]
impl Embedder for FakeEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, SupportError> {
        if let Some(marker) = self.fail_marker {
            if text.contains(marker) {
                return Err(SupportError::EmbeddingUnavailable(
                    "synthetic embedding failure".to_string(),
                ));
            }
        }
        Ok(hash_embedding(text))
    }
}

/// Same text, same vector; different text, different vector.
pub fn hash_embedding(text: &str) -> Vec<f32> {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    let seed = hasher.finish();
    (0..4u32)
        .map(|i| {
            let bits = seed.rotate_left(i * 8) as u32;
            bits as f32 / u32::MAX as f32
        })
        .collect()
}

/// Generator that records every call and returns a canned reply.
pub struct RecordingGenerator {
    reply: String,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl RecordingGenerator {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Contexts passed to `generate`, in call order.
    pub fn contexts(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, context)| context.clone())
            .collect()
    }
}

#[async_trait]
impl Generator for RecordingGenerator {
    async fn generate(&self, question: &str, context: &str) -> Result<String, SupportError> {
        self.calls
            .lock()
            .unwrap()
            .push((question.to_string(), context.to_string()));
        Ok(self.reply.clone())
    }
}

/// In-memory store with scriptable failures.
#[derive(Default)]
pub struct FakeStore {
    pub results: Vec<String>,
    pub fail_replace: bool,
    pub fail_search: bool,
    pub replaced: Mutex<Vec<DocumentRow>>,
}

impl FakeStore {
    pub fn with_results(results: Vec<&str>) -> Self {
        Self {
            results: results.into_iter().map(String::from).collect(),
            ..Default::default()
        }
    }

    pub fn failing_search() -> Self {
        Self {
            fail_search: true,
            ..Default::default()
        }
    }

    pub fn failing_replace() -> Self {
        Self {
            fail_replace: true,
            ..Default::default()
        }
    }

    /// Contents handed to the last `replace_all` call.
    pub fn replaced_contents(&self) -> Vec<String> {
        self.replaced
            .lock()
            .unwrap()
            .iter()
            .map(|row| row.content.clone())
            .collect()
    }
}

#[async_trait]
impl VectorStore for FakeStore {
    async fn replace_all(&self, rows: Vec<DocumentRow>) -> Result<(), SupportError> {
        if self.fail_replace {
            return Err(SupportError::StoreUnavailable(
                "synthetic replace failure".to_string(),
            ));
        }
        *self.replaced.lock().unwrap() = rows;
        Ok(())
    }

    async fn top_k_by_distance(
        &self,
        _query_embedding: &[f32],
        k: usize,
    ) -> Result<Vec<String>, SupportError> {
        if self.fail_search {
            return Err(SupportError::StoreUnavailable(
                "synthetic search failure".to_string(),
            ));
        }
        Ok(self.results.iter().take(k).cloned().collect())
    }
}
