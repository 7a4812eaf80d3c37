//! Gemini API clients for embedding and answer generation.
//!
//! Both clients share one [`GeminiClient`] carrying the HTTP transport, the
//! API base URL, and the key. One outbound call per invocation, no retries;
//! timeouts are whatever the transport defaults to.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;
use url::Url;

use super::{Embedder, Generator};
use crate::types::SupportError;

/// Returned verbatim when the generation API answers with HTTP 429.
pub const RATE_LIMIT_MESSAGE: &str =
    "لقد تجاوزنا الحد المسموح به من الطلبات حالياً. الرجاء المحاولة بعد قليل.";

/// Returned when a successful generation response carries no text.
pub const GENERATION_FALLBACK: &str = "Sorry, I couldn't generate an answer right now.";

/// Shared transport and credentials for both Gemini endpoints.
#[derive(Clone, Debug)]
pub struct GeminiClient {
    http: Client,
    base: String,
    api_key: String,
}

impl GeminiClient {
    /// Builds a client for the API at `base`.
    ///
    /// Fails with [`SupportError::ConfigMissing`] on a blank key, before any
    /// network call can happen.
    pub fn new(api_key: impl Into<String>, base: &Url) -> Result<Self, SupportError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(SupportError::ConfigMissing {
                name: "GEMINI_API_KEY",
            });
        }
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            base: base.as_str().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn endpoint(&self, model: &str, operation: &str) -> String {
        format!(
            "{}/models/{model}:{operation}?key={}",
            self.base, self.api_key
        )
    }
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct ContentParts<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: String,
    content: ContentParts<'a>,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Option<EmbeddingValues>,
}

#[derive(Deserialize)]
struct EmbeddingValues {
    values: Option<Vec<f32>>,
}

/// Embedding client for the fixed embedding model.
pub struct GeminiEmbedder {
    client: GeminiClient,
    model: String,
}

impl GeminiEmbedder {
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl Embedder for GeminiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, SupportError> {
        let url = self.client.endpoint(&self.model, "embedContent");
        let body = EmbedRequest {
            model: format!("models/{}", self.model),
            content: ContentParts {
                parts: vec![TextPart { text }],
            },
        };

        let response = self
            .client
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|err| SupportError::EmbeddingUnavailable(format!("transport: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(SupportError::EmbeddingUnavailable(format!(
                "status {status}: {body}"
            )));
        }

        let parsed: EmbedResponse = response.json().await.map_err(|err| {
            SupportError::EmbeddingUnavailable(format!("malformed response: {err}"))
        })?;

        parsed
            .embedding
            .and_then(|embedding| embedding.values)
            .filter(|values| !values.is_empty())
            .ok_or_else(|| {
                SupportError::EmbeddingUnavailable("response missing embedding.values".to_string())
            })
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<ContentParts<'a>>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Generation client for the fixed generation model.
pub struct GeminiGenerator {
    client: GeminiClient,
    model: String,
}

impl GeminiGenerator {
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl Generator for GeminiGenerator {
    async fn generate(&self, question: &str, context: &str) -> Result<String, SupportError> {
        let url = self.client.endpoint(&self.model, "generateContent");
        let prompt = build_support_prompt(question, context);
        let body = GenerateRequest {
            contents: vec![ContentParts {
                parts: vec![TextPart { text: &prompt }],
            }],
        };

        let response = self
            .client
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|err| SupportError::GenerationFailed(format!("transport: {err}")))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Ok(RATE_LIMIT_MESSAGE.to_string());
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            error!(%status, body = %body, "generation request failed");
            return Err(SupportError::GenerationFailed(format!("status {status}")));
        }

        // A success response that cannot be decoded, or that lacks the text
        // field, degrades to the fixed fallback rather than an error.
        let parsed: GenerateResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(_) => return Ok(GENERATION_FALLBACK.to_string()),
        };

        let text = parsed
            .candidates
            .and_then(|mut candidates| {
                if candidates.is_empty() {
                    None
                } else {
                    Some(candidates.remove(0))
                }
            })
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts)
            .and_then(|mut parts| {
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.remove(0))
                }
            })
            .and_then(|part| part.text);

        Ok(text.unwrap_or_else(|| GENERATION_FALLBACK.to_string()))
    }
}

/// Builds the fixed customer-support prompt around the question and the
/// retrieved context.
pub fn build_support_prompt(question: &str, context: &str) -> String {
    format!(
        "أنت مساعد دعم عملاء مفيد ويجيب بطريقة واضحة ومهذبة وموجزة.\n\
         العميل سأل: \"{question}\"\n\n\
         استخدم المعلومات التالية من قاعدة البيانات للإجابة على السؤال:\n\
         \"{context}\"\n\n\
         - لخص وشرح المعلومات المهمة للعميل بطريقة سهلة الفهم.\n\
         - إذا لم تغطي المعلومات كل تفاصيل السؤال، قدم أفضل إجابة ممكنة باستخدام المعلومات المتاحة.\n\
         - قدم توجيهات أو تعليمات مفيدة بناءً على البيانات، ولا تقول فقط أنك لا تعرف.\n\
         - حافظ على الإجابة احترافية وسهلة القراءة.\n\
         - نسق الإجابة باستخدام فواصل الأسطر أو القوائم النقطية لتكون واضحة."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_question_and_context() {
        let prompt = build_support_prompt("Where is my parcel?", "Parcels ship in 2 days.");
        assert!(prompt.contains("\"Where is my parcel?\""));
        assert!(prompt.contains("\"Parcels ship in 2 days.\""));
    }

    #[test]
    fn blank_key_is_rejected_before_any_call() {
        let base = Url::parse("http://localhost:1").unwrap();
        let err = GeminiClient::new("   ", &base).unwrap_err();
        assert!(matches!(err, SupportError::ConfigMissing { .. }));
    }
}
