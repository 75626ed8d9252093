//! Gemini REST client for `generateContent` and `embedContent`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use reqwest::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use url::Url;

use super::Generator;
use crate::config::LlmConfig;
use crate::errors::EstateRagError;
use crate::errors::Result;

const API_KEY_HEADER: &str = "x-goog-api-key";
const QUOTA_STATUS: &str = "RESOURCE_EXHAUSTED";
const ERROR_SNIPPET_CHARS: usize = 300;

/// Thin client over the Gemini REST API.
///
/// The API key travels in a header so it never shows up in logged URLs.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: Url,
}

impl GeminiClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(EstateRagError::Custom(format!(
                "Gemini API key is not set; export {} or set llm.api_key",
                crate::config::API_KEY_ENV
            )));
        }

        let mut endpoint = config.endpoint.clone();
        if !endpoint.ends_with('/') {
            endpoint.push('/');
        }
        let base_url = Url::parse(&endpoint)
            .map_err(|e| EstateRagError::Custom(format!("invalid llm.endpoint {endpoint}: {e}")))?;

        let mut key = HeaderValue::from_str(config.api_key.trim())
            .map_err(|e| EstateRagError::Custom(format!("invalid Gemini API key: {e}")))?;
        key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| EstateRagError::Custom(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    fn model_url(&self, model: &str, method: &str) -> Result<Url> {
        self.base_url
            .join(&format!("models/{model}:{method}"))
            .map_err(|e| EstateRagError::Custom(format!("invalid model name {model}: {e}")))
    }

    /// Generate a JSON answer with `model`, returning the raw text parts
    pub async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
        temperature: f32,
    ) -> Result<String> {
        let url = self.model_url(model, "generateContent")?;
        debug!("Calling Gemini generateContent: model={}", model);

        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": temperature,
                "responseMimeType": "application/json"
            }
        });

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                EstateRagError::GenerationUnavailable(format!("model {model} request failed: {e}"))
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            EstateRagError::GenerationUnavailable(format!("model {model} response unreadable: {e}"))
        })?;

        if !status.is_success() {
            return Err(classify_failure(status, &text, model));
        }

        extract_text(&text, model)
    }

    /// Embed a search query with `model`
    pub async fn embed_content(&self, model: &str, text: &str) -> Result<Vec<f32>> {
        let url = self.model_url(model, "embedContent")?;
        debug!("Calling Gemini embedContent: model={}", model);

        let body = json!({
            "model": format!("models/{model}"),
            "content": { "parts": [{ "text": text }] },
            "taskType": "RETRIEVAL_QUERY"
        });

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| EstateRagError::Embedding(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(match classify_failure(status, &error_text, model) {
                EstateRagError::GenerationUnavailable(message) => EstateRagError::Embedding(message),
                other => other,
            });
        }

        #[derive(Deserialize)]
        struct EmbedResponse {
            embedding: EmbeddingValues,
        }

        #[derive(Deserialize)]
        struct EmbeddingValues {
            values: Vec<f32>,
        }

        let parsed: EmbedResponse = response
            .json()
            .await
            .map_err(|e| EstateRagError::Embedding(format!("Failed to parse response: {e}")))?;

        if parsed.embedding.values.is_empty() {
            return Err(EstateRagError::Embedding(
                "No embedding in response".to_string(),
            ));
        }
        Ok(parsed.embedding.values)
    }
}

#[async_trait]
impl Generator for GeminiClient {
    async fn generate(&self, model: &str, prompt: &str, temperature: f32) -> Result<String> {
        self.generate_content(model, prompt, temperature).await
    }
}

/// Map a non-success Gemini response onto the error taxonomy
fn classify_failure(status: StatusCode, body: &str, model: &str) -> EstateRagError {
    if status == StatusCode::TOO_MANY_REQUESTS || body.contains(QUOTA_STATUS) {
        return EstateRagError::RateLimited {
            model: model.to_string(),
        };
    }

    let snippet: String = body.chars().take(ERROR_SNIPPET_CHARS).collect();
    EstateRagError::GenerationUnavailable(format!("model {model} returned {status}: {snippet}"))
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Deserialize)]
struct ResponseCandidate {
    content: Option<ResponseContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Concatenate the text parts of the first candidate
fn extract_text(body: &str, model: &str) -> Result<String> {
    let parsed: GenerateResponse =
        serde_json::from_str(body).map_err(|e| EstateRagError::GenerationParse {
            model: model.to_string(),
            message: format!("unexpected response envelope: {e}"),
        })?;

    let Some(candidate) = parsed.candidates.into_iter().next() else {
        return Err(EstateRagError::GenerationParse {
            model: model.to_string(),
            message: "response has no candidates".to_string(),
        });
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(EstateRagError::GenerationParse {
            model: model.to_string(),
            message: format!(
                "response has no text (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            ),
        });
    }

    Ok(text)
}
