//! Ollama embedding provider.
//!
//! Uses Ollama's batch embedding endpoint (`/api/embed`) with models like
//! bge-m3. One request embeds the entire corpus at index-build time; the
//! same endpoint embeds single query phrases at query time.

use crate::embeddings::provider::EmbeddingProvider;
use circuitry_core::{AppError, AppResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
const EMBED_ENDPOINT: &str = "/api/embed";

/// Full-corpus batches can take a while on modest hardware.
const REQUEST_TIMEOUT_SECS: u64 = 300;

/// Ollama embedding provider using the local batch API.
#[derive(Debug, Clone)]
pub struct OllamaEmbedder {
    /// HTTP client for API requests
    client: Client,
    /// Ollama API base URL
    base_url: String,
    /// Model name (e.g., "bge-m3")
    model: String,
    /// Expected embedding dimensions
    dimensions: usize,
}

/// Request payload for the Ollama embed API.
#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    /// Model name to use
    model: &'a str,
    /// Texts to embed
    input: &'a [String],
}

/// Response from the Ollama embed API.
#[derive(Debug, Deserialize)]
struct EmbedResponse {
    /// One embedding per input, in input order
    embeddings: Vec<Vec<f32>>,
}

/// Error response from the Ollama API.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

impl OllamaEmbedder {
    /// Create a new Ollama embedding provider.
    ///
    /// The endpoint defaults to `http://localhost:11434`, overridable via
    /// the `endpoint` argument or the `OLLAMA_URL` environment variable.
    pub fn new(model: &str, dimensions: usize, endpoint: Option<&str>) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                AppError::Embedding(format!("Failed to create HTTP client for Ollama: {}", e))
            })?;

        let base_url = endpoint
            .map(str::to_string)
            .or_else(|| std::env::var("OLLAMA_URL").ok())
            .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());

        Ok(Self {
            client,
            base_url,
            model: model.to_string(),
            dimensions,
        })
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for OllamaEmbedder {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let url = format!("{}{}", self.base_url, EMBED_ENDPOINT);

        debug!("Embedding batch of {} texts via {}", texts.len(), url);

        let request = EmbedRequest {
            model: &self.model,
            input: texts,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Embedding(format!("Failed to send request to Ollama: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&error_text) {
                return Err(AppError::Embedding(format!(
                    "Ollama API error ({}): {}",
                    status, error_response.error
                )));
            }

            return Err(AppError::Embedding(format!(
                "Ollama API error ({}): {}",
                status, error_text
            )));
        }

        let body: EmbedResponse = response
            .json()
            .await
            .map_err(|e| AppError::Embedding(format!("Failed to parse Ollama response: {}", e)))?;

        // The batch contract: same length, same order, uniform dimensions.
        if body.embeddings.len() != texts.len() {
            return Err(AppError::Embedding(format!(
                "Ollama returned {} embeddings for {} inputs",
                body.embeddings.len(),
                texts.len()
            )));
        }

        for (i, embedding) in body.embeddings.iter().enumerate() {
            if embedding.len() != self.dimensions {
                return Err(AppError::Embedding(format!(
                    "Embedding {} has {} dimensions, expected {} (model '{}')",
                    i,
                    embedding.len(),
                    self.dimensions,
                    self.model
                )));
            }
        }

        debug!(
            "Received {} embeddings of dimension {}",
            body.embeddings.len(),
            self.dimensions
        );

        Ok(body.embeddings)
    }
}
