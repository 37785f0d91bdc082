//! Ollama LLM provider implementation.
//!
//! Uses the local Ollama chat endpoint so the same role-tagged request
//! shape works for both providers.
//! API: https://github.com/ollama/ollama/blob/main/docs/api.md

use crate::client::{ChatMessage, LlmClient, LlmRequest, LlmResponse, LlmUsage};
use circuitry_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Ollama chat request format.
#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Ollama chat response format.
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    model: String,
    message: OllamaMessage,
    #[serde(default)]
    prompt_eval_count: Option<u32>,
    #[serde(default)]
    eval_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    content: String,
}

/// Ollama LLM client.
pub struct OllamaClient {
    /// Base URL for the Ollama API
    base_url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl OllamaClient {
    /// Create a new Ollama client with default settings.
    ///
    /// Default URL: http://localhost:11434
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_OLLAMA_URL)
    }

    /// Create a new Ollama client with a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl LlmClient for OllamaClient {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        tracing::info!("Sending completion request to Ollama");
        tracing::debug!("Model: {}, messages: {}", request.model, request.messages.len());

        let options = if request.temperature.is_some() || request.max_tokens.is_some() {
            Some(OllamaOptions {
                temperature: request.temperature,
                num_predict: request.max_tokens,
            })
        } else {
            None
        };

        let ollama_request = OllamaRequest {
            model: &request.model,
            messages: &request.messages,
            stream: false,
            options,
        };

        let url = format!("{}/api/chat", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&ollama_request)
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to send request to Ollama: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Llm(format!(
                "Ollama API error ({}): {}",
                status, error_text
            )));
        }

        let ollama_response: OllamaResponse = response
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to parse Ollama response: {}", e)))?;

        let usage = LlmUsage::new(
            ollama_response.prompt_eval_count.unwrap_or(0),
            ollama_response.eval_count.unwrap_or(0),
        );

        tracing::info!("Received completion from Ollama");

        Ok(LlmResponse {
            content: ollama_response.message.content,
            model: ollama_response.model,
            usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_client_creation() {
        let client = OllamaClient::new();
        assert_eq!(client.provider_name(), "ollama");
        assert_eq!(client.base_url, DEFAULT_OLLAMA_URL);
    }

    #[test]
    fn test_ollama_request_omits_empty_options() {
        let request = LlmRequest::new("llama3.2", "hi");
        let ollama_request = OllamaRequest {
            model: &request.model,
            messages: &request.messages,
            stream: false,
            options: None,
        };

        let json = serde_json::to_value(&ollama_request).unwrap();
        assert_eq!(json["stream"], false);
        assert!(json.get("options").is_none());
    }

    #[test]
    fn test_ollama_response_parsing() {
        let body = r#"{
            "model": "llama3.2",
            "message": {"role": "assistant", "content": "band-pass filter op-amp"},
            "done": true,
            "prompt_eval_count": 20,
            "eval_count": 6
        }"#;

        let parsed: OllamaResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.message.content, "band-pass filter op-amp");
        assert_eq!(parsed.prompt_eval_count, Some(20));
    }
}
