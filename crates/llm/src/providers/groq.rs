//! Groq LLM provider implementation.
//!
//! Groq exposes an OpenAI-compatible chat completions API.
//! API: https://console.groq.com/docs/api-reference

use crate::client::{ChatMessage, LlmClient, LlmRequest, LlmResponse, LlmUsage};
use circuitry_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_GROQ_URL: &str = "https://api.groq.com/openai/v1";

/// Request timeout; generation requests can run long at 8k max tokens.
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Groq chat completions request format.
#[derive(Debug, Serialize)]
struct GroqRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Groq chat completions response format.
#[derive(Debug, Deserialize)]
struct GroqResponse {
    model: String,
    choices: Vec<GroqChoice>,
    #[serde(default)]
    usage: Option<GroqUsage>,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    message: GroqChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct GroqChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct GroqUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

/// Groq LLM client.
pub struct GroqClient {
    /// Base URL for the Groq API
    base_url: String,

    /// Bearer API key
    api_key: String,

    /// HTTP client
    client: reqwest::Client,
}

impl GroqClient {
    /// Create a new Groq client with the default endpoint.
    pub fn new(api_key: impl Into<String>) -> AppResult<Self> {
        Self::with_base_url(api_key, DEFAULT_GROQ_URL)
    }

    /// Create a new Groq client with a custom base URL.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Llm(format!("Failed to create HTTP client for Groq: {}", e)))?;

        Ok(Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client,
        })
    }
}

#[async_trait::async_trait]
impl LlmClient for GroqClient {
    fn provider_name(&self) -> &str {
        "groq"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        tracing::info!("Sending completion request to Groq");
        tracing::debug!("Model: {}, messages: {}", request.model, request.messages.len());

        let groq_request = GroqRequest {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&groq_request)
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to send request to Groq: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Llm(format!(
                "Groq API error ({}): {}",
                status, error_text
            )));
        }

        let groq_response: GroqResponse = response
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to parse Groq response: {}", e)))?;

        let choice = groq_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Llm("Groq response contained no choices".to_string()))?;

        let usage = groq_response
            .usage
            .map(|u| LlmUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        tracing::info!("Received completion from Groq");

        Ok(LlmResponse {
            content: choice.message.content,
            model: groq_response.model,
            usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groq_client_creation() {
        let client = GroqClient::new("test-key").unwrap();
        assert_eq!(client.provider_name(), "groq");
        assert_eq!(client.base_url, DEFAULT_GROQ_URL);
    }

    #[test]
    fn test_groq_request_serialization() {
        let request = LlmRequest::new("llama-3.3-70b-versatile", "Hello").with_temperature(0.1);
        let groq_request = GroqRequest {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let json = serde_json::to_value(&groq_request).unwrap();
        assert_eq!(json["model"], "llama-3.3-70b-versatile");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["temperature"], 0.1);
        // Unset fields are omitted entirely
        assert!(json.get("max_tokens").is_none());
    }

    #[test]
    fn test_groq_response_parsing() {
        let body = r#"{
            "model": "llama-3.3-70b-versatile",
            "choices": [{"message": {"role": "assistant", "content": "XOR logic gate"}}],
            "usage": {"prompt_tokens": 50, "completion_tokens": 4, "total_tokens": 54}
        }"#;

        let parsed: GroqResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content, "XOR logic gate");
        assert_eq!(parsed.usage.as_ref().unwrap().prompt_tokens, 50);
    }
}
