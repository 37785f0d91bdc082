//! LLM provider factory.
//!
//! Creates generative clients from configuration: provider resolution,
//! secret injection, endpoint overrides.

use crate::client::LlmClient;
use crate::providers::{GroqClient, OllamaClient};
use circuitry_core::{AppError, AppResult};
use std::sync::Arc;

/// Create an LLM client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("groq", "ollama")
/// * `endpoint` - Optional custom endpoint URL
/// * `api_key` - Optional API key (required by Groq)
///
/// # Errors
/// Returns `AppError::Config` for an unknown provider or a missing
/// required API key.
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
) -> AppResult<Arc<dyn LlmClient>> {
    match provider.to_lowercase().as_str() {
        "groq" => {
            let api_key = api_key.ok_or_else(|| {
                AppError::Config("Groq provider requires an API key".to_string())
            })?;
            let client = match endpoint {
                Some(url) => GroqClient::with_base_url(api_key, url)?,
                None => GroqClient::new(api_key)?,
            };
            Ok(Arc::new(client))
        }
        "ollama" => {
            let base_url = endpoint.unwrap_or("http://localhost:11434");
            Ok(Arc::new(OllamaClient::with_base_url(base_url)))
        }
        _ => Err(AppError::Config(format!(
            "Unknown generative provider: '{}'. Supported providers: groq, ollama",
            provider
        ))),
    }
}
