//! Embedding provider trait and factory.

use circuitry_core::{AppError, AppResult, EmbeddingSettings};
use std::sync::Arc;

/// Trait for embedding providers.
///
/// `embed_batch` is length- and order-preserving: `output[i]` corresponds
/// to `input[i]`, always. Implementations must fail loudly on any response
/// that would break that contract rather than returning a short or
/// reordered result.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync + std::fmt::Debug {
    /// Get provider name (e.g., "ollama", "mock")
    fn provider_name(&self) -> &str;

    /// Get model identifier
    fn model_name(&self) -> &str;

    /// Get embedding dimensions
    fn dimensions(&self) -> usize;

    /// Generate embeddings for multiple texts in a batch.
    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>>;

    /// Generate embedding for a single text (a one-element batch).
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        let mut results = self.embed_batch(&[text.to_string()]).await?;
        results
            .pop()
            .ok_or_else(|| AppError::Embedding("No embedding returned".to_string()))
    }
}

/// Create an embedding provider based on configuration.
pub fn create_provider(settings: &EmbeddingSettings) -> AppResult<Arc<dyn EmbeddingProvider>> {
    match settings.provider.as_str() {
        "ollama" => {
            let provider = super::providers::ollama::OllamaEmbedder::new(
                &settings.model,
                settings.dimensions,
                settings.endpoint.as_deref(),
            )?;
            Ok(Arc::new(provider))
        }

        "mock" => {
            let provider = super::providers::mock::MockEmbedder::new(settings.dimensions);
            Ok(Arc::new(provider))
        }

        _ => Err(AppError::Config(format!(
            "Unknown embedding provider: '{}'. Supported providers: ollama, mock",
            settings.provider
        ))),
    }
}
