//! Deterministic mock embedding provider.
//!
//! Hashes token and character-bigram features into a fixed number of
//! dimensions. Not semantically meaningful the way a real model is, but
//! texts sharing vocabulary land close together, which is enough to
//! exercise ranking logic in tests without a network dependency.

use crate::embeddings::provider::EmbeddingProvider;
use circuitry_core::AppResult;

/// Mock provider for testing and offline development.
#[derive(Debug)]
pub struct MockEmbedder {
    dimensions: usize,
}

impl MockEmbedder {
    /// Create a new mock provider with the given dimensionality.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        let lower = text.to_lowercase();

        for token in lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| t.len() >= 2)
        {
            // Whole-token feature
            let slot = fold_hash(token.bytes(), 1099511628211) % self.dimensions as u64;
            vector[slot as usize] += 1.0;

            // Bigram features give partial credit to related tokens
            let bytes = token.as_bytes();
            for window in bytes.windows(2) {
                let slot = fold_hash(window.iter().copied(), 131) % self.dimensions as u64;
                vector[slot as usize] += 0.25;
            }
        }

        // Unit-normalize; an empty text stays the zero vector
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }

        vector
    }
}

fn fold_hash(bytes: impl Iterator<Item = u8>, seed: u64) -> u64 {
    bytes.fold(seed, |acc, b| {
        acc.wrapping_mul(31).wrapping_add(u64::from(b))
    })
}

#[async_trait::async_trait]
impl EmbeddingProvider for MockEmbedder {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "hash-v1"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.embed_text(text)).collect())
    }
}
