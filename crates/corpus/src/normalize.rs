//! Query normalization.
//!
//! Numeric parameter values and unit-bearing specifications in a user
//! request (voltages, resistances, bit-widths) are noise for similarity
//! search against a corpus indexed on topology/category/keyword text.
//! The generative model extracts a short keyword phrase with those
//! stripped; if that call fails for any reason, retrieval proceeds with
//! the raw query instead. The soft fallback here is deliberate and
//! asymmetric to the hard failure of final generation.

use circuitry_llm::{LlmClient, LlmRequest};
use circuitry_prompt::build_extraction_prompt;

const EXTRACTION_TEMPERATURE: f32 = 0.2;
const EXTRACTION_MAX_TOKENS: u32 = 100;

/// Convert a raw user query into a keyword phrase suitable for embedding.
///
/// Never fails: any error in prompt rendering or the generative call logs
/// a warning and returns `raw_query` unchanged.
pub async fn normalize_query(llm: &dyn LlmClient, model: &str, raw_query: &str) -> String {
    let prompt = match build_extraction_prompt(raw_query) {
        Ok(prompt) => prompt,
        Err(e) => {
            tracing::warn!("Keyword extraction prompt failed ({}), using original query", e);
            return raw_query.to_string();
        }
    };

    let request = LlmRequest::new(model, prompt)
        .with_temperature(EXTRACTION_TEMPERATURE)
        .with_max_tokens(EXTRACTION_MAX_TOKENS);

    match llm.complete(&request).await {
        Ok(response) => {
            let keywords = response.content.trim();
            if keywords.is_empty() {
                tracing::warn!("Keyword extraction returned empty text, using original query");
                raw_query.to_string()
            } else {
                tracing::debug!("Extracted keywords: {}", keywords);
                keywords.to_string()
            }
        }
        Err(e) => {
            tracing::warn!("Keyword extraction failed ({}), using original query", e);
            raw_query.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use circuitry_core::{AppError, AppResult};
    use circuitry_llm::{LlmResponse, LlmUsage};

    struct StubLlm {
        reply: String,
    }

    #[async_trait::async_trait]
    impl LlmClient for StubLlm {
        fn provider_name(&self) -> &str {
            "stub"
        }

        async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
            Ok(LlmResponse {
                content: self.reply.clone(),
                model: request.model.clone(),
                usage: LlmUsage::default(),
            })
        }
    }

    struct FailingLlm;

    #[async_trait::async_trait]
    impl LlmClient for FailingLlm {
        fn provider_name(&self) -> &str {
            "failing"
        }

        async fn complete(&self, _request: &LlmRequest) -> AppResult<LlmResponse> {
            Err(AppError::Llm("provider unreachable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_normalize_returns_extracted_keywords() {
        let llm = StubLlm {
            reply: "  XOR logic gate  ".to_string(),
        };

        let keywords = normalize_query(&llm, "m", "I need an exclusive or gate with 5V").await;
        assert_eq!(keywords, "XOR logic gate");
    }

    #[tokio::test]
    async fn test_normalize_falls_back_on_provider_error() {
        let raw = "I need an exclusive or gate";
        let keywords = normalize_query(&FailingLlm, "m", raw).await;
        assert_eq!(keywords, raw);
    }

    #[tokio::test]
    async fn test_normalize_falls_back_on_empty_reply() {
        let llm = StubLlm {
            reply: "   ".to_string(),
        };

        let raw = "design a band-pass filter";
        let keywords = normalize_query(&llm, "m", raw).await;
        assert_eq!(keywords, raw);
    }
}
