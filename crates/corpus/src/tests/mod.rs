//! Crate-level tests exercising the retrieval pipeline end-to-end with
//! deterministic stand-ins for both external providers.


use circuitry_core::{AppError, AppResult};
use circuitry_llm::{LlmClient, LlmRequest, LlmResponse, LlmUsage};

/// Stub generative client returning a fixed completion.
pub(crate) struct StubLlm {
    pub reply: String,
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

/// Stub generative client that always fails.
pub(crate) struct FailingLlm;

#[async_trait::async_trait]
impl LlmClient for FailingLlm {
    fn provider_name(&self) -> &str {
        "failing"
    }

    async fn complete(&self, _request: &LlmRequest) -> AppResult<LlmResponse> {
        Err(AppError::Llm("provider unreachable".to_string()))
    }
}
