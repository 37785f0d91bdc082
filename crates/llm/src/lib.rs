//! Generative model integration for the circuitry workspace.
//!
//! Provides a provider-agnostic abstraction for completion requests
//! against a generative model through a unified trait-based interface.
//!
//! # Providers
//! - **Groq**: Hosted OpenAI-compatible chat API (default)
//! - **Ollama**: Local LLM runtime
//!
//! # Example
//! ```no_run
//! use circuitry_llm::{LlmClient, LlmRequest, providers::OllamaClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::new();
//! let request = LlmRequest::new("llama3.2", "Describe an RC low-pass filter");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;

// Re-export main types
pub use client::{ChatMessage, LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::create_client;
pub use providers::{GroqClient, OllamaClient};
