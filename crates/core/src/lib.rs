//! Circuitry Core Library
//!
//! Foundational utilities for the circuitry workspace:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, EmbeddingSettings, GenerationSettings};
pub use error::{AppError, AppResult};
