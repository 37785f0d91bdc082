//! Configuration management.
//!
//! Handles loading and merging configuration from multiple sources:
//! - Built-in defaults
//! - Config file (`.circuitry/config.yaml` under the workspace)
//! - Environment variables
//! - Command-line flags
//!
//! Precedence is lowest-to-highest in that order. The configuration is
//! workspace-centric: the persisted index and the config file both live
//! under `.circuitry/`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Settings for the generative model provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Provider identifier ("groq", "ollama")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Optional custom endpoint URL
    pub endpoint: Option<String>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            provider: "groq".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            endpoint: None,
        }
    }
}

/// Settings for the embedding provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingSettings {
    /// Provider identifier ("ollama", "mock")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Embedding vector dimensionality
    pub dimensions: usize,

    /// Optional custom endpoint URL
    pub endpoint: Option<String>,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            model: "bge-m3".to_string(),
            dimensions: 1024,
            endpoint: None,
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .circuitry/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Directory holding the circuit source files
    pub corpus_dir: Option<PathBuf>,

    /// Generative model settings
    pub generation: GenerationSettings,

    /// Embedding provider settings
    pub embedding: EmbeddingSettings,

    /// API key for the generative provider
    pub api_key: Option<String>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    corpus_dir: Option<String>,
    generation: Option<GenerationFileSection>,
    embedding: Option<EmbeddingFileSection>,
    logging: Option<LoggingFileSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GenerationFileSection {
    provider: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EmbeddingFileSection {
    provider: Option<String>,
    model: Option<String>,
    dimensions: Option<usize>,
    endpoint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingFileSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            corpus_dir: None,
            generation: GenerationSettings::default(),
            embedding: EmbeddingSettings::default(),
            api_key: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `CIRCUITRY_WORKSPACE`: Override workspace path
    /// - `CIRCUITRY_CONFIG`: Path to config file
    /// - `CIRCUITRY_CORPUS`: Corpus directory
    /// - `CIRCUITRY_PROVIDER`: Generative provider
    /// - `CIRCUITRY_MODEL`: Generative model identifier
    /// - `CIRCUITRY_API_KEY` / `GROQ_API_KEY`: API key
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(workspace) = std::env::var("CIRCUITRY_WORKSPACE") {
            config.workspace = PathBuf::from(workspace);
        }

        if let Ok(config_file) = std::env::var("CIRCUITRY_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = if let Some(ref cf) = config.config_file {
            cf.clone()
        } else {
            config.workspace.join(".circuitry/config.yaml")
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override the config file
        if let Ok(corpus) = std::env::var("CIRCUITRY_CORPUS") {
            config.corpus_dir = Some(PathBuf::from(corpus));
        }

        if let Ok(provider) = std::env::var("CIRCUITRY_PROVIDER") {
            config.generation.provider = provider;
        }

        if let Ok(model) = std::env::var("CIRCUITRY_MODEL") {
            config.generation.model = model;
        }

        config.api_key = std::env::var("CIRCUITRY_API_KEY")
            .or_else(|_| std::env::var("GROQ_API_KEY"))
            .ok();
        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(dir) = config_file.corpus_dir {
            result.corpus_dir = Some(PathBuf::from(dir));
        }

        if let Some(generation) = config_file.generation {
            if let Some(provider) = generation.provider {
                result.generation.provider = provider;
            }
            if let Some(model) = generation.model {
                result.generation.model = model;
            }
            if generation.endpoint.is_some() {
                result.generation.endpoint = generation.endpoint;
            }
        }

        if let Some(embedding) = config_file.embedding {
            if let Some(provider) = embedding.provider {
                result.embedding.provider = provider;
            }
            if let Some(model) = embedding.model {
                result.embedding.model = model;
            }
            if let Some(dimensions) = embedding.dimensions {
                result.embedding.dimensions = dimensions;
            }
            if embedding.endpoint.is_some() {
                result.embedding.endpoint = embedding.endpoint;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and the
    /// config file.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(provider) = provider {
            self.generation.provider = provider;
        }

        if let Some(model) = model {
            self.generation.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .circuitry directory.
    pub fn circuitry_dir(&self) -> PathBuf {
        self.workspace.join(".circuitry")
    }

    /// Ensure the .circuitry directory exists.
    pub fn ensure_circuitry_dir(&self) -> AppResult<()> {
        let dir = self.circuitry_dir();
        if !dir.exists() {
            std::fs::create_dir_all(&dir).map_err(|e| {
                AppError::Config(format!("Failed to create .circuitry directory: {}", e))
            })?;
        }
        Ok(())
    }

    /// Path of the persisted circuit index.
    pub fn index_path(&self) -> PathBuf {
        self.circuitry_dir().join("index.sqlite")
    }

    /// Directory holding circuit source files (default: `circuits/` under
    /// the workspace).
    pub fn corpus_dir(&self) -> PathBuf {
        self.corpus_dir
            .clone()
            .unwrap_or_else(|| self.workspace.join("circuits"))
    }

    /// Validate configuration for the active providers.
    pub fn validate(&self) -> AppResult<()> {
        let known_generation = ["groq", "ollama"];
        if !known_generation.contains(&self.generation.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown generative provider: {}. Supported: {}",
                self.generation.provider,
                known_generation.join(", ")
            )));
        }

        let known_embedding = ["ollama", "mock"];
        if !known_embedding.contains(&self.embedding.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown embedding provider: {}. Supported: {}",
                self.embedding.provider,
                known_embedding.join(", ")
            )));
        }

        if self.generation.provider == "groq" && self.api_key.is_none() {
            return Err(AppError::Config(
                "Groq provider requires an API key. Set CIRCUITRY_API_KEY or GROQ_API_KEY"
                    .to_string(),
            ));
        }

        if self.embedding.dimensions == 0 {
            return Err(AppError::Config(
                "Embedding dimensionality must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}
