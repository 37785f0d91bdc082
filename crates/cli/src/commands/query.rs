//! Query command handler.
//!
//! Runs the full pipeline: load the index, retrieve grounding circuits,
//! generate circuit text for the user query.

use clap::Args;
use circuitry_core::{config::AppConfig, AppResult};
use circuitry_corpus::{answer_query, create_provider, store, QueryOptions, DEFAULT_TOP_K};
use circuitry_llm::create_client;

/// Generate circuit text for a query
#[derive(Args, Debug)]
pub struct QueryCommand {
    /// The circuit request
    pub query: String,

    /// Number of circuits to retrieve as grounding context
    #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl QueryCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing query command");

        let index = store::load(&config.index_path())?;

        let embedder = create_provider(&config.embedding)?;
        let llm = create_client(
            &config.generation.provider,
            config.generation.endpoint.as_deref(),
            config.api_key.as_deref(),
        )?;

        let options = QueryOptions {
            query: self.query.clone(),
            top_k: self.top_k,
            model: config.generation.model.clone(),
        };

        let response = answer_query(&index, embedder.as_ref(), llm.as_ref(), &options).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else {
            eprintln!("Keywords: {}", response.keywords);
            eprintln!("Retrieved circuits:");
            for hit in &response.retrieved {
                eprintln!("  {} ({}, similarity: {:.3})", hit.name, hit.id, hit.score);
            }
            // Circuit text goes to stdout so it can be piped into a file
            println!("{}", response.circuit_text);
        }

        Ok(())
    }
}
