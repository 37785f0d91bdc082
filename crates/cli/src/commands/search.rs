//! Search command handler.
//!
//! Retrieval only: ranks the corpus against the query and prints the
//! hits, without calling the generative model for circuit text.

use clap::Args;
use circuitry_core::{config::AppConfig, AppResult};
use circuitry_corpus::{create_provider, search, store, QueryOptions, DEFAULT_TOP_K};
use circuitry_llm::create_client;

/// Retrieve the most similar circuits
#[derive(Args, Debug)]
pub struct SearchCommand {
    /// The search query
    pub query: String,

    /// Number of circuits to retrieve
    #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing search command");

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

        let response = search(&index, embedder.as_ref(), llm.as_ref(), &options).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else {
            println!("Keywords: {}", response.keywords);
            for hit in &response.hits {
                println!("  {} ({}, similarity: {:.3})", hit.name, hit.id, hit.score);
            }
        }

        Ok(())
    }
}
