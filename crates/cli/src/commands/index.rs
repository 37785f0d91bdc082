//! Index command handler.
//!
//! Builds the circuit index from a corpus directory and persists it.
//! Rebuilds are always full: the previous table is replaced wholesale.

use clap::Args;
use circuitry_core::{config::AppConfig, AppResult};
use circuitry_corpus::{build_index, create_provider, store};
use std::path::PathBuf;

/// Build and persist the circuit index
#[derive(Args, Debug)]
pub struct IndexCommand {
    /// Corpus directory (default: circuits/ under the workspace)
    pub corpus: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl IndexCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let corpus_dir = self.corpus.clone().unwrap_or_else(|| config.corpus_dir());

        tracing::info!("Building index from corpus at {:?}", corpus_dir);

        let provider = create_provider(&config.embedding)?;
        let index = build_index(&corpus_dir, provider.as_ref()).await?;

        let index_path = config.index_path();
        store::save(&index, &index_path)?;

        if self.json {
            let output = serde_json::json!({
                "circuits": index.len(),
                "model": index.model,
                "dimensions": index.dimensions,
                "indexPath": index_path,
            });
            println!("{}", serde_json::to_string_pretty(&output).unwrap());
        } else {
            println!(
                "Indexed {} circuits ({} dimensions, model '{}') -> {:?}",
                index.len(),
                index.dimensions,
                index.model,
                index_path
            );
        }

        Ok(())
    }
}
