//! Status command handler.
//!
//! Health surface: reports whether the persisted index loads and how
//! many circuits it holds. A missing or unreadable store is reported as
//! such, never conflated with a successfully loaded empty index.

use clap::Args;
use circuitry_core::{config::AppConfig, AppResult};
use circuitry_corpus::store;

/// Report index health
#[derive(Args, Debug)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatusCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let index_path = config.index_path();

        match store::load(&index_path) {
            Ok(index) => {
                if self.json {
                    let output = serde_json::json!({
                        "status": "ok",
                        "indexLoaded": true,
                        "circuits": index.len(),
                        "model": index.model,
                        "dimensions": index.dimensions,
                        "builtAt": index.built_at.to_rfc3339(),
                    });
                    println!("{}", serde_json::to_string_pretty(&output).unwrap());
                } else {
                    println!("Index: loaded ({:?})", index_path);
                    println!("Circuits: {}", index.len());
                    println!("Model: {} ({} dimensions)", index.model, index.dimensions);
                    println!("Built at: {}", index.built_at.to_rfc3339());
                    if index.is_empty() {
                        println!("Warning: index has zero rows; queries will be rejected");
                    }
                }
                Ok(())
            }
            Err(e) => {
                if self.json {
                    let output = serde_json::json!({
                        "status": "unavailable",
                        "indexLoaded": false,
                        "error": e.to_string(),
                    });
                    println!("{}", serde_json::to_string_pretty(&output).unwrap());
                    Ok(())
                } else {
                    println!("Index: not available ({})", e);
                    Err(e)
                }
            }
        }
    }
}
