//! Corpus index building.
//!
//! Combines the corpus loader, metadata resolver, and embedding client
//! into an immutable `CircuitIndex`. The build is all-or-nothing: any
//! embedding failure aborts the whole build so no index ever serves rows
//! with missing or mismatched vectors.

use crate::embeddings::EmbeddingProvider;
use crate::loader;
use crate::types::{CircuitIndex, IndexedCircuit};
use chrono::Utc;
use circuitry_core::{AppError, AppResult};
use std::path::Path;

/// Build an index from every circuit file under `corpus_dir`.
///
/// All searchable texts go to the provider in one batch call to save
/// round trips; per-item calls would produce the identical index.
/// Embeddings come back in input order and are zipped onto records
/// positionally.
///
/// An empty corpus produces an empty but valid index.
pub async fn build_index(
    corpus_dir: &Path,
    provider: &dyn EmbeddingProvider,
) -> AppResult<CircuitIndex> {
    let records = loader::load_corpus(corpus_dir)?;

    tracing::info!(
        "Building index for {} circuits using provider '{}' (model: {})",
        records.len(),
        provider.provider_name(),
        provider.model_name()
    );

    let texts: Vec<String> = records
        .iter()
        .map(|record| record.searchable_text.clone())
        .collect();

    let embeddings = provider.embed_batch(&texts).await?;

    if embeddings.len() != records.len() {
        return Err(AppError::Embedding(format!(
            "Provider returned {} embeddings for {} circuits",
            embeddings.len(),
            records.len()
        )));
    }

    let dimensions = provider.dimensions();
    let mut circuits = Vec::with_capacity(records.len());

    for (position, (record, embedding)) in records.into_iter().zip(embeddings).enumerate() {
        if embedding.len() != dimensions {
            return Err(AppError::Embedding(format!(
                "Embedding for '{}' has {} dimensions, expected {}",
                record.id,
                embedding.len(),
                dimensions
            )));
        }

        circuits.push(IndexedCircuit {
            record,
            position: position as u32,
            embedding,
        });
    }

    Ok(CircuitIndex {
        circuits,
        model: provider.model_name().to_string(),
        dimensions,
        built_at: Utc::now(),
    })
}
