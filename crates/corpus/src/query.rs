//! Query pipeline orchestration.
//!
//! Runs a user query end-to-end against an immutable index: validate,
//! normalize, embed, rank, assemble, generate. The index is passed in
//! explicitly so concurrent queries can share one snapshot and tests can
//! use synthetic indexes.

use crate::embeddings::EmbeddingProvider;
use crate::normalize::normalize_query;
use crate::retriever;
use crate::types::{
    CircuitIndex, IndexedCircuit, QueryOptions, QueryResponse, RetrievedCircuit, SearchResponse,
};
use circuitry_core::{AppError, AppResult};
use circuitry_llm::{LlmClient, LlmRequest};
use circuitry_prompt::{assemble_generation_prompt, CircuitBlock};

/// Default number of circuits retrieved per query.
pub const DEFAULT_TOP_K: usize = 5;

const GENERATION_TEMPERATURE: f32 = 0.1;
const GENERATION_MAX_TOKENS: u32 = 8000;

/// Run the full pipeline: retrieve grounding circuits, then generate
/// circuit text for the user query.
///
/// Generation failures are hard errors; only keyword extraction inside
/// `rank` degrades softly.
pub async fn answer_query(
    index: &CircuitIndex,
    embedder: &dyn EmbeddingProvider,
    llm: &dyn LlmClient,
    options: &QueryOptions,
) -> AppResult<QueryResponse> {
    let (keywords, hits) = rank(index, embedder, llm, options).await?;

    let blocks: Vec<CircuitBlock> = hits
        .iter()
        .map(|(circuit, _)| CircuitBlock {
            position: circuit.position,
            name: circuit.record.name.clone(),
            description: circuit.record.description.clone(),
            category: circuit.record.category.clone(),
            keywords: circuit.record.keywords.clone(),
            text: circuit.record.text.clone(),
        })
        .collect();

    let prompt = assemble_generation_prompt(&blocks, options.query.trim())?;

    tracing::info!(
        "Generating circuit text grounded on {} retrieved circuits",
        blocks.len()
    );

    let request = LlmRequest::new(options.model.as_str(), prompt)
        .with_temperature(GENERATION_TEMPERATURE)
        .with_max_tokens(GENERATION_MAX_TOKENS);

    let response = llm.complete(&request).await?;
    let circuit_text = strip_code_fences(&response.content);

    Ok(QueryResponse {
        circuit_text,
        keywords,
        retrieved: to_refs(&hits),
    })
}

/// Retrieval without generation: rank the corpus against the query.
pub async fn search(
    index: &CircuitIndex,
    embedder: &dyn EmbeddingProvider,
    llm: &dyn LlmClient,
    options: &QueryOptions,
) -> AppResult<SearchResponse> {
    let (keywords, hits) = rank(index, embedder, llm, options).await?;

    Ok(SearchResponse {
        keywords,
        hits: to_refs(&hits),
    })
}

/// Shared validate → normalize → embed → retrieve steps.
async fn rank(
    index: &CircuitIndex,
    embedder: &dyn EmbeddingProvider,
    llm: &dyn LlmClient,
    options: &QueryOptions,
) -> AppResult<(String, Vec<(IndexedCircuit, f32)>)> {
    let query = options.query.trim();

    // Input errors are rejected before any external call
    if query.is_empty() {
        return Err(AppError::Query("Query text is empty".to_string()));
    }

    // An empty index is service-unavailable, not "no results"; a store
    // that failed to load never got this far
    if index.is_empty() {
        return Err(AppError::Index(
            "Index has no circuits. Rebuild it with 'circuitry index'".to_string(),
        ));
    }

    let keywords = normalize_query(llm, &options.model, query).await;

    let query_embedding = embedder.embed(&keywords).await?;

    let hits = retriever::retrieve(index, &query_embedding, options.top_k);

    for (circuit, score) in &hits {
        tracing::debug!(
            "  {} (similarity: {:.3})",
            circuit.record.name,
            score
        );
    }

    Ok((keywords, hits))
}

fn to_refs(hits: &[(IndexedCircuit, f32)]) -> Vec<RetrievedCircuit> {
    hits.iter()
        .map(|(circuit, score)| RetrievedCircuit {
            id: circuit.record.id.clone(),
            name: circuit.record.name.clone(),
            score: *score,
        })
        .collect()
}

/// Remove surrounding markdown code fences from a completion.
///
/// Models occasionally wrap circuit text in ``` blocks despite the
/// instructions; the circuit text itself never contains fence lines.
fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();

    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    trimmed
        .lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}
