//! Circuit corpus retrieval core.
//!
//! Indexes a corpus of text-encoded circuit descriptions (one embedding
//! per circuit over name + description + keywords) and serves top-k
//! cosine-similarity retrieval to ground circuit-text generation.

pub mod builder;
pub mod embeddings;
pub mod loader;
pub mod metadata;
pub mod normalize;
pub mod query;
pub mod retriever;
pub mod store;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use builder::build_index;
pub use embeddings::{create_provider, EmbeddingProvider};
pub use query::{answer_query, search, DEFAULT_TOP_K};
pub use types::{
    CircuitIndex, CircuitRecord, IndexedCircuit, QueryOptions, QueryResponse, RetrievedCircuit,
    SearchResponse,
};
