//! Corpus and index type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single circuit from the corpus, before embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitRecord {
    /// Unique identifier, derived from the source filename stem
    pub id: String,

    /// Verbatim circuit description text (opaque to the retrieval core)
    pub text: String,

    /// Display name
    pub name: String,

    /// Short description
    pub description: String,

    /// Category tag
    pub category: String,

    /// Keyword set (ordered, duplicates allowed)
    pub keywords: Vec<String>,

    /// Embedding input: name + description + keywords
    pub searchable_text: String,
}

/// A circuit with its row position and embedding vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedCircuit {
    /// The underlying corpus record
    pub record: CircuitRecord,

    /// Row position, stable within one index build
    pub position: u32,

    /// Embedding vector; same dimensionality across the whole index
    pub embedding: Vec<f32>,
}

/// An immutable, searchable snapshot of the embedded corpus.
///
/// Built once from the full corpus, persisted, and loaded wholesale before
/// serving queries. Never mutated in place; adding or removing a circuit
/// means a full rebuild followed by a swap. Because it is read-only,
/// concurrent queries may share one index freely.
#[derive(Debug, Clone)]
pub struct CircuitIndex {
    /// Indexed circuits in row order
    pub circuits: Vec<IndexedCircuit>,

    /// Embedding model that produced the vectors
    pub model: String,

    /// Embedding dimensionality shared by every row
    pub dimensions: usize,

    /// When this index was built
    pub built_at: DateTime<Utc>,
}

impl CircuitIndex {
    /// Number of indexed circuits.
    pub fn len(&self) -> usize {
        self.circuits.len()
    }

    /// An index with zero rows is valid but yields no retrieval results.
    pub fn is_empty(&self) -> bool {
        self.circuits.is_empty()
    }
}

/// Options for a retrieval-backed query.
#[derive(Debug, Clone)]
pub struct QueryOptions {
    /// Raw user query text
    pub query: String,

    /// Number of circuits to retrieve
    pub top_k: usize,

    /// Generative model identifier
    pub model: String,
}

/// A retrieved circuit reference in a query response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedCircuit {
    /// Circuit identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Cosine similarity against the query embedding
    pub score: f32,
}

/// Response from the full query pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Generated circuit text
    pub circuit_text: String,

    /// Keyword phrase used for retrieval (raw query when normalization
    /// fell back)
    pub keywords: String,

    /// Retrieved circuits in rank order
    pub retrieved: Vec<RetrievedCircuit>,
}

/// Response from a retrieval-only search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Keyword phrase used for retrieval
    pub keywords: String,

    /// Ranked hits
    pub hits: Vec<RetrievedCircuit>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_index() {
        let index = CircuitIndex {
            circuits: Vec::new(),
            model: "bge-m3".to_string(),
            dimensions: 1024,
            built_at: Utc::now(),
        };

        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn test_retrieved_circuit_serialization() {
        let hit = RetrievedCircuit {
            id: "xor".to_string(),
            name: "XOR Gate".to_string(),
            score: 0.83,
        };

        let json = serde_json::to_string(&hit).unwrap();
        let back: RetrievedCircuit = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, "xor");
        assert_eq!(back.name, "XOR Gate");
        assert!((back.score - 0.83).abs() < f32::EPSILON);
    }
}
