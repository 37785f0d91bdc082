//! Similarity ranking over an immutable circuit index.
//!
//! Scoring is pure and deterministic: identical index snapshot plus
//! identical query embedding always produce identical ordering and
//! scores. Ties keep original row order (stable sort).

use crate::types::{CircuitIndex, IndexedCircuit};

/// Calculate cosine similarity between two vectors.
///
/// Defined as 0.0 when either vector has zero norm or the lengths
/// differ, so callers never divide by zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

/// Return the top-k circuits ranked by cosine similarity to the query
/// embedding, descending.
///
/// `top_k == 0` or an empty index yields an empty result; fewer rows than
/// `top_k` yields all of them.
pub fn retrieve(
    index: &CircuitIndex,
    query_embedding: &[f32],
    top_k: usize,
) -> Vec<(IndexedCircuit, f32)> {
    if top_k == 0 || index.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<(IndexedCircuit, f32)> = index
        .circuits
        .iter()
        .map(|circuit| {
            let score = cosine_similarity(query_embedding, &circuit.embedding);
            (circuit.clone(), score)
        })
        .collect();

    // Stable sort: equal scores keep index row order
    results.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    results.truncate(top_k);

    tracing::debug!(
        "Retrieved {} circuits (requested top-{})",
        results.len(),
        top_k
    );

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CircuitRecord;
    use chrono::Utc;

    fn record(id: &str) -> CircuitRecord {
        CircuitRecord {
            id: id.to_string(),
            text: format!("{} text", id),
            name: id.to_uppercase(),
            description: format!("{} description", id),
            category: "general".to_string(),
            keywords: vec![id.to_string()],
            searchable_text: format!("{} searchable", id),
        }
    }

    fn index_of(embeddings: Vec<(&str, Vec<f32>)>) -> CircuitIndex {
        let dimensions = embeddings.first().map(|(_, e)| e.len()).unwrap_or(0);
        let circuits = embeddings
            .into_iter()
            .enumerate()
            .map(|(i, (id, embedding))| IndexedCircuit {
                record: record(id),
                position: i as u32,
                embedding,
            })
            .collect();

        CircuitIndex {
            circuits,
            model: "hash-v1".to_string(),
            dimensions,
            built_at: Utc::now(),
        }
    }

    #[test]
    fn test_cosine_identical_vectors() {
        let a = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_cosine_orthogonal_vectors() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &b).abs() < 0.001);
    }

    #[test]
    fn test_cosine_opposite_vectors() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_cosine_zero_norm_is_zero() {
        let a = vec![0.0, 0.0];
        let b = vec![1.0, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
        assert_eq!(cosine_similarity(&b, &a), 0.0);
    }

    #[test]
    fn test_cosine_length_mismatch_is_zero() {
        let a = vec![1.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_retrieve_orders_descending() {
        let index = index_of(vec![
            ("far", vec![0.0, 1.0, 0.0]),
            ("near", vec![1.0, 0.0, 0.0]),
            ("mid", vec![0.7, 0.7, 0.0]),
        ]);

        let results = retrieve(&index, &[1.0, 0.0, 0.0], 10);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0.record.id, "near");
        assert_eq!(results[1].0.record.id, "mid");
        assert_eq!(results[2].0.record.id, "far");

        for pair in results.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
    }

    #[test]
    fn test_retrieve_scores_bounded() {
        let index = index_of(vec![
            ("a", vec![1.0, 0.0]),
            ("b", vec![-1.0, 0.0]),
            ("c", vec![0.0, 1.0]),
        ]);

        let results = retrieve(&index, &[0.6, 0.8], 10);

        assert_eq!(results.len(), 3);
        for (_, score) in &results {
            assert!((-1.0..=1.0).contains(score), "score out of range: {}", score);
        }
    }

    #[test]
    fn test_retrieve_ties_keep_row_order() {
        // Identical embeddings score identically; row order must decide
        let index = index_of(vec![
            ("first", vec![1.0, 0.0]),
            ("second", vec![1.0, 0.0]),
            ("third", vec![1.0, 0.0]),
        ]);

        let results = retrieve(&index, &[1.0, 0.0], 10);

        let ids: Vec<&str> = results.iter().map(|(c, _)| c.record.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_retrieve_is_reproducible() {
        let index = index_of(vec![
            ("a", vec![0.3, 0.7]),
            ("b", vec![0.5, 0.5]),
            ("c", vec![0.9, 0.1]),
        ]);
        let query = [0.6, 0.4];

        let first = retrieve(&index, &query, 3);
        let second = retrieve(&index, &query, 3);

        for (x, y) in first.iter().zip(&second) {
            assert_eq!(x.0.record.id, y.0.record.id);
            assert_eq!(x.1, y.1);
        }
    }

    #[test]
    fn test_retrieve_truncates_to_k() {
        let index = index_of(vec![
            ("a", vec![1.0, 0.0]),
            ("b", vec![0.9, 0.1]),
            ("c", vec![0.8, 0.2]),
            ("d", vec![0.7, 0.3]),
        ]);

        let results = retrieve(&index, &[1.0, 0.0], 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0.record.id, "a");
    }

    #[test]
    fn test_retrieve_k_zero_is_empty() {
        let index = index_of(vec![("a", vec![1.0, 0.0])]);
        assert!(retrieve(&index, &[1.0, 0.0], 0).is_empty());
    }

    #[test]
    fn test_retrieve_empty_index_is_empty() {
        let index = index_of(vec![]);
        assert!(retrieve(&index, &[1.0, 0.0], 5).is_empty());
    }

    #[test]
    fn test_retrieve_k_larger_than_corpus_returns_all_once() {
        let index = index_of(vec![
            ("a", vec![1.0, 0.0]),
            ("b", vec![0.0, 1.0]),
        ]);

        let results = retrieve(&index, &[1.0, 1.0], 100);

        assert_eq!(results.len(), 2);
        let mut ids: Vec<&str> = results.iter().map(|(c, _)| c.record.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
