//! SQLite-backed persistence for the circuit index.
//!
//! One row per circuit plus a single-row metadata table. The index is
//! written whole at build time and read whole at load time; there are no
//! incremental updates (rebuild-and-swap instead).

use crate::types::{CircuitIndex, CircuitRecord, IndexedCircuit};
use chrono::{DateTime, Utc};
use circuitry_core::{AppError, AppResult};
use rusqlite::{params, Connection};
use std::path::Path;

/// Persist an index wholesale, replacing any previous contents.
pub fn save(index: &CircuitIndex, db_path: &Path) -> AppResult<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| AppError::Index(format!("Failed to create index directory: {}", e)))?;
    }

    let mut conn = Connection::open(db_path)
        .map_err(|e| AppError::Index(format!("Failed to open index store: {}", e)))?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS index_meta (
            model TEXT NOT NULL,
            dimensions INTEGER NOT NULL,
            built_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS circuits (
            id TEXT PRIMARY KEY,
            position INTEGER NOT NULL,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            category TEXT NOT NULL,
            keywords TEXT NOT NULL,
            text TEXT NOT NULL,
            searchable_text TEXT NOT NULL,
            embedding BLOB NOT NULL
        );
        "#,
    )
    .map_err(|e| AppError::Index(format!("Failed to create tables: {}", e)))?;

    let tx = conn
        .transaction()
        .map_err(|e| AppError::Index(format!("Failed to start transaction: {}", e)))?;

    tx.execute("DELETE FROM circuits", [])
        .map_err(|e| AppError::Index(format!("Failed to clear circuits: {}", e)))?;
    tx.execute("DELETE FROM index_meta", [])
        .map_err(|e| AppError::Index(format!("Failed to clear metadata: {}", e)))?;

    tx.execute(
        "INSERT INTO index_meta (model, dimensions, built_at) VALUES (?1, ?2, ?3)",
        params![
            index.model,
            index.dimensions as i64,
            index.built_at.to_rfc3339(),
        ],
    )
    .map_err(|e| AppError::Index(format!("Failed to insert metadata: {}", e)))?;

    for circuit in &index.circuits {
        let keywords_json = serde_json::to_string(&circuit.record.keywords)
            .map_err(|e| AppError::Index(format!("Failed to serialize keywords: {}", e)))?;

        tx.execute(
            "INSERT INTO circuits (id, position, name, description, category, keywords, text, searchable_text, embedding)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                circuit.record.id,
                circuit.position as i64,
                circuit.record.name,
                circuit.record.description,
                circuit.record.category,
                keywords_json,
                circuit.record.text,
                circuit.record.searchable_text,
                embedding_to_bytes(&circuit.embedding),
            ],
        )
        .map_err(|e| AppError::Index(format!("Failed to insert circuit '{}': {}", circuit.record.id, e)))?;
    }

    tx.commit()
        .map_err(|e| AppError::Index(format!("Failed to commit index: {}", e)))?;

    tracing::info!(
        "Persisted index with {} circuits to {:?}",
        index.len(),
        db_path
    );

    Ok(())
}

/// Load a persisted index wholesale.
///
/// A missing file means the index was never built; a present but
/// unreadable one is a load failure. Both are errors, distinct from a
/// successfully loaded index with zero rows, which is returned as-is.
pub fn load(db_path: &Path) -> AppResult<CircuitIndex> {
    if !db_path.exists() {
        return Err(AppError::Index(format!(
            "No index found at {:?}. Run 'circuitry index' first",
            db_path
        )));
    }

    let conn = Connection::open(db_path)
        .map_err(|e| AppError::Index(format!("Failed to open index store: {}", e)))?;

    let (model, dimensions, built_at_raw) = conn
        .query_row(
            "SELECT model, dimensions, built_at FROM index_meta",
            [],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, String>(2)?,
                ))
            },
        )
        .map_err(|e| {
            AppError::Index(format!(
                "Index store at {:?} is corrupt or incomplete: {}",
                db_path, e
            ))
        })?;

    let built_at = DateTime::parse_from_rfc3339(&built_at_raw)
        .map_err(|e| AppError::Index(format!("Invalid build timestamp in index store: {}", e)))?
        .with_timezone(&Utc);

    let mut stmt = conn
        .prepare(
            "SELECT id, position, name, description, category, keywords, text, searchable_text, embedding
             FROM circuits ORDER BY position",
        )
        .map_err(|e| AppError::Index(format!("Failed to prepare query: {}", e)))?;

    let rows = stmt
        .query_map([], |row| {
            let keywords_json: String = row.get(5)?;
            let keywords: Vec<String> = serde_json::from_str(&keywords_json)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

            let embedding_bytes: Vec<u8> = row.get(8)?;
            let embedding = bytes_to_embedding(&embedding_bytes)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

            Ok(IndexedCircuit {
                record: CircuitRecord {
                    id: row.get(0)?,
                    name: row.get(2)?,
                    description: row.get(3)?,
                    category: row.get(4)?,
                    keywords,
                    text: row.get(6)?,
                    searchable_text: row.get(7)?,
                },
                position: row.get::<_, i64>(1)? as u32,
                embedding,
            })
        })
        .map_err(|e| AppError::Index(format!("Failed to query circuits: {}", e)))?;

    let circuits: Vec<IndexedCircuit> = rows
        .collect::<Result<_, _>>()
        .map_err(|e| AppError::Index(format!("Failed to read circuit row: {}", e)))?;

    let dimensions = dimensions as usize;
    for circuit in &circuits {
        if circuit.embedding.len() != dimensions {
            return Err(AppError::Index(format!(
                "Circuit '{}' has {}-dimensional embedding, index metadata says {}",
                circuit.record.id,
                circuit.embedding.len(),
                dimensions
            )));
        }
    }

    tracing::info!(
        "Loaded index with {} circuits from {:?} (model '{}', {} dimensions)",
        circuits.len(),
        db_path,
        model,
        dimensions
    );

    Ok(CircuitIndex {
        circuits,
        model,
        dimensions,
        built_at,
    })
}

/// Convert an embedding vector to little-endian bytes for storage.
fn embedding_to_bytes(embedding: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(embedding.len() * 4);
    for &value in embedding {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

/// Convert stored bytes back to an embedding vector.
fn bytes_to_embedding(bytes: &[u8]) -> AppResult<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return Err(AppError::Index(
            "Invalid embedding bytes length".to_string(),
        ));
    }

    let mut embedding = Vec::with_capacity(bytes.len() / 4);
    for chunk in bytes.chunks_exact(4) {
        embedding.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }

    Ok(embedding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_index() -> CircuitIndex {
        let records = [
            ("xor", "XOR Gate"),
            ("fulladd", "Full Adder"),
        ];

        let circuits = records
            .iter()
            .enumerate()
            .map(|(i, (id, name))| IndexedCircuit {
                record: CircuitRecord {
                    id: id.to_string(),
                    text: format!("{} circuit text", id),
                    name: name.to_string(),
                    description: format!("{} description", name),
                    category: "digital-logic-gates".to_string(),
                    keywords: vec![id.to_string(), "digital".to_string()],
                    searchable_text: format!("{} searchable", name),
                },
                position: i as u32,
                embedding: vec![i as f32, 1.0, -0.5],
            })
            .collect();

        CircuitIndex {
            circuits,
            model: "hash-v1".to_string(),
            dimensions: 3,
            built_at: Utc::now(),
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let db_path = temp.path().join("index.sqlite");

        let index = sample_index();
        save(&index, &db_path).unwrap();

        let loaded = load(&db_path).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.model, "hash-v1");
        assert_eq!(loaded.dimensions, 3);

        for (original, loaded) in index.circuits.iter().zip(&loaded.circuits) {
            assert_eq!(original.record.id, loaded.record.id);
            assert_eq!(original.record.name, loaded.record.name);
            assert_eq!(original.record.keywords, loaded.record.keywords);
            assert_eq!(original.record.text, loaded.record.text);
            assert_eq!(original.position, loaded.position);
            assert_eq!(original.embedding, loaded.embedding);
        }
    }

    #[test]
    fn test_save_replaces_previous_contents() {
        let temp = TempDir::new().unwrap();
        let db_path = temp.path().join("index.sqlite");

        save(&sample_index(), &db_path).unwrap();

        let mut smaller = sample_index();
        smaller.circuits.truncate(1);
        save(&smaller, &db_path).unwrap();

        let loaded = load(&db_path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.circuits[0].record.id, "xor");
    }

    #[test]
    fn test_empty_index_round_trip() {
        let temp = TempDir::new().unwrap();
        let db_path = temp.path().join("index.sqlite");

        let mut index = sample_index();
        index.circuits.clear();
        save(&index, &db_path).unwrap();

        let loaded = load(&db_path).unwrap();
        assert!(loaded.is_empty());
        assert_eq!(loaded.dimensions, 3);
    }

    #[test]
    fn test_load_missing_index_errors() {
        let temp = TempDir::new().unwrap();
        let err = load(&temp.path().join("missing.sqlite")).unwrap_err();
        assert!(err.to_string().contains("No index found"));
    }

    #[test]
    fn test_load_corrupt_store_errors() {
        let temp = TempDir::new().unwrap();
        let db_path = temp.path().join("index.sqlite");

        // A present-but-unusable file is a load failure, not "no results"
        std::fs::write(&db_path, b"not a database").unwrap();
        let err = load(&db_path).unwrap_err();
        assert!(!err.to_string().contains("No index found"));
    }

    #[test]
    fn test_embedding_bytes_round_trip() {
        let embedding = vec![0.5, -1.25, 3.0, f32::MIN_POSITIVE];
        let bytes = embedding_to_bytes(&embedding);
        assert_eq!(bytes.len(), 16);

        let back = bytes_to_embedding(&bytes).unwrap();
        assert_eq!(back, embedding);
    }

    #[test]
    fn test_invalid_embedding_bytes_rejected() {
        assert!(bytes_to_embedding(&[1, 2, 3]).is_err());
    }
}
