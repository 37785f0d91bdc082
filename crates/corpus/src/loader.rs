//! Corpus loading.
//!
//! Reads raw circuit description files from a corpus directory and
//! produces one canonical record per circuit: identifier from the
//! filename stem, verbatim text, resolved metadata, and the derived
//! searchable text used as embedding input.

use crate::metadata;
use crate::types::CircuitRecord;
use circuitry_core::{AppError, AppResult};
use std::collections::HashSet;
use std::path::Path;
use walkdir::WalkDir;

/// Load every circuit source file under `corpus_dir`.
///
/// Files are sorted by path for deterministic row ordering. Hidden files
/// are skipped. An empty directory yields an empty corpus, which is valid.
///
/// # Errors
/// * `AppError::Io` - the directory or a file could not be read
/// * `AppError::Index` - two files share the same identifier stem
pub fn load_corpus(corpus_dir: &Path) -> AppResult<Vec<CircuitRecord>> {
    if !corpus_dir.is_dir() {
        return Err(AppError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("corpus directory not found: {:?}", corpus_dir),
        )));
    }

    let mut paths: Vec<_> = WalkDir::new(corpus_dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| !e.file_name().to_string_lossy().starts_with('.'))
        .map(|e| e.into_path())
        .collect();
    paths.sort();

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(paths.len());

    for path in paths {
        let id = match path.file_stem() {
            Some(stem) => stem.to_string_lossy().to_string(),
            None => continue,
        };

        if !seen.insert(id.clone()) {
            return Err(AppError::Index(format!(
                "duplicate circuit identifier '{}' in corpus (from {:?})",
                id, path
            )));
        }

        let text = std::fs::read_to_string(&path)?;

        let resolved = metadata::resolve(&id);
        if !resolved.is_curated() {
            tracing::debug!("No curated metadata for '{}', using derived default", id);
        }
        let meta = resolved.into_metadata();

        let searchable_text = format!(
            "{} {} {}",
            meta.name,
            meta.description,
            meta.keywords.join(" ")
        );

        records.push(CircuitRecord {
            id,
            text,
            name: meta.name,
            description: meta.description,
            category: meta.category,
            keywords: meta.keywords,
            searchable_text,
        });
    }

    tracing::info!(
        "Loaded {} circuits from corpus at {:?}",
        records.len(),
        corpus_dir
    );

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_circuit(dir: &Path, name: &str, text: &str) {
        std::fs::write(dir.join(name), text).unwrap();
    }

    #[test]
    fn test_load_corpus_sorted_by_filename() {
        let temp = TempDir::new().unwrap();
        write_circuit(temp.path(), "xor.txt", "xor circuit text");
        write_circuit(temp.path(), "fulladd.txt", "full adder circuit text");
        write_circuit(temp.path(), "bandpass.txt", "band-pass circuit text");

        let records = load_corpus(temp.path()).unwrap();

        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["bandpass", "fulladd", "xor"]);
    }

    #[test]
    fn test_records_carry_metadata_and_searchable_text() {
        let temp = TempDir::new().unwrap();
        write_circuit(temp.path(), "xor.txt", "$ 1 0.000005");

        let records = load_corpus(temp.path()).unwrap();
        let record = &records[0];

        assert_eq!(record.id, "xor");
        assert_eq!(record.name, "XOR Gate");
        assert_eq!(record.text, "$ 1 0.000005");
        assert!(record.searchable_text.contains("XOR Gate"));
        assert!(record.searchable_text.contains("Exclusive OR logic gate"));
        assert!(record.searchable_text.contains("digital"));
        assert!(!record.searchable_text.is_empty());
    }

    #[test]
    fn test_derived_metadata_for_unknown_circuit() {
        let temp = TempDir::new().unwrap();
        write_circuit(temp.path(), "mystery-box.txt", "text");

        let records = load_corpus(temp.path()).unwrap();

        assert_eq!(records[0].name, "Mystery Box");
        assert_eq!(records[0].category, "general");
    }

    #[test]
    fn test_empty_corpus_is_valid() {
        let temp = TempDir::new().unwrap();
        let records = load_corpus(temp.path()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_missing_directory_errors() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        assert!(load_corpus(&missing).is_err());
    }

    #[test]
    fn test_hidden_files_skipped() {
        let temp = TempDir::new().unwrap();
        write_circuit(temp.path(), ".hidden.txt", "ignore me");
        write_circuit(temp.path(), "xor.txt", "keep me");

        let records = load_corpus(temp.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "xor");
    }

    #[test]
    fn test_duplicate_identifier_rejected() {
        let temp = TempDir::new().unwrap();
        write_circuit(temp.path(), "xor.txt", "a");
        write_circuit(temp.path(), "xor.cct", "b");

        let err = load_corpus(temp.path()).unwrap_err();
        assert!(err.to_string().contains("duplicate circuit identifier"));
    }
}
