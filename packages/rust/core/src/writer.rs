//! Catalog persistence.
//!
//! The finished document sequence is serialized as indented JSON to a fixed
//! filename inside the workspace metadata directory. The write replaces any
//! existing catalog outright; there is no merge with a previous build.

use std::path::{Path, PathBuf};

use tracing::debug;

use docshelf_shared::{Document, DocshelfError, Result};

/// Fixed catalog filename inside the metadata directory.
pub const CATALOG_FILE: &str = "catalog.json";

/// Write the catalog into `metadata_dir`, returning the file path.
pub fn write_catalog(metadata_dir: &Path, documents: &[Document]) -> Result<PathBuf> {
    let path = metadata_dir.join(CATALOG_FILE);

    let json = serde_json::to_string_pretty(documents)
        .map_err(|e| DocshelfError::parse(format!("catalog serialization failed: {e}")))?;
    std::fs::write(&path, json).map_err(|e| DocshelfError::io(&path, e))?;

    debug!(path = %path.display(), count = documents.len(), "catalog written");
    Ok(path)
}

/// Read a persisted catalog back from `metadata_dir`.
pub fn read_catalog(metadata_dir: &Path) -> Result<Vec<Document>> {
    let path = metadata_dir.join(CATALOG_FILE);

    let content = std::fs::read_to_string(&path).map_err(|e| DocshelfError::io(&path, e))?;
    serde_json::from_str(&content)
        .map_err(|e| DocshelfError::parse(format!("malformed catalog at {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ds-writer-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn make_documents() -> Vec<Document> {
        vec![
            Document {
                title: "App Guide".into(),
                id: "TP40007072".into(),
                latest: 1_401_667_200,
                current: 0,
                url: "https://example.com/documentation/guide.html".into(),
                pdf_url: "https://example.com/documentation/guide.pdf".into(),
            },
            Document {
                title: "UIKit Reference".into(),
                id: "TP40006821".into(),
                latest: 1_394_409_600,
                current: 0,
                url: "https://example.com/documentation/uikit.html".into(),
                pdf_url: String::new(),
            },
        ]
    }

    #[test]
    fn write_then_read_roundtrip() {
        let dir = temp_dir();
        let documents = make_documents();

        let path = write_catalog(&dir, &documents).unwrap();
        assert_eq!(path, dir.join(CATALOG_FILE));

        let read_back = read_catalog(&dir).unwrap();
        assert_eq!(read_back, documents);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn write_is_indented_with_exact_field_names() {
        let dir = temp_dir();
        let path = write_catalog(&dir, &make_documents()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with('['));
        assert!(content.contains("\n  "));
        for key in ["\"Title\"", "\"Id\"", "\"Latest\"", "\"Current\"", "\"URL\"", "\"PdfURL\""] {
            assert!(content.contains(key), "missing {key}");
        }

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn write_replaces_existing_catalog() {
        let dir = temp_dir();

        write_catalog(&dir, &make_documents()).unwrap();
        write_catalog(&dir, &[]).unwrap();

        let read_back = read_catalog(&dir).unwrap();
        assert!(read_back.is_empty());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn read_missing_catalog_is_io_error() {
        let dir = temp_dir();
        let err = read_catalog(&dir).unwrap_err();
        assert!(matches!(err, DocshelfError::Io { .. }));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
