//! Atomic JSON catalog sink.

use std::fs;
use std::path::{Path, PathBuf};

use apimap_core::errors::StorageError;
use apimap_core::traits::CatalogSink;
use apimap_core::types::EndpointRecord;
use tracing::trace;

/// Writes the full catalog as a pretty-printed JSON array.
///
/// Every persist writes a sibling temp file and renames it over the
/// target, so a concurrent reader observes either the previous document or
/// the new one, never a partial write. The write itself is serialized by
/// the assembler's critical section; this sink only has to keep the
/// on-disk artifact consistent.
pub struct JsonCatalogSink {
    path: PathBuf,
}

impl JsonCatalogSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "catalog".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CatalogSink for JsonCatalogSink {
    fn persist(&self, records: &[EndpointRecord]) -> Result<(), StorageError> {
        let body = serde_json::to_vec_pretty(records).map_err(|e| StorageError::Serialize {
            message: e.to_string(),
        })?;

        let temp = self.temp_path();
        fs::write(&temp, &body).map_err(|e| StorageError::Write {
            path: temp.display().to_string(),
            message: e.to_string(),
        })?;
        fs::rename(&temp, &self.path).map_err(|e| StorageError::Write {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        trace!(path = %self.path.display(), records = records.len(), "catalog persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apimap_core::constants;
    use apimap_core::types::{HttpMethod, ResponseSpec};
    use std::collections::BTreeMap;

    fn record(path: &str) -> EndpointRecord {
        let mut responses = BTreeMap::new();
        responses.insert(constants::SUCCESS_STATUS.to_string(), ResponseSpec::ok());
        EndpointRecord {
            path: path.to_string(),
            method: HttpMethod::Get,
            parameters: vec![],
            controller: "com.example.C".to_string(),
            responses,
        }
    }

    #[test]
    fn persists_a_parseable_array() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonCatalogSink::new(dir.path().join("catalog.json"));

        sink.persist(&[record("/a")]).unwrap();

        let raw = fs::read_to_string(sink.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["path"], "/a");
        // Pretty-printed, not a single line.
        assert!(raw.contains('\n'));
    }

    #[test]
    fn rewrites_replace_the_whole_document() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonCatalogSink::new(dir.path().join("catalog.json"));

        sink.persist(&[record("/a")]).unwrap();
        sink.persist(&[record("/a"), record("/b")]).unwrap();

        let raw = fs::read_to_string(sink.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        // The temp file never outlives a successful rename.
        assert!(!sink.temp_path().exists());
    }

    #[test]
    fn empty_catalog_is_an_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonCatalogSink::new(dir.path().join("catalog.json"));
        sink.persist(&[]).unwrap();
        let raw = fs::read_to_string(sink.path()).unwrap();
        assert_eq!(raw.trim(), "[]");
    }

    #[test]
    fn unwritable_target_is_a_write_error() {
        let sink = JsonCatalogSink::new("/nonexistent-dir/catalog.json");
        let err = sink.persist(&[record("/a")]).unwrap_err();
        assert!(matches!(err, StorageError::Write { .. }));
    }
}
