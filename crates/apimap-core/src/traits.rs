//! Shared trait seams used across apimap crates.

use crate::errors::StorageError;
use crate::types::EndpointRecord;

/// Persistence collaborator for the endpoint catalog.
///
/// `persist` receives the full catalog on every update — a full-document
/// rewrite, not an incremental append. Implementations must keep the write
/// atomic from a reader's point of view: a concurrent reader sees either
/// the previous document or the new one, never a partial write.
pub trait CatalogSink: Send + Sync {
    fn persist(&self, records: &[EndpointRecord]) -> Result<(), StorageError>;
}

/// Sink that discards every catalog update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpSink;

impl CatalogSink for NoOpSink {
    fn persist(&self, _records: &[EndpointRecord]) -> Result<(), StorageError> {
        Ok(())
    }
}
