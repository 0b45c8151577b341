//! In-memory catalog sink.

use std::sync::{Mutex, MutexGuard};

use apimap_core::errors::StorageError;
use apimap_core::traits::CatalogSink;
use apimap_core::types::EndpointRecord;

/// Retains the most recent persisted snapshot and a persist counter.
///
/// Useful for embedders that keep the catalog in process memory, and for
/// asserting on persisted state in tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    last: Vec<EndpointRecord>,
    persists: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent snapshot handed to `persist`.
    pub fn last_snapshot(&self) -> Vec<EndpointRecord> {
        self.lock().last.clone()
    }

    /// Number of persist calls observed.
    pub fn persist_count(&self) -> usize {
        self.lock().persists
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CatalogSink for MemorySink {
    fn persist(&self, records: &[EndpointRecord]) -> Result<(), StorageError> {
        let mut inner = self.lock();
        inner.last = records.to_vec();
        inner.persists += 1;
        Ok(())
    }
}
