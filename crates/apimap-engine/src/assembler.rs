//! Catalog assembly: dedup, append, synchronous persist.

use std::sync::{Arc, Mutex, MutexGuard};

use apimap_core::config::EngineConfig;
use apimap_core::traits::CatalogSink;
use apimap_core::types::{Catalog, ClassDescriptor, EndpointRecord, ProcessedClassSet};
use tracing::{debug, warn};

use crate::classifier::ControllerClassifier;
use crate::extractor::EndpointExtractor;

/// Shared mutable state: the processed-class set and the growing catalog.
#[derive(Default)]
struct AssemblerState {
    processed: ProcessedClassSet,
    catalog: Catalog,
}

/// Aggregates extracted endpoint records into the catalog and persists the
/// full document after every update.
///
/// Safe under concurrent observation from many class-loading threads: the
/// dedup claim and the append+persist section are serialized by one mutex,
/// while classification and extraction run outside it. A class name claimed
/// by one thread is never re-extracted by another, so growth is idempotent
/// per fully-qualified name.
pub struct CatalogAssembler {
    classifier: ControllerClassifier,
    extractor: EndpointExtractor,
    state: Mutex<AssemblerState>,
    sink: Arc<dyn CatalogSink>,
}

impl CatalogAssembler {
    pub fn new(config: &EngineConfig, sink: Arc<dyn CatalogSink>) -> Self {
        Self {
            classifier: ControllerClassifier::new(config),
            extractor: EndpointExtractor::new(config),
            state: Mutex::new(AssemblerState::default()),
            sink,
        }
    }

    /// Observe one class. Repeat observations of an already-seen
    /// fully-qualified name are no-ops; dedup is by qualified name, never
    /// by simple name.
    pub fn on_class_observed(&self, class: &ClassDescriptor) {
        {
            let mut state = self.lock_state();
            if !state.processed.insert(class.qualified_name.clone()) {
                return;
            }
        }

        if !self.classifier.is_controller(class) {
            return;
        }
        debug!(class = %class.qualified_name, "controller recognized");

        let records: Vec<EndpointRecord> = class
            .methods
            .iter()
            .filter_map(|method| self.extractor.extract(method))
            .collect();
        if records.is_empty() {
            return;
        }

        let mut state = self.lock_state();
        state.catalog.extend(records);
        if let Err(err) = self.sink.persist(state.catalog.records()) {
            // The in-memory catalog is retained; the next successful append
            // rewrites the whole document.
            warn!(
                class = %class.qualified_name,
                error = %err,
                "catalog persist failed"
            );
        }
    }

    /// Number of records currently in the catalog.
    pub fn record_count(&self) -> usize {
        self.lock_state().catalog.len()
    }

    /// Number of distinct classes observed so far.
    pub fn processed_count(&self) -> usize {
        self.lock_state().processed.len()
    }

    /// Snapshot of the current catalog records.
    pub fn snapshot(&self) -> Vec<EndpointRecord> {
        self.lock_state().catalog.records().to_vec()
    }

    fn lock_state(&self) -> MutexGuard<'_, AssemblerState> {
        // A panicked holder must not take the host process down with it;
        // the state itself stays consistent (append-only).
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
