//! Class-observation boundary.
//!
//! The host runtime's load-time hook hands every loaded class here. The
//! observer is passive: the input bytes are always returned unchanged, and
//! no failure of any kind propagates back to the caller — a hook-facing
//! failure could destabilize the host process loading unrelated classes.

use std::sync::Arc;

use apimap_core::config::EngineConfig;
use apimap_core::traits::CatalogSink;
use tracing::debug;

use crate::assembler::CatalogAssembler;
use crate::provider::ClassMetadataProvider;

/// Entry point of the discovery engine for load-time class observation.
pub struct ClassObserver {
    provider: Box<dyn ClassMetadataProvider>,
    assembler: CatalogAssembler,
    skip_prefixes: Vec<String>,
}

impl ClassObserver {
    pub fn new(
        config: &EngineConfig,
        provider: Box<dyn ClassMetadataProvider>,
        sink: Arc<dyn CatalogSink>,
    ) -> Self {
        Self {
            provider,
            assembler: CatalogAssembler::new(config, sink),
            skip_prefixes: config.skip_prefixes.clone(),
        }
    }

    /// Observe a class the host runtime is loading.
    ///
    /// `qualified_name` may use the JVM-internal slash form
    /// (`com/example/Foo`); it is normalized to dotted form before any
    /// other processing. Platform classes matching a configured skip prefix
    /// are ignored. The raw bytes come back unchanged in every case.
    pub fn observe_class<'b>(&self, qualified_name: &str, raw_bytes: &'b [u8]) -> &'b [u8] {
        let name = qualified_name.replace('/', ".");
        if name.is_empty() || self.is_skipped(&name) {
            return raw_bytes;
        }

        match self.provider.describe(&name, raw_bytes) {
            Ok(class) => self.assembler.on_class_observed(&class),
            Err(err) => {
                debug!(class = %name, error = %err, "skipping class: descriptor unavailable");
            }
        }
        raw_bytes
    }

    /// The assembler backing this observer, for catalog inspection.
    pub fn assembler(&self) -> &CatalogAssembler {
        &self.assembler
    }

    fn is_skipped(&self, name: &str) -> bool {
        self.skip_prefixes
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
    }
}
