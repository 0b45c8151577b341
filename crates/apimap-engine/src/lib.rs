//! # apimap-engine
//!
//! Endpoint discovery engine for the apimap catalog. Classifies loaded
//! classes as API controllers, derives endpoint records from the
//! declarative markers on their methods and parameters, and assembles the
//! de-duplicated, persisted catalog.
//!
//! The engine is host-runtime-agnostic: raw class bytes arrive through
//! [`ClassObserver::observe_class`], structural views come from an injected
//! [`ClassMetadataProvider`], and persistence goes through an injected
//! [`CatalogSink`](apimap_core::traits::CatalogSink). Feeding
//! [`ClassDescriptor`](apimap_core::types::ClassDescriptor) values straight
//! into the assembler bypasses the hook entirely.

pub mod assembler;
pub mod classifier;
pub mod extractor;
pub mod hook;
pub mod provider;

pub use assembler::CatalogAssembler;
pub use classifier::ControllerClassifier;
pub use extractor::EndpointExtractor;
pub use hook::ClassObserver;
pub use provider::{ClassMetadataProvider, JsonDescriptorProvider};
