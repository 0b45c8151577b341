//! # apimap-core
//!
//! Core types, traits, errors, config, telemetry, and constants for the
//! apimap endpoint discovery engine.

pub mod config;
pub mod constants;
pub mod errors;
pub mod telemetry;
pub mod traits;
pub mod types;

pub use config::EngineConfig;
pub use traits::{CatalogSink, NoOpSink};
pub use types::{Catalog, ClassDescriptor, EndpointRecord, HttpMethod};
