//! Failure taxonomy for the discovery engine.
//!
//! Every error here is contained: classification and extraction degrade to
//! "no record produced", and nothing propagates past the class-observation
//! boundary.

use thiserror::Error;

/// Malformed or unsupported class bytes. The class is skipped.
#[derive(Debug, Error)]
pub enum StructuralError {
    #[error("malformed class bytes for `{class_name}`: {message}")]
    MalformedClass { class_name: String, message: String },

    #[error("descriptor layout not supported: {message}")]
    UnsupportedLayout { message: String },
}

/// A declarative marker that could not be fully introspected. The marker is
/// skipped; sibling markers are still considered.
#[derive(Debug, Error)]
pub enum MarkerError {
    #[error("marker `{marker}` unresolvable: {message}")]
    Unresolvable { marker: String, message: String },
}

/// Catalog persistence failure. Logged and swallowed by the assembler; the
/// in-memory catalog is retained and rewritten on the next append.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("catalog serialization failed: {message}")]
    Serialize { message: String },

    #[error("catalog write to `{path}` failed: {message}")]
    Write { path: String, message: String },
}

/// Configuration loading failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config `{path}`: {message}")]
    Read { path: String, message: String },

    #[error("invalid config: {message}")]
    Parse { message: String },
}
