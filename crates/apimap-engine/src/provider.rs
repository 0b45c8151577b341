//! Class metadata provider seam.
//!
//! The bytecode-to-symbol-table reader is an external collaborator; the
//! engine only ever sees [`ClassDescriptor`] values.
//! [`JsonDescriptorProvider`] is the reference implementation for hosts
//! that hold structural metadata as pre-resolved descriptor documents, and
//! is what the integration tests drive the pipeline with.

use apimap_core::errors::{MarkerError, StructuralError};
use apimap_core::types::{ClassDescriptor, Marker, MethodDescriptor, ParameterDescriptor};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Structural view source for observed classes.
pub trait ClassMetadataProvider: Send + Sync {
    /// Describe the class encoded in `raw_bytes`.
    ///
    /// The descriptor must reflect the byte representation currently being
    /// loaded. Callers treat an error as "skip this class".
    fn describe(
        &self,
        qualified_name: &str,
        raw_bytes: &[u8],
    ) -> Result<ClassDescriptor, StructuralError>;
}

/// Provider for pre-resolved descriptor documents (JSON).
///
/// Document shape:
///
/// ```json
/// {
///   "markers": ["RestController"],
///   "methods": [
///     {
///       "name": "getUser",
///       "markers": [{"name": "GetMapping", "attributes": {"value": "/users"}}],
///       "parameters": [{"type": "java.lang.String", "markers": []}]
///     }
///   ]
/// }
/// ```
///
/// Markers may be a bare name string or an object with `name` and
/// `attributes`. Unresolvable markers are skipped individually; their
/// siblings survive.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonDescriptorProvider;

#[derive(Deserialize)]
struct RawClass {
    #[serde(default)]
    markers: Vec<Value>,
    #[serde(default)]
    methods: Vec<RawMethod>,
}

#[derive(Deserialize)]
struct RawMethod {
    name: String,
    #[serde(default)]
    parameters: Vec<RawParameter>,
    #[serde(default)]
    markers: Vec<Value>,
}

#[derive(Deserialize)]
struct RawParameter {
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    markers: Vec<Value>,
}

impl ClassMetadataProvider for JsonDescriptorProvider {
    fn describe(
        &self,
        qualified_name: &str,
        raw_bytes: &[u8],
    ) -> Result<ClassDescriptor, StructuralError> {
        let raw: RawClass =
            serde_json::from_slice(raw_bytes).map_err(|e| StructuralError::MalformedClass {
                class_name: qualified_name.to_string(),
                message: e.to_string(),
            })?;

        let methods = raw
            .methods
            .into_iter()
            .map(|method| MethodDescriptor {
                class_name: qualified_name.to_string(),
                name: method.name,
                parameters: method
                    .parameters
                    .into_iter()
                    .map(|param| ParameterDescriptor {
                        type_name: param.type_name,
                        markers: resolve_markers(&param.markers),
                    })
                    .collect(),
                markers: resolve_markers(&method.markers),
            })
            .collect();

        Ok(ClassDescriptor {
            qualified_name: qualified_name.to_string(),
            markers: resolve_markers(&raw.markers),
            methods,
        })
    }
}

/// Resolve marker entries individually; an unresolvable marker is skipped
/// and its siblings survive.
fn resolve_markers(raw: &[Value]) -> Vec<Marker> {
    raw.iter()
        .filter_map(|value| match resolve_marker(value) {
            Ok(marker) => Some(marker),
            Err(err) => {
                debug!(error = %err, "skipping marker");
                None
            }
        })
        .collect()
}

fn resolve_marker(value: &Value) -> Result<Marker, MarkerError> {
    match value {
        Value::String(name) => Ok(Marker::new(name.clone())),
        Value::Object(fields) => {
            let name = fields.get("name").and_then(Value::as_str).ok_or_else(|| {
                MarkerError::Unresolvable {
                    marker: value.to_string(),
                    message: "missing `name`".to_string(),
                }
            })?;
            let mut marker = Marker::new(name);
            if let Some(Value::Object(attributes)) = fields.get("attributes") {
                for (key, attribute) in attributes {
                    match scalar_to_string(attribute) {
                        Some(resolved) => {
                            marker.attributes.insert(key.clone(), resolved);
                        }
                        // Unreadable attribute value: treat as absent, the
                        // same fallback trigger as a missing attribute.
                        None => debug!(
                            marker = name,
                            attribute = %key,
                            "attribute not a scalar; treating as absent"
                        ),
                    }
                }
            }
            Ok(marker)
        }
        other => Err(MarkerError::Unresolvable {
            marker: other.to_string(),
            message: "expected string or object".to_string(),
        }),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
