//! Descriptor and catalog record types for endpoint discovery.
//!
//! Descriptors are the read-only structural view a class metadata provider
//! produces from raw class bytes. Records are what the engine derives from
//! them; their serde shapes match the persisted catalog artifact exactly.

use std::collections::BTreeMap;
use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::constants;

/// Fully-qualified names of classes already inspected.
///
/// Used purely for idempotence: each class is classified and extracted at
/// most once per process lifetime, regardless of how many times the host
/// observes it.
pub type ProcessedClassSet = FxHashSet<String>;

/// A declarative marker attached to a class, method, or parameter.
///
/// Markers are resolved once by the class metadata provider; attribute
/// values arrive already stringified. An attribute the provider could not
/// read is simply absent from the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// Marker name as declared (simple or fully qualified).
    pub name: String,
    /// Resolved attribute values, keyed by attribute name.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Marker {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Look up an attribute value.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// Static view of one declared method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Fully-qualified static type name.
    pub type_name: String,
    #[serde(default)]
    pub markers: Vec<Marker>,
}

impl ParameterDescriptor {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            markers: Vec::new(),
        }
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }
}

/// Static view of one declared method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Name of the declaring class (back-reference, not ownership).
    pub class_name: String,
    pub name: String,
    /// Parameters in declaration order.
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
    /// Method-level markers in declaration order.
    #[serde(default)]
    pub markers: Vec<Marker>,
}

impl MethodDescriptor {
    pub fn new(class_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            name: name.into(),
            parameters: Vec::new(),
            markers: Vec::new(),
        }
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }
}

/// Read-only structural view of a loaded class.
///
/// Produced by the class metadata provider from the byte representation
/// currently being loaded; the engine never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    pub qualified_name: String,
    /// Class-level markers in declaration order.
    #[serde(default)]
    pub markers: Vec<Marker>,
    /// Declared methods in declaration order.
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
}

impl ClassDescriptor {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            markers: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }
}

/// HTTP verb of a discovered endpoint. Serializes as the lowercase verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
            Self::Patch => "patch",
            Self::Head => "head",
            Self::Options => "options",
        }
    }

    /// Parse a verb as it appears in a mapping marker attribute: `GET`,
    /// `get`, or the `RequestMethod.GET` constant spelling.
    pub fn parse_attribute(value: &str) -> Option<Self> {
        let verb = value.trim().rsplit('.').next().unwrap_or(value);
        match verb.trim().to_ascii_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "DELETE" => Some(Self::Delete),
            "PATCH" => Some(Self::Patch),
            "HEAD" => Some(Self::Head),
            "OPTIONS" => Some(Self::Options),
            _ => None,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a parameter is carried in the request. Serialized under the
/// artifact key `in`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Path,
    Body,
    Header,
}

/// Generic schema placeholder: `{"type": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRef {
    #[serde(rename = "type")]
    pub schema_type: String,
}

impl SchemaRef {
    pub fn string() -> Self {
        Self {
            schema_type: constants::SCHEMA_TYPE_STRING.to_string(),
        }
    }

    pub fn object() -> Self {
        Self {
            schema_type: constants::SCHEMA_TYPE_OBJECT.to_string(),
        }
    }
}

/// One logical API parameter of a discovered endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterRecord {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    pub required: bool,
    pub schema: SchemaRef,
}

/// Media-type entry of a response: `{"schema": {"type": "object"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaTypeSpec {
    pub schema: SchemaRef,
}

/// Response shape placeholder. Exact response-type inference is out of
/// scope, so every endpoint carries one synthetic entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSpec {
    pub description: String,
    pub content: BTreeMap<String, MediaTypeSpec>,
}

impl ResponseSpec {
    /// The synthetic 200 response: generic object under the wildcard
    /// media type.
    pub fn ok() -> Self {
        let mut content = BTreeMap::new();
        content.insert(
            constants::WILDCARD_MEDIA_TYPE.to_string(),
            MediaTypeSpec {
                schema: SchemaRef::object(),
            },
        );
        Self {
            description: constants::SUCCESS_DESCRIPTION.to_string(),
            content,
        }
    }
}

/// One discovered HTTP endpoint. Immutable once assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointRecord {
    pub path: String,
    pub method: HttpMethod,
    pub parameters: Vec<ParameterRecord>,
    /// Fully-qualified name of the declaring controller class.
    pub controller: String,
    /// Status code string to response shape.
    pub responses: BTreeMap<String, ResponseSpec>,
}

/// Append-only, ordered collection of discovered endpoints.
///
/// Monotonically growing within one process run: records are never removed
/// or mutated after insertion.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    records: Vec<EndpointRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: EndpointRecord) {
        self.records.push(record);
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = EndpointRecord>) {
        self.records.extend(records);
    }

    pub fn records(&self) -> &[EndpointRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
