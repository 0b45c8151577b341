//! Engine configuration: recognized marker tables and runtime knobs.
//!
//! The recognized marker sets are explicit enumerable configuration, not
//! string matching scattered through engine logic. Every field defaults to
//! the Spring annotation vocabulary under both simple and fully-qualified
//! names; deployments can extend or replace the tables via TOML.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::errors::ConfigError;
use crate::types::{HttpMethod, ParameterLocation};

const SPRING_WEB: &str = "org.springframework.web.bind.annotation";
const SPRING_STEREOTYPE: &str = "org.springframework.stereotype";

/// Role a class-level marker assigns to its class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerRole {
    /// REST-style controller; endpoint methods serialize their return value.
    Rest,
    /// Classic web controller.
    Web,
}

/// Routing behavior a method-level marker declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingKind {
    /// Generic mapping marker; the verb comes from its `method` attribute.
    Mapping,
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl RoutingKind {
    /// The implied verb of a shortcut marker, `None` for the generic
    /// mapping marker.
    pub fn implied_method(&self) -> Option<HttpMethod> {
        match self {
            Self::Mapping => None,
            Self::Get => Some(HttpMethod::Get),
            Self::Post => Some(HttpMethod::Post),
            Self::Put => Some(HttpMethod::Put),
            Self::Delete => Some(HttpMethod::Delete),
            Self::Patch => Some(HttpMethod::Patch),
        }
    }
}

/// Configuration for the discovery engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Catalog output path for the JSON sink.
    pub output_path: PathBuf,

    /// Classes whose qualified name starts with one of these prefixes are
    /// never inspected (platform classes are never controllers).
    pub skip_prefixes: Vec<String>,

    /// Class-level markers that make a class a controller.
    pub controller_markers: BTreeMap<String, ControllerRole>,

    /// Method-level markers that expose a method over HTTP.
    pub routing_markers: BTreeMap<String, RoutingKind>,

    /// Parameter-level markers that refine a parameter record.
    pub parameter_markers: BTreeMap<String, ParameterLocation>,

    /// Parameter types carrying the inbound transport object; never logical
    /// API parameters.
    pub context_parameter_types: Vec<String>,

    /// Path recorded when a routing marker has no resolvable path attribute.
    pub placeholder_path: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(constants::DEFAULT_OUTPUT_FILE),
            skip_prefixes: vec![
                "java.".to_string(),
                "javax.".to_string(),
                "jdk.".to_string(),
                "sun.".to_string(),
                "com.sun.".to_string(),
            ],
            controller_markers: default_controller_markers(),
            routing_markers: default_routing_markers(),
            parameter_markers: default_parameter_markers(),
            context_parameter_types: default_context_parameter_types(),
            placeholder_path: constants::PLACEHOLDER_PATH.to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse a config from TOML text. Absent fields keep their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Load a config file from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&raw)
    }
}

/// Insert a marker under both its simple and fully-qualified name.
fn insert_both<V: Copy>(map: &mut BTreeMap<String, V>, package: &str, simple: &str, value: V) {
    map.insert(simple.to_string(), value);
    map.insert(format!("{package}.{simple}"), value);
}

fn default_controller_markers() -> BTreeMap<String, ControllerRole> {
    let mut map = BTreeMap::new();
    insert_both(&mut map, SPRING_WEB, "RestController", ControllerRole::Rest);
    insert_both(&mut map, SPRING_STEREOTYPE, "Controller", ControllerRole::Web);
    map
}

fn default_routing_markers() -> BTreeMap<String, RoutingKind> {
    let mut map = BTreeMap::new();
    insert_both(&mut map, SPRING_WEB, "RequestMapping", RoutingKind::Mapping);
    insert_both(&mut map, SPRING_WEB, "GetMapping", RoutingKind::Get);
    insert_both(&mut map, SPRING_WEB, "PostMapping", RoutingKind::Post);
    insert_both(&mut map, SPRING_WEB, "PutMapping", RoutingKind::Put);
    insert_both(&mut map, SPRING_WEB, "DeleteMapping", RoutingKind::Delete);
    insert_both(&mut map, SPRING_WEB, "PatchMapping", RoutingKind::Patch);
    map
}

fn default_parameter_markers() -> BTreeMap<String, ParameterLocation> {
    let mut map = BTreeMap::new();
    insert_both(&mut map, SPRING_WEB, "RequestParam", ParameterLocation::Query);
    insert_both(&mut map, SPRING_WEB, "PathVariable", ParameterLocation::Path);
    insert_both(&mut map, SPRING_WEB, "RequestBody", ParameterLocation::Body);
    insert_both(&mut map, SPRING_WEB, "RequestHeader", ParameterLocation::Header);
    map
}

fn default_context_parameter_types() -> Vec<String> {
    [
        "javax.servlet.http.HttpServletRequest",
        "javax.servlet.http.HttpServletResponse",
        "javax.servlet.http.HttpSession",
        "jakarta.servlet.http.HttpServletRequest",
        "jakarta.servlet.http.HttpServletResponse",
        "jakarta.servlet.http.HttpSession",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
