//! Endpoint extraction from method-level routing markers.
//!
//! The most intricate part of the engine: qualify the method, resolve the
//! verb, resolve the path, synthesize parameter records, attach the
//! placeholder response. Every step tolerates partial information — an
//! entry with a placeholder path is more useful to catalog consumers than
//! a dropped entry.

use std::collections::BTreeMap;

use apimap_core::config::{EngineConfig, RoutingKind};
use apimap_core::constants;
use apimap_core::types::{
    EndpointRecord, HttpMethod, Marker, MethodDescriptor, ParameterDescriptor, ParameterLocation,
    ParameterRecord, ResponseSpec, SchemaRef,
};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

/// Derives an [`EndpointRecord`] from a method's declarative markers.
pub struct EndpointExtractor {
    routing: FxHashMap<String, RoutingKind>,
    parameters: FxHashMap<String, ParameterLocation>,
    context_types: FxHashSet<String>,
    placeholder_path: String,
}

impl EndpointExtractor {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            routing: config
                .routing_markers
                .iter()
                .map(|(name, kind)| (name.clone(), *kind))
                .collect(),
            parameters: config
                .parameter_markers
                .iter()
                .map(|(name, location)| (name.clone(), *location))
                .collect(),
            context_types: config.context_parameter_types.iter().cloned().collect(),
            placeholder_path: config.placeholder_path.clone(),
        }
    }

    /// Extract the endpoint a method exposes, if any.
    ///
    /// A method qualifies iff it carries a recognized routing marker.
    /// Non-qualifying methods yield `None` (not an error); exactly one
    /// record is produced per qualifying method. Never panics and never
    /// propagates — anomalies degrade to fallback values.
    pub fn extract(&self, method: &MethodDescriptor) -> Option<EndpointRecord> {
        let routing: Vec<(&Marker, RoutingKind)> = method
            .markers
            .iter()
            .filter_map(|marker| self.routing.get(&marker.name).map(|kind| (marker, *kind)))
            .collect();
        if routing.is_empty() {
            return None;
        }

        let (qualifying, verb) = self.resolve_verb(&routing, method)?;
        let path = self.resolve_path(qualifying, method);
        let parameters = self.resolve_parameters(method);

        let mut responses = BTreeMap::new();
        responses.insert(constants::SUCCESS_STATUS.to_string(), ResponseSpec::ok());

        Some(EndpointRecord {
            path,
            method: verb,
            parameters,
            controller: method.class_name.clone(),
            responses,
        })
    }

    /// Pick the qualifying marker and its verb.
    ///
    /// A verb shortcut always beats the generic mapping marker. Multiple
    /// shortcuts on one method is illegal in the source framework but must
    /// not crash the engine: the first in declaration order wins.
    fn resolve_verb<'m>(
        &self,
        routing: &[(&'m Marker, RoutingKind)],
        method: &MethodDescriptor,
    ) -> Option<(&'m Marker, HttpMethod)> {
        let mut shortcuts = routing
            .iter()
            .filter_map(|(marker, kind)| kind.implied_method().map(|verb| (*marker, verb)));

        if let Some((marker, verb)) = shortcuts.next() {
            if shortcuts.next().is_some() {
                debug!(
                    method = %method.name,
                    "multiple verb shortcut markers; first in declaration order wins"
                );
            }
            return Some((marker, verb));
        }

        // Generic mapping only: the verb comes from the marker's own
        // `method` attribute, defaulting to GET.
        let (marker, _) = *routing.first()?;
        let verb = marker
            .attribute("method")
            .and_then(HttpMethod::parse_attribute)
            .unwrap_or(HttpMethod::Get);
        Some((marker, verb))
    }

    /// Path from the qualifying marker's `path`/`value` attribute, falling
    /// back to the placeholder when absent or unreadable.
    fn resolve_path(&self, marker: &Marker, method: &MethodDescriptor) -> String {
        let raw = marker
            .attribute("path")
            .or_else(|| marker.attribute("value"))
            .map(str::trim)
            .filter(|value| !value.is_empty());

        match raw {
            Some(path) => normalize_path(path),
            None => {
                debug!(
                    method = %method.name,
                    marker = %marker.name,
                    "no resolvable path attribute; using placeholder"
                );
                self.placeholder_path.clone()
            }
        }
    }

    fn resolve_parameters(&self, method: &MethodDescriptor) -> Vec<ParameterRecord> {
        method
            .parameters
            .iter()
            .enumerate()
            .filter(|(_, param)| {
                // The inbound transport object is never a logical parameter.
                !self.context_types.contains(&param.type_name)
            })
            .map(|(index, param)| self.parameter_record(index, param))
            .collect()
    }

    /// Synthesize one parameter record. Positional naming uses the raw
    /// declaration index; a recognized parameter marker refines name,
    /// location, and requiredness. Defaults are the conservative,
    /// always-safe choices: query, required, string.
    fn parameter_record(&self, index: usize, param: &ParameterDescriptor) -> ParameterRecord {
        let refined = param
            .markers
            .iter()
            .find_map(|marker| {
                self.parameters
                    .get(&marker.name)
                    .map(|location| (marker, *location))
            });

        let (name, location, required) = match refined {
            Some((marker, location)) => {
                let name = marker
                    .attribute("name")
                    .or_else(|| marker.attribute("value"))
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| positional_name(index));
                let required = marker
                    .attribute("required")
                    .map(|value| value.trim() != "false")
                    .unwrap_or(true);
                (name, location, required)
            }
            None => (positional_name(index), ParameterLocation::Query, true),
        };

        ParameterRecord {
            name,
            location,
            required,
            schema: SchemaRef::string(),
        }
    }
}

fn positional_name(index: usize) -> String {
    format!("{}{index}", constants::POSITIONAL_PARAM_PREFIX)
}

/// Ensure a leading slash on marker-declared paths.
fn normalize_path(raw: &str) -> String {
    if raw.starts_with('/') {
        raw.to_string()
    } else {
        format!("/{raw}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apimap_core::types::Marker;

    fn extractor() -> EndpointExtractor {
        EndpointExtractor::new(&EngineConfig::default())
    }

    fn method() -> MethodDescriptor {
        MethodDescriptor::new("com.example.UserController", "getUser")
    }

    #[test]
    fn unmarked_method_yields_no_record() {
        assert!(extractor().extract(&method()).is_none());
    }

    #[test]
    fn get_shortcut_wins() {
        let m = method().with_marker(Marker::new("GetMapping").with_attribute("value", "/users"));
        let record = extractor().extract(&m).unwrap();
        assert_eq!(record.method, HttpMethod::Get);
        assert_eq!(record.path, "/users");
        assert_eq!(record.controller, "com.example.UserController");
    }

    #[test]
    fn generic_mapping_reads_method_attribute() {
        let m = method().with_marker(
            Marker::new("RequestMapping")
                .with_attribute("value", "/users")
                .with_attribute("method", "RequestMethod.POST"),
        );
        let record = extractor().extract(&m).unwrap();
        assert_eq!(record.method, HttpMethod::Post);
    }

    #[test]
    fn generic_mapping_defaults_to_get() {
        let m = method().with_marker(Marker::new("RequestMapping").with_attribute("value", "/u"));
        assert_eq!(extractor().extract(&m).unwrap().method, HttpMethod::Get);
    }

    #[test]
    fn unparsable_method_attribute_defaults_to_get() {
        let m = method().with_marker(
            Marker::new("RequestMapping").with_attribute("method", "TRACE"),
        );
        assert_eq!(extractor().extract(&m).unwrap().method, HttpMethod::Get);
    }

    #[test]
    fn first_shortcut_wins_on_ambiguity() {
        let m = method()
            .with_marker(Marker::new("PostMapping").with_attribute("value", "/create"))
            .with_marker(Marker::new("GetMapping").with_attribute("value", "/read"));
        let record = extractor().extract(&m).unwrap();
        assert_eq!(record.method, HttpMethod::Post);
        assert_eq!(record.path, "/create");
    }

    #[test]
    fn shortcut_beats_generic_mapping() {
        let m = method()
            .with_marker(
                Marker::new("RequestMapping").with_attribute("method", "RequestMethod.DELETE"),
            )
            .with_marker(Marker::new("PutMapping").with_attribute("value", "/u"));
        assert_eq!(extractor().extract(&m).unwrap().method, HttpMethod::Put);
    }

    #[test]
    fn missing_path_attribute_falls_back_to_placeholder() {
        let m = method().with_marker(Marker::new("GetMapping"));
        let record = extractor().extract(&m).unwrap();
        assert_eq!(record.path, "/unresolved");
    }

    #[test]
    fn blank_path_attribute_falls_back_to_placeholder() {
        let m = method().with_marker(Marker::new("GetMapping").with_attribute("value", "   "));
        assert_eq!(extractor().extract(&m).unwrap().path, "/unresolved");
    }

    #[test]
    fn path_attribute_key_is_accepted_too() {
        let m = method().with_marker(Marker::new("GetMapping").with_attribute("path", "/users"));
        assert_eq!(extractor().extract(&m).unwrap().path, "/users");
    }

    #[test]
    fn relative_path_gains_leading_slash() {
        let m = method().with_marker(Marker::new("GetMapping").with_attribute("value", "users"));
        assert_eq!(extractor().extract(&m).unwrap().path, "/users");
    }

    #[test]
    fn context_parameters_are_skipped() {
        let m = method()
            .with_marker(Marker::new("GetMapping").with_attribute("value", "/users"))
            .with_parameter(ParameterDescriptor::new(
                "javax.servlet.http.HttpServletRequest",
            ))
            .with_parameter(ParameterDescriptor::new("java.lang.String"));
        let record = extractor().extract(&m).unwrap();
        assert_eq!(record.parameters.len(), 1);
        // Positional naming counts the raw declaration index.
        assert_eq!(record.parameters[0].name, "param1");
        assert_eq!(record.parameters[0].location, ParameterLocation::Query);
        assert!(record.parameters[0].required);
        assert_eq!(record.parameters[0].schema.schema_type, "string");
    }

    #[test]
    fn jakarta_context_types_are_skipped() {
        let m = method()
            .with_marker(Marker::new("GetMapping"))
            .with_parameter(ParameterDescriptor::new(
                "jakarta.servlet.http.HttpServletRequest",
            ));
        assert!(extractor().extract(&m).unwrap().parameters.is_empty());
    }

    #[test]
    fn parameter_marker_refines_name_and_location() {
        let m = method()
            .with_marker(Marker::new("GetMapping").with_attribute("value", "/users/{id}"))
            .with_parameter(
                ParameterDescriptor::new("java.lang.Long").with_marker(
                    Marker::new("PathVariable").with_attribute("value", "id"),
                ),
            );
        let record = extractor().extract(&m).unwrap();
        assert_eq!(record.parameters[0].name, "id");
        assert_eq!(record.parameters[0].location, ParameterLocation::Path);
    }

    #[test]
    fn request_param_required_false_clears_flag() {
        let m = method()
            .with_marker(Marker::new("GetMapping"))
            .with_parameter(
                ParameterDescriptor::new("java.lang.String").with_marker(
                    Marker::new("RequestParam")
                        .with_attribute("name", "q")
                        .with_attribute("required", "false"),
                ),
            );
        let record = extractor().extract(&m).unwrap();
        assert_eq!(record.parameters[0].name, "q");
        assert!(!record.parameters[0].required);
    }

    #[test]
    fn nameless_parameter_marker_keeps_positional_name() {
        let m = method()
            .with_marker(Marker::new("PostMapping"))
            .with_parameter(
                ParameterDescriptor::new("com.example.UserDto")
                    .with_marker(Marker::new("RequestBody")),
            );
        let record = extractor().extract(&m).unwrap();
        assert_eq!(record.parameters[0].name, "param0");
        assert_eq!(record.parameters[0].location, ParameterLocation::Body);
    }

    #[test]
    fn every_record_carries_the_synthetic_response() {
        let m = method().with_marker(Marker::new("GetMapping"));
        let record = extractor().extract(&m).unwrap();
        let response = record.responses.get("200").unwrap();
        assert_eq!(response.description, "ok");
        assert_eq!(
            response.content.get("*/*").unwrap().schema.schema_type,
            "object"
        );
        assert_eq!(record.responses.len(), 1);
    }
}
