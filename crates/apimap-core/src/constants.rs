//! Shared literals for the discovery engine and the persisted artifact.

/// Path recorded when a routing marker carries no resolvable path attribute.
pub const PLACEHOLDER_PATH: &str = "/unresolved";

/// Default file name of the persisted catalog document.
pub const DEFAULT_OUTPUT_FILE: &str = "api_catalog.json";

/// Description of the synthetic 200 response.
pub const SUCCESS_DESCRIPTION: &str = "ok";

/// Media-type key of the generic response content.
pub const WILDCARD_MEDIA_TYPE: &str = "*/*";

/// Schema type recorded for parameters without finer-grained information.
pub const SCHEMA_TYPE_STRING: &str = "string";

/// Schema type of the generic response body.
pub const SCHEMA_TYPE_OBJECT: &str = "object";

/// Prefix for positional parameter names (`param0`, `param1`, ...).
pub const POSITIONAL_PARAM_PREFIX: &str = "param";

/// Status code of the synthetic response entry.
pub const SUCCESS_STATUS: &str = "200";
