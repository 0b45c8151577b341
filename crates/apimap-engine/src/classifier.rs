//! Controller classification over class-level markers.

use apimap_core::config::{ControllerRole, EngineConfig};
use apimap_core::types::ClassDescriptor;
use rustc_hash::FxHashMap;

/// Decides whether a class is an API controller.
///
/// Classification is pure: it looks only at the descriptor handed in, which
/// reflects the byte representation currently being loaded (staleness is
/// handled one level up by the assembler's dedup). Anything unexpected
/// degrades to "not a controller" — a false negative is accepted, a crash
/// is not.
pub struct ControllerClassifier {
    roles: FxHashMap<String, ControllerRole>,
}

impl ControllerClassifier {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            roles: config
                .controller_markers
                .iter()
                .map(|(name, role)| (name.clone(), *role))
                .collect(),
        }
    }

    /// Role of the first recognized class-level marker, if any.
    pub fn classify(&self, class: &ClassDescriptor) -> Option<ControllerRole> {
        class
            .markers
            .iter()
            .find_map(|marker| self.roles.get(&marker.name).copied())
    }

    pub fn is_controller(&self, class: &ClassDescriptor) -> bool {
        self.classify(class).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apimap_core::types::Marker;

    fn classifier() -> ControllerClassifier {
        ControllerClassifier::new(&EngineConfig::default())
    }

    #[test]
    fn recognizes_rest_controller_by_simple_name() {
        let class = ClassDescriptor::new("com.example.UserController")
            .with_marker(Marker::new("RestController"));
        assert_eq!(classifier().classify(&class), Some(ControllerRole::Rest));
    }

    #[test]
    fn recognizes_stereotype_by_qualified_name() {
        let class = ClassDescriptor::new("com.example.PageController")
            .with_marker(Marker::new("org.springframework.stereotype.Controller"));
        assert_eq!(classifier().classify(&class), Some(ControllerRole::Web));
    }

    #[test]
    fn ignores_unrelated_markers() {
        let class = ClassDescriptor::new("com.example.Helper")
            .with_marker(Marker::new("Component"))
            .with_marker(Marker::new("Deprecated"));
        assert!(!classifier().is_controller(&class));
    }

    #[test]
    fn markerless_class_is_not_a_controller() {
        let class = ClassDescriptor::new("com.example.Helper");
        assert!(!classifier().is_controller(&class));
    }

    #[test]
    fn respects_configured_table() {
        let config = EngineConfig::from_toml_str(
            r#"
            [controller_markers]
            Resource = "rest"
            "#,
        )
        .unwrap();
        let classifier = ControllerClassifier::new(&config);

        let resource =
            ClassDescriptor::new("com.example.R").with_marker(Marker::new("Resource"));
        let spring = ClassDescriptor::new("com.example.S")
            .with_marker(Marker::new("RestController"));

        assert!(classifier.is_controller(&resource));
        assert!(!classifier.is_controller(&spring));
    }
}
