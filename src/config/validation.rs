use super::models::Settings;
use crate::chain::Descriptor;
use crate::discovery::NamespaceManifest;
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Namespace names must not be empty")]
    EmptyNamespaceName,

    #[error("Namespace '{namespace}' has an element without a type id (position {position})")]
    EmptyTypeId { namespace: String, position: usize },

    #[error("Namespace '{namespace}' declares '{type_id}' more than once")]
    DuplicateElement { namespace: String, type_id: String },

    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidLogFilter { filter: String, reason: String },
}

/// Validate the entire configuration
pub fn validate(settings: &Settings) -> Result<(), ValidationError> {
    validate_namespaces(&settings.namespaces)?;
    validate_telemetry(settings)?;
    Ok(())
}

/// Every namespace needs a name, and each of its elements a distinct type id
pub fn validate_namespaces(
    namespaces: &BTreeMap<String, NamespaceManifest>,
) -> Result<(), ValidationError> {
    for (namespace, manifest) in namespaces {
        if namespace.trim().is_empty() {
            return Err(ValidationError::EmptyNamespaceName);
        }
        validate_elements(namespace, &manifest.elements)?;
    }

    Ok(())
}

/// Each element of `namespace` needs a non-empty type id used only once
pub fn validate_elements(namespace: &str, elements: &[Descriptor]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for (position, element) in elements.iter().enumerate() {
        if element.type_id.trim().is_empty() {
            return Err(ValidationError::EmptyTypeId {
                namespace: namespace.to_string(),
                position,
            });
        }

        if !seen.insert(element.type_id.as_str()) {
            return Err(ValidationError::DuplicateElement {
                namespace: namespace.to_string(),
                type_id: element.type_id.clone(),
            });
        }
    }

    Ok(())
}

fn validate_telemetry(settings: &Settings) -> Result<(), ValidationError> {
    EnvFilter::try_new(&settings.telemetry.log_filter).map_err(|err| {
        ValidationError::InvalidLogFilter {
            filter: settings.telemetry.log_filter.clone(),
            reason: err.to_string(),
        }
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_settings() -> Settings {
        let mut namespaces = BTreeMap::new();
        namespaces.insert(
            "routing".to_string(),
            NamespaceManifest {
                elements: vec![
                    Descriptor::new("integer").with_priority(1),
                    Descriptor::new("url").with_priority(1),
                ],
            },
        );

        Settings {
            namespaces,
            ..Settings::default()
        }
    }

    #[test]
    fn test_valid_settings() {
        let settings = create_test_settings();
        assert!(validate(&settings).is_ok());
    }

    #[test]
    fn test_empty_namespace_is_valid() {
        let mut settings = create_test_settings();
        settings
            .namespaces
            .insert("nothing".to_string(), NamespaceManifest::default());

        assert!(validate(&settings).is_ok());
    }

    #[test]
    fn test_blank_namespace_name() {
        let mut settings = create_test_settings();
        settings
            .namespaces
            .insert("  ".to_string(), NamespaceManifest::default());

        let result = validate(&settings);
        assert!(matches!(result, Err(ValidationError::EmptyNamespaceName)));
    }

    #[test]
    fn test_empty_type_id() {
        let mut settings = create_test_settings();
        settings
            .namespaces
            .get_mut("routing")
            .unwrap()
            .elements
            .push(Descriptor::new(""));

        let result = validate(&settings);
        assert!(matches!(
            result,
            Err(ValidationError::EmptyTypeId { position: 2, .. })
        ));
    }

    #[test]
    fn test_duplicate_type_id() {
        let mut settings = create_test_settings();
        settings
            .namespaces
            .get_mut("routing")
            .unwrap()
            .elements
            .push(Descriptor::new("url").with_priority(9));

        let result = validate(&settings);
        assert!(matches!(
            result,
            Err(ValidationError::DuplicateElement { ref type_id, .. }) if type_id == "url"
        ));
    }

    #[test]
    fn test_invalid_log_filter() {
        let mut settings = create_test_settings();
        settings.telemetry.log_filter = "corchain=loud".to_string();

        let result = validate(&settings);
        assert!(matches!(
            result,
            Err(ValidationError::InvalidLogFilter { .. })
        ));
    }
}
