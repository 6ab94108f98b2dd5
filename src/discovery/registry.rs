use std::collections::BTreeMap;

use super::{Discovery, DiscoveryError};
use crate::chain::Descriptor;
use crate::config::validation;

/// Namespaces assembled in code
#[derive(Debug, Clone, Default)]
pub struct RegistryDiscovery {
    namespaces: BTreeMap<String, Vec<Descriptor>>,
}

impl RegistryDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `descriptor` to `namespace`, creating the namespace if needed
    pub fn declare(&mut self, namespace: impl Into<String>, descriptor: Descriptor) -> &mut Self {
        self.namespaces
            .entry(namespace.into())
            .or_default()
            .push(descriptor);
        self
    }

    /// Make `namespace` known without adding descriptors to it
    pub fn declare_namespace(&mut self, namespace: impl Into<String>) -> &mut Self {
        self.namespaces.entry(namespace.into()).or_default();
        self
    }

    pub fn contains(&self, namespace: &str) -> bool {
        self.namespaces.contains_key(namespace)
    }
}

impl Discovery for RegistryDiscovery {
    fn discover(&self, namespace: &str) -> Result<Vec<Descriptor>, DiscoveryError> {
        let descriptors = self
            .namespaces
            .get(namespace)
            .ok_or_else(|| DiscoveryError::NamespaceNotFound(namespace.to_string()))?;
        validation::validate_elements(namespace, descriptors)?;
        Ok(descriptors.clone())
    }

    fn namespaces(&self) -> Vec<String> {
        self.namespaces.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationError;

    #[test]
    fn test_declare_and_discover() {
        let mut registry = RegistryDiscovery::new();
        registry
            .declare("routes", Descriptor::new("b").with_priority(2))
            .declare("routes", Descriptor::new("a"))
            .declare_namespace("empty");

        let found = registry.discover("routes").unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].type_id, "b");
        assert_eq!(found[1].type_id, "a");

        assert!(registry.discover("empty").unwrap().is_empty());
        assert_eq!(registry.namespaces(), vec!["empty", "routes"]);
    }

    #[test]
    fn test_unknown_namespace() {
        let registry = RegistryDiscovery::new();
        let result = registry.discover("nowhere");
        assert!(matches!(result, Err(DiscoveryError::NamespaceNotFound(ns)) if ns == "nowhere"));
    }

    #[test]
    fn test_repeated_type_id_rejected() {
        let mut registry = RegistryDiscovery::new();
        registry
            .declare("routes", Descriptor::new("url"))
            .declare("routes", Descriptor::new("blank"))
            .declare("routes", Descriptor::new("url").with_priority(4));

        let result = registry.discover("routes");
        assert!(matches!(
            result,
            Err(DiscoveryError::Invalid(ValidationError::DuplicateElement { ref type_id, .. }))
                if type_id == "url"
        ));
    }
}
