use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{Discovery, DiscoveryError};
use crate::chain::Descriptor;
use crate::config::validation;

/// Handler list of one namespace as written in TOML
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NamespaceManifest {
    #[serde(default)]
    pub elements: Vec<Descriptor>,
}

/// Standalone manifest file: a `[namespaces.<name>]` table per namespace
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Manifest {
    #[serde(default)]
    pub namespaces: BTreeMap<String, NamespaceManifest>,
}

/// Namespaces declared in a manifest
///
/// ```toml
/// [namespaces.support]
/// elements = [
///     { type_id = "keyword", priority = 1, initializer = "keywords", options = { keywords = ["refund"] } },
///     { type_id = "catch_all", priority = 100 },
/// ]
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManifestDiscovery {
    namespaces: BTreeMap<String, NamespaceManifest>,
}

impl ManifestDiscovery {
    pub fn new(namespaces: BTreeMap<String, NamespaceManifest>) -> Self {
        Self { namespaces }
    }

    /// Parse and validate a manifest document
    pub fn from_toml_str(content: &str) -> Result<Self, DiscoveryError> {
        let manifest: Manifest = toml::from_str(content)?;
        validation::validate_namespaces(&manifest.namespaces)?;
        Ok(Self::new(manifest.namespaces))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DiscoveryError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DiscoveryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let discovery = Self::from_toml_str(&content)?;
        info!(
            path = %path.display(),
            namespaces = discovery.namespaces.len(),
            "Loaded chain manifest"
        );
        Ok(discovery)
    }

    pub fn contains(&self, namespace: &str) -> bool {
        self.namespaces.contains_key(namespace)
    }
}

impl Discovery for ManifestDiscovery {
    fn discover(&self, namespace: &str) -> Result<Vec<Descriptor>, DiscoveryError> {
        self.namespaces
            .get(namespace)
            .map(|manifest| manifest.elements.clone())
            .ok_or_else(|| DiscoveryError::NamespaceNotFound(namespace.to_string()))
    }

    fn namespaces(&self) -> Vec<String> {
        self.namespaces.keys().cloned().collect()
    }
}
