//! Handler discovery
//!
//! A [`Discovery`] enumerates the [`Descriptor`]s that make up a namespace.
//! The builder never looks at handler types itself; it only consumes what a
//! discovery hands it.
//!
//! Three sources ship with the crate:
//!
//! - [`StaticDiscovery`] - registrations collected at link time with
//!   [`chain_element!`](crate::chain_element) and
//!   [`chain_namespace!`](crate::chain_namespace)
//! - [`RegistryDiscovery`] - namespaces assembled in code
//! - [`ManifestDiscovery`] - namespaces declared in TOML

mod manifest;
mod registry;
mod static_registry;

use std::path::PathBuf;

use thiserror::Error;

use crate::chain::Descriptor;
use crate::config::ValidationError;

pub use manifest::{Manifest, ManifestDiscovery, NamespaceManifest};
pub use registry::RegistryDiscovery;
pub use static_registry::{ElementDecl, ElementRegistration, NamespaceRegistration, StaticDiscovery};

#[doc(hidden)]
pub use inventory;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("namespace not found: {0}")]
    NamespaceNotFound(String),

    #[error("namespace '{0}' is declared more than once")]
    DuplicateNamespace(String),

    #[error("failed to read manifest {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid manifest: {0}")]
    Invalid(#[from] ValidationError),
}

/// Source of handler descriptors, keyed by namespace
pub trait Discovery {
    /// Descriptors registered under `namespace`, in discovery order
    fn discover(&self, namespace: &str) -> Result<Vec<Descriptor>, DiscoveryError>;

    /// Namespaces this source knows about
    fn namespaces(&self) -> Vec<String>;
}

impl<D: Discovery + ?Sized> Discovery for Box<D> {
    fn discover(&self, namespace: &str) -> Result<Vec<Descriptor>, DiscoveryError> {
        (**self).discover(namespace)
    }

    fn namespaces(&self) -> Vec<String> {
        (**self).namespaces()
    }
}
