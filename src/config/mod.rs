//! Configuration management for corchain
//!
//! Settings are layered from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use corchain::config::Settings;
//!
//! let settings = Settings::load().expect("Failed to load configuration");
//! println!("Tie-break policy: {:?}", settings.chain.tie_break);
//! ```
//!
//! # Environment Variables
//!
//! Scalar settings can be overridden with `CORCHAIN__<section>__<key>`:
//! - `CORCHAIN__CHAIN__TIE_BREAK=type_id`
//! - `CORCHAIN__CHAIN__EMPTY_CHAIN=reject`
//! - `CORCHAIN__TELEMETRY__LOG_FILTER=corchain=debug`
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/corchain.toml`.
//! This can be overridden using the `CORCHAIN_CONFIG` environment variable.

mod models;
mod sources;
pub(crate) mod validation;

pub use models::{ChainSettings, Settings, TelemetryConfig};
pub use validation::ValidationError;

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use crate::chain::{BuildOptions, ChainBuilder};
use crate::discovery::{Discovery, ManifestDiscovery, StaticDiscovery};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Settings {
    /// Load configuration from all sources (file + environment)
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed or a
    /// declared namespace is invalid (duplicate or empty type ids).
    pub fn load() -> Result<Self, ConfigError> {
        let settings = sources::load()?;
        validation::validate(&settings)?;
        Ok(settings)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let settings = sources::load_from_sources(path)?;
        validation::validate(&settings)?;
        Ok(settings)
    }

    pub fn build_options(&self) -> BuildOptions {
        self.chain.into()
    }

    /// Builder configured with this file's chain settings
    pub fn chain_builder(&self) -> ChainBuilder {
        ChainBuilder::with_options(self.build_options())
    }

    /// Discovery over the namespaces declared in configuration
    pub fn manifest_discovery(&self) -> ManifestDiscovery {
        ManifestDiscovery::new(self.namespaces.clone())
    }

    /// Discovery that resolves `namespace`
    ///
    /// A namespace declared in configuration shadows a static registration
    /// of the same name.
    pub fn discovery_for(&self, namespace: &str) -> Box<dyn Discovery> {
        if self.namespaces.contains_key(namespace) {
            debug!(namespace, "Resolving namespace from configuration");
            Box::new(self.manifest_discovery())
        } else {
            Box::new(StaticDiscovery::new())
        }
    }

    /// Every resolvable namespace, once each, tagged with the source
    /// [`Settings::discovery_for`] would pick
    pub fn known_namespaces(&self) -> BTreeMap<String, NamespaceSource> {
        let mut known: BTreeMap<String, NamespaceSource> = StaticDiscovery::new()
            .namespaces()
            .into_iter()
            .map(|namespace| (namespace, NamespaceSource::Static))
            .collect();
        known.extend(
            self.namespaces
                .keys()
                .map(|namespace| (namespace.clone(), NamespaceSource::Config)),
        );
        known
    }
}

/// Where a namespace is resolved from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceSource {
    Config,
    Static,
}
