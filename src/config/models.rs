use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::chain::{BuildOptions, EmptyChainPolicy, TieBreak};
use crate::discovery::NamespaceManifest;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub chain: ChainSettings,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    /// Namespaces declared in configuration; these shadow static ones
    #[serde(default)]
    pub namespaces: BTreeMap<String, NamespaceManifest>,
}

/// Chain builder behaviour
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct ChainSettings {
    #[serde(default)]
    pub tie_break: TieBreak,
    #[serde(default)]
    pub empty_chain: EmptyChainPolicy,
}

impl From<ChainSettings> for BuildOptions {
    fn from(settings: ChainSettings) -> Self {
        Self {
            tie_break: settings.tie_break,
            empty_chain: settings.empty_chain,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "warn".to_string()
}
