//! Tracing setup and chain counters

use std::sync::atomic::{AtomicU64, Ordering};

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber
///
/// `RUST_LOG` wins over `default_filter`. Calling this more than once is a
/// no-op.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Counters for chain builds and traversals
#[derive(Debug, Default)]
pub struct ChainMetrics {
    chains_built: AtomicU64,
    builds_failed: AtomicU64,
    inputs_handled: AtomicU64,
    inputs_unhandled: AtomicU64,
}

impl ChainMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chain_built(&self) {
        self.chains_built.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "chains_built", "Metric incremented");
    }

    pub fn build_failed(&self) {
        self.builds_failed.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "builds_failed", "Metric incremented");
    }

    /// Count one traversal outcome
    pub fn input_processed(&self, handled: bool) {
        let counter = if handled {
            &self.inputs_handled
        } else {
            &self.inputs_unhandled
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            chains_built: self.chains_built.load(Ordering::Relaxed),
            builds_failed: self.builds_failed.load(Ordering::Relaxed),
            inputs_handled: self.inputs_handled.load(Ordering::Relaxed),
            inputs_unhandled: self.inputs_unhandled.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub chains_built: u64,
    pub builds_failed: u64,
    pub inputs_handled: u64,
    pub inputs_unhandled: u64,
}
