//! Catalog configuration
//!
//! The ordered entry list arrives as already-parsed data (the surrounding
//! application owns file loading); transports are runtime capability
//! objects looked up in a [`TransportRegistry`] side table, never
//! serialized.

use crate::catalog::{AttemptDescriptor, ProviderCatalog};
use crate::error::{CascadeError, CascadeResult};
use crate::registry::TransportRegistry;
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_enabled() -> bool {
    true
}

/// One configured catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntryConfig {
    /// Stable attempt identifier, e.g. `"ollama/llama3.2"`
    pub id: String,
    /// Priority group; lower tiers are tried first
    #[serde(default)]
    pub tier: u32,
    /// Per-attempt timeout override in milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// Whether the entry starts enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

/// Ordered catalog configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Entries in declaration order; order is the within-tier tie-break
    pub entries: Vec<CatalogEntryConfig>,
}

impl CatalogConfig {
    /// Build a [`ProviderCatalog`] by joining entries against the transport
    /// registry.
    ///
    /// Every entry must have a registered transport; a missing one is a
    /// `Config` error and nothing is built.
    pub fn into_catalog(&self, registry: &TransportRegistry) -> CascadeResult<ProviderCatalog> {
        let mut descriptors = Vec::with_capacity(self.entries.len());

        for entry in &self.entries {
            let transport = registry.get(&entry.id).ok_or_else(|| {
                CascadeError::config_with_context(
                    format!("no transport registered for catalog entry '{}'", entry.id),
                    "building provider catalog from configuration",
                )
            })?;

            let mut descriptor =
                AttemptDescriptor::new(&entry.id, transport).with_tier(entry.tier);
            if let Some(ms) = entry.timeout_ms {
                descriptor = descriptor.with_timeout(Duration::from_millis(ms));
            }
            if !entry.enabled {
                descriptor = descriptor.disabled();
            }
            descriptors.push(descriptor);
        }

        ProviderCatalog::build(descriptors)
    }
}
