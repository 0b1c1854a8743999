//! Provider catalog
//!
//! An ordered, tiered set of attempt targets. The catalog holds no behavior
//! beyond ordering, grouping, and enable/disable toggling; the executor
//! consumes snapshots of it via [`ProviderCatalog::ordered_attempts`].

use crate::error::{CascadeError, CascadeResult};
use crate::transport::Transport;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// One callable target in the cascade
#[derive(Clone)]
pub struct AttemptDescriptor {
    /// Stable identifier, unique within a catalog
    pub id: String,
    /// Coarse priority group; lower tiers are exhausted first
    pub tier: u32,
    /// Capability handle that performs the actual call
    pub transport: Arc<dyn Transport>,
    /// Per-attempt timeout; the executor's default applies when unset
    pub timeout: Option<Duration>,
    /// Disabled entries are skipped without counting as failed attempts
    pub enabled: bool,
}

impl AttemptDescriptor {
    /// Create a descriptor with default tier (0), no timeout override,
    /// and enabled
    pub fn new(id: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            id: id.into(),
            tier: 0,
            transport,
            timeout: None,
            enabled: true,
        }
    }

    /// Set the tier
    pub fn with_tier(mut self, tier: u32) -> Self {
        self.tier = tier;
        self
    }

    /// Set the per-attempt timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Mark the entry disabled at build time
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

impl std::fmt::Debug for AttemptDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttemptDescriptor")
            .field("id", &self.id)
            .field("tier", &self.tier)
            .field("timeout", &self.timeout)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// Catalog entry plus its original insertion index.
///
/// The index is the tie-break key within a tier and must survive arbitrary
/// enable/disable toggling, so it is stored alongside the descriptor rather
/// than derived from list position.
struct EntryState {
    descriptor: AttemptDescriptor,
    index: usize,
}

/// Ordered, tiered set of attempt targets.
///
/// Safe for concurrent use: readers take snapshots, and the single mutation
/// ([`set_enabled`](Self::set_enabled)) only affects runs that snapshot
/// afterwards.
pub struct ProviderCatalog {
    entries: RwLock<Vec<EntryState>>,
}

impl ProviderCatalog {
    /// Build a catalog from descriptors, validating id uniqueness.
    ///
    /// Fails fast with a `Config` error on duplicates; a partially-valid
    /// catalog is never constructed. An empty list is a valid catalog.
    pub fn build(descriptors: Vec<AttemptDescriptor>) -> CascadeResult<Self> {
        let mut seen = HashSet::new();
        for descriptor in &descriptors {
            if !seen.insert(descriptor.id.clone()) {
                return Err(CascadeError::config_with_context(
                    format!("duplicate attempt id '{}'", descriptor.id),
                    "building provider catalog",
                ));
            }
        }

        let entries = descriptors
            .into_iter()
            .enumerate()
            .map(|(index, descriptor)| EntryState { descriptor, index })
            .collect();

        Ok(Self {
            entries: RwLock::new(entries),
        })
    }

    /// Produce the attempt order for one run: the override first (when it
    /// names an existing, enabled entry), then all enabled entries by
    /// `(tier, insertion index)`, without repeating the override.
    ///
    /// The returned snapshot is a pure function of catalog state, so calling
    /// this twice without an intervening mutation yields identical orders.
    pub fn ordered_attempts(&self, override_id: Option<&str>) -> Vec<AttemptDescriptor> {
        let entries = self.entries.read();

        let mut enabled: Vec<&EntryState> = entries
            .iter()
            .filter(|entry| entry.descriptor.enabled)
            .collect();
        enabled.sort_by_key(|entry| (entry.descriptor.tier, entry.index));

        let mut ordered = Vec::with_capacity(enabled.len());
        if let Some(id) = override_id {
            // An unknown or disabled override is ignored rather than fatal:
            // a stale admin preference must not take the cascade down.
            if let Some(entry) = enabled.iter().find(|entry| entry.descriptor.id == id) {
                ordered.push(entry.descriptor.clone());
            }
        }

        for entry in enabled {
            if ordered.first().is_some_and(|d| d.id == entry.descriptor.id) {
                continue;
            }
            ordered.push(entry.descriptor.clone());
        }

        ordered
    }

    /// Enable or disable a single entry.
    ///
    /// Runs already in flight are unaffected; they captured their own
    /// snapshot. Fails with `NotFound` for an unknown id.
    pub fn set_enabled(&self, id: &str, enabled: bool) -> CascadeResult<()> {
        let mut entries = self.entries.write();
        let entry = entries
            .iter_mut()
            .find(|entry| entry.descriptor.id == id)
            .ok_or_else(|| CascadeError::not_found(format!("catalog entry '{id}'")))?;

        entry.descriptor.enabled = enabled;
        Ok(())
    }

    /// All entry ids in declaration order, including disabled entries
    pub fn ids(&self) -> Vec<String> {
        self.entries
            .read()
            .iter()
            .map(|entry| entry.descriptor.id.clone())
            .collect()
    }

    /// Total number of entries, including disabled ones
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check whether the catalog has no entries at all
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
