//! Transport registry
//!
//! Keyed map from attempt id to transport handle. Instances are owned by
//! whichever component composes the system at startup and passed in
//! explicitly; there is no ambient global registry.

use crate::transport::Transport;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry mapping attempt ids to their transports
#[derive(Default)]
pub struct TransportRegistry {
    transports: HashMap<String, Arc<dyn Transport>>,
}

impl TransportRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            transports: HashMap::new(),
        }
    }

    /// Register a transport under an id, replacing any previous entry
    pub fn register(&mut self, id: impl Into<String>, transport: Arc<dyn Transport>) {
        self.transports.insert(id.into(), transport);
    }

    /// Remove a transport, returning it if it was registered
    pub fn unregister(&mut self, id: &str) -> Option<Arc<dyn Transport>> {
        self.transports.remove(id)
    }

    /// Get a transport by id
    pub fn get(&self, id: &str) -> Option<Arc<dyn Transport>> {
        self.transports.get(id).cloned()
    }

    /// Check whether an id is registered
    pub fn contains(&self, id: &str) -> bool {
        self.transports.contains_key(id)
    }

    /// List all registered ids
    pub fn ids(&self) -> Vec<String> {
        self.transports.keys().cloned().collect()
    }

    /// Number of registered transports
    pub fn len(&self) -> usize {
        self.transports.len()
    }

    /// Check whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.transports.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CascadeResult;
    use crate::messages::ChatRequest;
    use crate::transport::RawResponse;
    use async_trait::async_trait;

    struct NullTransport;

    #[async_trait]
    impl Transport for NullTransport {
        async fn invoke(&self, _request: &ChatRequest) -> CascadeResult<RawResponse> {
            Ok(RawResponse::text("ok"))
        }
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = TransportRegistry::new();
        assert!(registry.is_empty());

        registry.register("ollama/llama3.2", Arc::new(NullTransport));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("ollama/llama3.2"));
        assert!(registry.get("ollama/llama3.2").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_unregister() {
        let mut registry = TransportRegistry::new();
        registry.register("m1", Arc::new(NullTransport));

        assert!(registry.unregister("m1").is_some());
        assert!(registry.unregister("m1").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_ids() {
        let mut registry = TransportRegistry::new();
        registry.register("m1", Arc::new(NullTransport));
        registry.register("m2", Arc::new(NullTransport));

        let mut ids = registry.ids();
        ids.sort();
        assert_eq!(ids, vec!["m1", "m2"]);
    }
}
