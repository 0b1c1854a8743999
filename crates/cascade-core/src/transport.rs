//! Transport seam between the executor and provider clients
//!
//! A transport is the capability object that actually performs the call
//! against one target (a hosted endpoint, a local runtime). The core only
//! holds `Arc<dyn Transport>` handles; everything behind them is owned by
//! the collaborator layer.

use crate::error::CascadeResult;
use crate::messages::ChatRequest;
use async_trait::async_trait;

/// Opaque response returned by a transport
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    /// Generated text content
    pub content: String,
    /// Model that produced the response, when the provider reports it
    pub model: Option<String>,
    /// Full provider response body, for callers that need more than text
    pub raw: Option<serde_json::Value>,
}

impl RawResponse {
    /// Create a text-only response
    pub fn text<S: Into<String>>(content: S) -> Self {
        Self {
            content: content.into(),
            model: None,
            raw: None,
        }
    }
}

/// Capability interface for one callable provider target.
///
/// Implementations must return `Err` on any non-success condition (network
/// failure, non-2xx status, unparseable body) rather than a sentinel value,
/// so the executor can classify on Err-vs-Ok. Timeouts are enforced by the
/// executor wrapping `invoke`; a transport does not need its own timer.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the call against this target
    async fn invoke(&self, request: &ChatRequest) -> CascadeResult<RawResponse>;

    /// Success predicate: is this structurally-successful response actually
    /// usable? Providers override this when "usable" means more than
    /// non-empty text.
    fn is_usable(&self, response: &RawResponse) -> bool {
        !response.content.trim().is_empty()
    }
}
