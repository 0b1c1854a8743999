//! Cascade core library
//!
//! Ordered-fallback execution across hosted and local chat model providers:
//! a [`ProviderCatalog`] holds the tiered attempt order, and a
//! [`FallbackExecutor`] walks it sequentially until the first usable
//! response, returning a [`FallbackRun`] that documents every attempt.

pub mod catalog;
pub mod config;
pub mod error;
pub mod executor;
pub mod messages;
pub mod outcome;
pub mod registry;
pub mod transport;
pub mod transports;


// Re-export commonly used types
pub use catalog::{AttemptDescriptor, ProviderCatalog};
pub use config::{CatalogConfig, CatalogEntryConfig};
pub use error::{CascadeError, CascadeResult};
pub use executor::{FallbackExecutor, RunOptions};
pub use messages::{ChatMessage, ChatRequest, GenerationParams, MessageRole};
pub use outcome::{AttemptOutcome, AttemptStatus, FailureReason, FallbackRun, RunResult};
pub use registry::TransportRegistry;
pub use transport::{RawResponse, Transport};
pub use transports::HttpChatTransport;
