//! Concrete transport implementations

pub mod http;

pub use http::HttpChatTransport;
