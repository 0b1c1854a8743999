//! OpenAI-compatible HTTP chat transport
//!
//! Covers hosted endpoints and local Ollama, which expose the same
//! `/v1/chat/completions` wire shape.

use crate::error::{CascadeError, CascadeResult};
use crate::messages::ChatRequest;
use crate::transport::{RawResponse, Transport};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;

/// Transport for any OpenAI-compatible chat completion endpoint
pub struct HttpChatTransport {
    base_url: String,
    api_key: Option<String>,
    model: String,
    http_client: Client,
}

impl HttpChatTransport {
    /// Create a transport for an OpenAI-compatible endpoint.
    ///
    /// `base_url` is the API root, e.g. `https://api.openai.com` or
    /// `http://localhost:11434`.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> CascadeResult<Self> {
        let base_url = base_url.into();
        let model = model.into();

        // Per-attempt timeouts are enforced by the executor; the connect
        // timeout only guards against unreachable hosts hanging the socket.
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                CascadeError::transport_with_provider(
                    format!("failed to create HTTP client: {e}"),
                    &model,
                )
            })?;

        Ok(Self {
            base_url,
            api_key: None,
            model,
            http_client,
        })
    }

    /// Create a transport for a local Ollama runtime.
    ///
    /// Ollama ignores the bearer token but its OpenAI-compatible endpoint
    /// expects one to be present.
    pub fn ollama(model: impl Into<String>) -> CascadeResult<Self> {
        Ok(Self::new("http://localhost:11434", model)?.with_api_key("ollama"))
    }

    /// Set the bearer token
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.base_url.trim_end_matches('/')
        )
    }

    fn request_body(&self, request: &ChatRequest) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": request.messages,
        });

        if let Some(temperature) = request.params.temperature {
            body["temperature"] = json!(temperature);
        }
        if let Some(max_tokens) = request.params.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        if let Some(top_p) = request.params.top_p {
            body["top_p"] = json!(top_p);
        }
        if let Some(stop) = &request.params.stop {
            body["stop"] = json!(stop);
        }

        body
    }

    fn extract_content(body: &Value) -> Option<String> {
        body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
    }
}

#[async_trait]
impl Transport for HttpChatTransport {
    async fn invoke(&self, request: &ChatRequest) -> CascadeResult<RawResponse> {
        let mut http_request = self
            .http_client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .json(&self.request_body(request));

        if let Some(api_key) = &self.api_key {
            http_request = http_request.bearer_auth(api_key);
        }

        let response = http_request.send().await.map_err(|e| {
            CascadeError::transport_with_provider(format!("request failed: {e}"), &self.model)
        })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(CascadeError::transport_with_status(
                format!("API returned {status}: {detail}"),
                &self.model,
                status.as_u16(),
            ));
        }

        let body: Value = response.json().await.map_err(|e| {
            CascadeError::transport_with_provider(format!("invalid response body: {e}"), &self.model)
        })?;

        let content = Self::extract_content(&body).unwrap_or_default();
        let model = body["model"].as_str().map(str::to_string);

        Ok(RawResponse {
            content,
            model,
            raw: Some(body),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::GenerationParams;

    #[test]
    fn test_request_body_includes_only_set_params() {
        let transport = HttpChatTransport::new("http://localhost:11434", "llama3.2").unwrap();
        let request = ChatRequest::user("hello")
            .with_params(GenerationParams::new().with_temperature(0.5));

        let body = transport.request_body(&request);
        assert_eq!(body["model"], "llama3.2");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "hello");
        assert_eq!(body["temperature"], 0.5);
        assert!(body.get("max_tokens").is_none());
        assert!(body.get("stop").is_none());
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let transport = HttpChatTransport::new("https://api.example.com/", "m").unwrap();
        assert_eq!(
            transport.endpoint(),
            "https://api.example.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_extract_content() {
        let body = json!({
            "model": "llama3.2",
            "choices": [{ "message": { "role": "assistant", "content": "OK" } }]
        });
        assert_eq!(
            HttpChatTransport::extract_content(&body),
            Some("OK".to_string())
        );

        let empty = json!({ "choices": [] });
        assert_eq!(HttpChatTransport::extract_content(&empty), None);
    }
}
