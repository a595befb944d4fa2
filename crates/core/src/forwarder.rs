//! Forwards tool calls to the remote Crawl4AI API.
//!
//! One POST per call, the raw tool arguments as the JSON body. A single
//! attempt: no retries, no timeout, no circuit breaking. Network failures
//! propagate unchanged.

use crate::catalog;
use crate::config::ServerConfig;
use crate::error::{ForwardError, ForwardResult};
use serde_json::Value;
use tracing::debug;

/// What the remote API answered with: a parsed JSON document, or the raw
/// body text when it is not valid JSON (graceful degradation, not an error).
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteResponse {
    Json(Value),
    Text(String),
}

impl RemoteResponse {
    /// Render for embedding in an MCP text content block. JSON documents
    /// are pretty-printed, plain text passes through verbatim.
    pub fn render(&self) -> String {
        match self {
            Self::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Self::Text(text) => text.clone(),
        }
    }
}

/// Translates a tool call into an outbound HTTP request and its response
/// back into a tool-call result.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    config: ServerConfig,
}

impl Forwarder {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            // Default client: no timeout, so a slow remote call runs to
            // completion rather than being cut off mid-crawl.
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Forward a tool call to the remote API.
    pub async fn forward(&self, name: &str, args: Value) -> ForwardResult<RemoteResponse> {
        let endpoint = self
            .config
            .endpoint
            .as_deref()
            .ok_or(ForwardError::MissingEndpoint)?;
        let path = catalog::endpoint_path(name)
            .ok_or_else(|| ForwardError::UnknownTool(name.to_string()))?;

        // Plain concatenation, matching the remote API contract. The
        // endpoint may carry its own path prefix.
        let url = format!("{endpoint}{path}");
        debug!(tool = name, url = %url, "forwarding tool call");

        let mut request = self.client.post(&url).json(&args);
        if let Some(token) = &self.config.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        if status >= 400 {
            return Err(ForwardError::Remote { status, body });
        }

        Ok(match serde_json::from_str::<Value>(&body) {
            Ok(value) => RemoteResponse::Json(value),
            Err(_) => RemoteResponse::Text(body),
        })
    }
}
