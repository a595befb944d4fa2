//! Error types for forwarding tool calls to the Crawl4AI API.

/// Result type for forwarder operations.
pub type ForwardResult<T> = Result<T, ForwardError>;

/// Errors that can occur when forwarding a tool call.
#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    /// No endpoint is configured.
    #[error("no Crawl4AI endpoint configured; use --endpoint or set CRAWL4AI_ENDPOINT")]
    MissingEndpoint,

    /// The tool name has no corresponding remote API path.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// The remote API answered with an error status.
    #[error("remote API error (status {status}): {body}")]
    Remote { status: u16, body: String },

    /// The outbound HTTP request itself failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured endpoint is not a valid URL.
    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// Other configuration problems.
    #[error("configuration error: {0}")]
    Config(String),
}
