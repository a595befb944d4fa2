// Process-wide configuration, built once at startup and injected into the
// forwarder and front-ends.

use crate::error::{ForwardError, ForwardResult};
use url::Url;

/// Environment variable naming the Crawl4AI API endpoint.
pub const ENDPOINT_ENV: &str = "CRAWL4AI_ENDPOINT";

/// Environment variable holding the optional bearer token.
pub const BEARER_TOKEN_ENV: &str = "CRAWL4AI_BEARER_TOKEN";

/// Configuration for the shim: where the remote Crawl4AI API lives and how
/// to authenticate against it. Read-only after startup.
///
/// The endpoint is kept as a string because outbound URLs are built by plain
/// concatenation of endpoint and tool path; `Url::join` would rewrite a base
/// URL that carries its own path segment.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    pub endpoint: Option<String>,
    pub bearer_token: Option<String>,
}

impl ServerConfig {
    pub fn new(endpoint: Option<String>, bearer_token: Option<String>) -> Self {
        Self {
            endpoint,
            bearer_token,
        }
    }

    /// Build a configuration from the environment alone.
    pub fn from_env() -> Self {
        Self {
            endpoint: std::env::var(ENDPOINT_ENV).ok(),
            bearer_token: std::env::var(BEARER_TOKEN_ENV).ok(),
        }
    }

    /// Check that the endpoint is present and parses as an HTTP(S) URL.
    /// Called at startup so a bad endpoint fails fast instead of on the
    /// first tool call.
    pub fn validate(&self) -> ForwardResult<()> {
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or(ForwardError::MissingEndpoint)?;
        let url = Url::parse(endpoint)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ForwardError::Config(format!(
                "endpoint must be an http(s) URL, got scheme '{}'",
                url.scheme()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_http_and_https() {
        let config = ServerConfig::new(Some("https://api.example.com".into()), None);
        assert!(config.validate().is_ok());

        let config = ServerConfig::new(Some("http://localhost:11235".into()), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_endpoint() {
        let config = ServerConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ForwardError::MissingEndpoint)
        ));
    }

    #[test]
    fn validate_rejects_non_http_schemes() {
        let config = ServerConfig::new(Some("ftp://example.com".into()), None);
        assert!(matches!(config.validate(), Err(ForwardError::Config(_))));
    }

    #[test]
    fn validate_rejects_unparseable_urls() {
        let config = ServerConfig::new(Some("not a url".into()), None);
        assert!(matches!(
            config.validate(),
            Err(ForwardError::InvalidEndpoint(_))
        ));
    }
}
