//! Configuration types for the Pixabay SDK.

use std::time::Duration;
use url::Url;

/// Default Pixabay image search endpoint.
pub const DEFAULT_BASE_URL: &str = "https://pixabay.com/api/";

/// Default user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("pixabay-sdk/", env!("CARGO_PKG_VERSION"));

/// Configuration for the Pixabay client.
#[derive(Clone)]
pub struct ClientConfig {
    /// Search endpoint. The API key is only ever attached to requests against it.
    pub base_url: Url,
    /// Pixabay API key.
    pub api_key: String,
    /// Request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// User agent header value.
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a new configuration with the given base URL and key.
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url,
            api_key: api_key.into(),
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

// The key is a secret; keep it out of logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
