//! Main client for the Pixabay SDK.

use crate::api::ImagesApi;
use crate::config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use crate::error::{PixabayError, PixabayResult};
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Main client for interacting with the Pixabay API.
#[derive(Debug, Clone)]
pub struct PixabayClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl PixabayClient {
    /// Create a new client builder.
    pub fn builder() -> PixabayClientBuilder {
        PixabayClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> PixabayResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    /// Get the images API.
    pub fn images(&self) -> ImagesApi<'_> {
        ImagesApi::new(self)
    }

    /// The configured search endpoint.
    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }
}

/// Builder for creating a PixabayClient.
pub struct PixabayClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl PixabayClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the search endpoint (defaults to the public Pixabay API).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> PixabayResult<PixabayClient> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| PixabayError::Config("api_key is required".to_string()))?;

        let base_url_str = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&base_url_str)?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(PixabayError::Config(format!(
                "base_url must use http or https, got {}",
                base_url.scheme()
            )));
        }

        let config = ClientConfig {
            base_url,
            api_key,
            timeout: self.timeout,
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        };

        PixabayClient::from_config(config)
    }
}

impl Default for PixabayClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_api_key() {
        let err = PixabayClient::builder().build().unwrap_err();
        assert!(matches!(err, PixabayError::Config(_)));

        let err = PixabayClient::builder().api_key("   ").build().unwrap_err();
        assert!(matches!(err, PixabayError::Config(_)));
    }

    #[test]
    fn test_builder_defaults_to_public_endpoint() {
        let client = PixabayClient::builder().api_key("k").build().unwrap();
        assert_eq!(client.base_url().as_str(), "https://pixabay.com/api/");
    }

    #[test]
    fn test_builder_rejects_bad_base_url() {
        let err = PixabayClient::builder()
            .api_key("k")
            .base_url("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(err, PixabayError::InvalidUrl(_)));

        let err = PixabayClient::builder()
            .api_key("k")
            .base_url("ftp://pixabay.com/api/")
            .build()
            .unwrap_err();
        assert!(matches!(err, PixabayError::Config(_)));
    }
}
