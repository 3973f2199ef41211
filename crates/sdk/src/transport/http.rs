//! HTTP transport layer for the Pixabay SDK.

use crate::config::ClientConfig;
use crate::error::{PixabayError, PixabayResult};
use bytes::Bytes;
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// HTTP transport for making API requests.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> PixabayResult<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Build a URL for the given path, relative to the configured base.
    fn build_url(&self, path: &str) -> PixabayResult<Url> {
        self.config
            .base_url
            .join(path)
            .map_err(PixabayError::InvalidUrl)
    }

    /// Send a single request and turn non-success statuses into errors.
    async fn execute(&self, request_builder: RequestBuilder) -> PixabayResult<Response> {
        let response = request_builder.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "Upstream returned an error status");
        Err(PixabayError::from_response(status.as_u16(), &body))
    }

    /// Execute an authenticated GET against the API with query parameters.
    ///
    /// The API key is appended as the `key` query parameter.
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> PixabayResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request with query");

        let request = self
            .client
            .get(url)
            .query(&[("key", self.config.api_key.as_str())])
            .query(query);

        let response = self.execute(request).await?;
        let body = response.json().await?;
        Ok(body)
    }

    /// Fetch an arbitrary absolute URL and return its raw body.
    ///
    /// No credentials are attached.
    pub async fn get_bytes(&self, url: &Url) -> PixabayResult<Bytes> {
        debug!(url = %url, "GET request (binary)");

        let response = self.execute(self.client.get(url.clone())).await?;
        let body = response.bytes().await?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, PartialEq)]
    struct TestResponse {
        total: u64,
    }

    fn create_config(base_url: &str) -> Arc<ClientConfig> {
        Arc::new(ClientConfig::new(Url::parse(base_url).unwrap(), "test-key"))
    }

    #[tokio::test]
    async fn test_get_with_query_sends_key() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/"))
            .and(query_param("key", "test-key"))
            .and(query_param("q", "flower"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"total": 7})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&format!("{}/api/", server.uri()))).unwrap();

        let result: TestResponse = transport
            .get_with_query("", &[("q", "flower")])
            .await
            .unwrap();
        assert_eq!(result, TestResponse { total: 7 });
    }

    #[tokio::test]
    async fn test_error_on_400() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string("[ERROR 400] Invalid or missing API key"),
            )
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result: PixabayResult<TestResponse> = transport.get_with_query("", &[("q", "x")]).await;
        match result {
            Err(PixabayError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "[ERROR 400] Invalid or missing API key");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_bytes_has_no_key() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/images/cat.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8, 0xFF]))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();
        let url = Url::parse(&format!("{}/images/cat.jpg", server.uri())).unwrap();

        let body = transport.get_bytes(&url).await.unwrap();
        assert_eq!(body.as_ref(), &[0xFF, 0xD8, 0xFF]);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.query().is_none());
    }

    #[tokio::test]
    async fn test_get_bytes_error_on_404() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();
        let url = Url::parse(&format!("{}/missing.jpg", server.uri())).unwrap();

        let err = transport.get_bytes(&url).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_build_url_with_trailing_slash() {
        let transport = HttpTransport::new(create_config("http://localhost:8080/api/")).unwrap();

        assert_eq!(transport.build_url("").unwrap().as_str(), "http://localhost:8080/api/");
        assert_eq!(
            transport.build_url("videos/").unwrap().as_str(),
            "http://localhost:8080/api/videos/"
        );
    }
}
