// Image search tool backed by the Pixabay search endpoint

use crate::error::{McpError, ToolError};
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    json_schema_boolean, json_schema_enum, json_schema_integer, json_schema_object,
    json_schema_string, parse_arguments, Tool,
};
use pixabay_sdk::api::{MAX_PER_PAGE, MIN_PER_PAGE};
use pixabay_sdk::{
    Category, Color, ImageType, Language, Order, Orientation, PixabayClient, SearchParams,
};
use tracing::info;

pub const SEARCH_IMAGES: &str = "search_images";

/// Tool to search Pixabay images
pub struct SearchImagesTool {
    client: PixabayClient,
}

impl SearchImagesTool {
    pub fn new(client: PixabayClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for SearchImagesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: SEARCH_IMAGES.to_string(),
            description: "Search for images on Pixabay".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "query": json_schema_string("Search query (URL encoded, max 100 chars)"),
                    "lang": json_schema_enum("Language code for search", Language::VALUES, Some("en")),
                    "id": json_schema_string("Retrieve individual images by ID"),
                    "image_type": json_schema_enum("Filter results by image type", ImageType::VALUES, Some("all")),
                    "orientation": json_schema_enum("Filter by image orientation", Orientation::VALUES, Some("all")),
                    "category": json_schema_enum("Filter results by category", Category::VALUES, None),
                    "min_width": json_schema_integer("Minimum image width", 0, None, 0),
                    "min_height": json_schema_integer("Minimum image height", 0, None, 0),
                    "colors": json_schema_enum("Filter images by color (comma separated)", Color::VALUES, None),
                    "editors_choice": json_schema_boolean("Select images with Editor's Choice award", false),
                    "safesearch": json_schema_boolean("Enable safe search", false),
                    "order": json_schema_enum("How to order the results", Order::VALUES, Some("popular")),
                    "page": json_schema_integer("Page number", 1, None, 1),
                    "per_page": json_schema_integer("Results per page (3-200)", MIN_PER_PAGE, Some(MAX_PER_PAGE), 20)
                }),
                vec!["query"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult, ToolError> {
        let params: SearchParams = parse_arguments(SEARCH_IMAGES, arguments)?;
        params
            .validate()
            .map_err(|e| McpError::invalid_params(e.to_string()))?;

        let body = self.client.images().search_raw(&params).await?;
        info!(query = %params.query, page = params.page, "Image search completed");

        let text = serde_json::to_string_pretty(&body).map_err(anyhow::Error::from)?;
        Ok(CallToolResult::text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tool_for(server: &MockServer) -> SearchImagesTool {
        let client = PixabayClient::builder()
            .base_url(format!("{}/api/", server.uri()))
            .api_key("test-key")
            .build()
            .unwrap();
        SearchImagesTool::new(client)
    }

    fn upstream_body() -> serde_json::Value {
        json!({
            "total": 2,
            "totalHits": 2,
            "hits": [
                {"id": 1, "largeImageURL": "https://cdn.example/1.jpg", "tags": "flower"},
                {"id": 2, "largeImageURL": "https://cdn.example/2.jpg", "tags": "rose"}
            ]
        })
    }

    fn invalid_params_message(err: ToolError) -> String {
        match err {
            ToolError::Mcp(e) => {
                assert_eq!(e.code, ErrorCode::InvalidParams);
                e.message
            }
            other => panic!("Expected InvalidParams, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_returns_upstream_body_verbatim() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/"))
            .and(query_param("key", "test-key"))
            .and(query_param("q", "flower"))
            .respond_with(ResponseTemplate::new(200).set_body_json(upstream_body()))
            .expect(1)
            .mount(&server)
            .await;

        let tool = tool_for(&server);
        let result = tool.execute(json!({"query": "flower"})).await.unwrap();

        assert_eq!(result.content.len(), 1);
        let parsed: serde_json::Value = serde_json::from_str(result.content[0].as_text()).unwrap();
        assert_eq!(parsed, upstream_body());
    }

    #[tokio::test]
    async fn test_search_forwards_all_parameters() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("q", "sunset"))
            .and(query_param("lang", "de"))
            .and(query_param("id", "195893"))
            .and(query_param("image_type", "illustration"))
            .and(query_param("orientation", "horizontal"))
            .and(query_param("category", "nature"))
            .and(query_param("min_width", "640"))
            .and(query_param("min_height", "480"))
            .and(query_param("colors", "orange,red"))
            .and(query_param("editors_choice", "true"))
            .and(query_param("safesearch", "true"))
            .and(query_param("order", "latest"))
            .and(query_param("page", "2"))
            .and(query_param("per_page", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(upstream_body()))
            .expect(1)
            .mount(&server)
            .await;

        let tool = tool_for(&server);
        tool.execute(json!({
            "query": "sunset",
            "lang": "de",
            "id": "195893",
            "image_type": "illustration",
            "orientation": "horizontal",
            "category": "nature",
            "min_width": 640,
            "min_height": 480,
            "colors": "orange,red",
            "editors_choice": true,
            "safesearch": true,
            "order": "latest",
            "page": 2,
            "per_page": 50
        }))
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_missing_query_rejected_before_upstream() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(upstream_body()))
            .expect(0)
            .mount(&server)
            .await;

        let tool = tool_for(&server);
        let err = tool.execute(json!({})).await.unwrap_err();

        assert!(invalid_params_message(err).contains("query"));
    }

    #[tokio::test]
    async fn test_out_of_range_per_page_rejected_before_upstream() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(upstream_body()))
            .expect(0)
            .mount(&server)
            .await;

        let tool = tool_for(&server);
        for args in [
            json!({"query": "cat", "per_page": 2}),
            json!({"query": "cat", "per_page": 201}),
            json!({"query": "cat", "page": 0}),
            json!({"query": "cat", "order": "random"}),
        ] {
            let err = tool.execute(args).await.unwrap_err();
            invalid_params_message(err);
        }
    }

    #[tokio::test]
    async fn test_upstream_error_is_reported_as_upstream() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string("[ERROR 400] Invalid or missing API key"),
            )
            .mount(&server)
            .await;

        let tool = tool_for(&server);
        let err = tool.execute(json!({"query": "flower"})).await.unwrap_err();

        assert!(matches!(err, ToolError::Upstream(_)));
    }

    #[test]
    fn test_schema_declares_query_as_only_required_field() {
        let client = PixabayClient::builder().api_key("k").build().unwrap();
        let schema = SearchImagesTool::new(client).schema();

        assert_eq!(schema.name, "search_images");
        assert_eq!(schema.required_fields(), vec!["query"]);

        let props = &schema.input_schema["properties"];
        assert_eq!(props["per_page"]["minimum"], 3);
        assert_eq!(props["per_page"]["maximum"], 200);
        assert_eq!(props["per_page"]["default"], 20);
        assert_eq!(props["lang"]["default"], "en");
        assert_eq!(props["order"]["enum"], json!(["popular", "latest"]));
        assert!(props["category"].get("default").is_none());
    }
}
