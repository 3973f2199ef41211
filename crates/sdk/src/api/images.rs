//! Image search and download endpoints.

use crate::api::search::SearchParams;
use crate::client::PixabayClient;
use crate::error::PixabayResult;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

/// Images API for searching and downloading Pixabay images.
pub struct ImagesApi<'a> {
    client: &'a PixabayClient,
}

impl<'a> ImagesApi<'a> {
    pub(crate) fn new(client: &'a PixabayClient) -> Self {
        Self { client }
    }

    /// Search images and return the upstream body untouched.
    pub async fn search_raw(&self, params: &SearchParams) -> PixabayResult<serde_json::Value> {
        params.validate()?;
        debug!(query = %params.query, page = params.page, per_page = params.per_page, "Searching images");

        self.client.http.get_with_query("", params).await
    }

    /// Search images and decode the response.
    pub async fn search(&self, params: &SearchParams) -> PixabayResult<SearchResponse> {
        params.validate()?;
        debug!(query = %params.query, page = params.page, per_page = params.per_page, "Searching images");

        let response: SearchResponse = self.client.http.get_with_query("", params).await?;
        info!(total_hits = response.total_hits, returned = response.hits.len(), "Search completed");
        Ok(response)
    }

    /// Download the image behind `url`.
    pub async fn download(&self, url: &str) -> PixabayResult<Bytes> {
        let url = Url::parse(url)?;
        let body = self.client.http.get_bytes(&url).await?;
        debug!(url = %url, bytes = body.len(), "Image downloaded");
        Ok(body)
    }
}

/// Decoded image search response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub total: u64,
    #[serde(rename = "totalHits")]
    pub total_hits: u64,
    pub hits: Vec<Hit>,
}

/// One image in a search response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hit {
    pub id: u64,
    #[serde(rename = "pageURL")]
    pub page_url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub tags: String,
    #[serde(rename = "previewURL")]
    pub preview_url: String,
    #[serde(rename = "webformatURL")]
    pub webformat_url: String,
    #[serde(rename = "largeImageURL")]
    pub large_image_url: String,
    #[serde(default)]
    pub image_width: u32,
    #[serde(default)]
    pub image_height: u32,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(rename = "user_id", default)]
    pub user_id: u64,
    #[serde(default)]
    pub user: String,
}
