// Image download tool: fetch a URL and persist it on disk

use crate::error::{McpError, ToolError};
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, json_schema_string, parse_arguments, Tool};
use pixabay_sdk::PixabayClient;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use url::Url;

pub const DOWNLOAD_IMAGE: &str = "download_image";

/// Tool to download an image by URL into a local file
pub struct DownloadImageTool {
    client: PixabayClient,
}

impl DownloadImageTool {
    pub fn new(client: PixabayClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct DownloadImageArgs {
    url: String,
    filepath: String,
}

impl DownloadImageArgs {
    fn validate(&self) -> Result<(), McpError> {
        let url = Url::parse(&self.url)
            .map_err(|e| McpError::invalid_params(format!("Invalid url {:?}: {}", self.url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(McpError::invalid_params(format!(
                "Only HTTP/HTTPS URLs are supported, got: {}",
                url.scheme()
            )));
        }
        if self.filepath.trim().is_empty() {
            return Err(McpError::invalid_params("filepath must not be empty"));
        }
        Ok(())
    }
}

/// Write `bytes` to `path`, creating missing parent directories.
///
/// Data goes to a uniquely named sibling first and is renamed into place, so
/// `path` either holds the complete body or is left untouched.
async fn save_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    tokio::fs::create_dir_all(&parent).await?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "download".to_string());
    let tmp = parent.join(format!(".{}.{}.part", file_name, uuid::Uuid::new_v4().simple()));

    if let Err(e) = tokio::fs::write(&tmp, bytes).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e);
    }
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e);
    }
    Ok(())
}

#[async_trait::async_trait]
impl Tool for DownloadImageTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: DOWNLOAD_IMAGE.to_string(),
            description: "Download an image from Pixabay by URL".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "url": json_schema_string("Image URL to download"),
                    "filepath": json_schema_string("Path where to save the image")
                }),
                vec!["url", "filepath"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult, ToolError> {
        let args: DownloadImageArgs = parse_arguments(DOWNLOAD_IMAGE, arguments)?;
        args.validate()?;

        let failed = |cause: String| {
            warn!(url = %args.url, filepath = %args.filepath, "Image download failed: {}", cause);
            McpError::internal(format!(
                "Failed to download image: {}, url: {}, filepath: {}",
                cause, args.url, args.filepath
            ))
        };

        let bytes = self
            .client
            .images()
            .download(&args.url)
            .await
            .map_err(|e| failed(e.to_string()))?;

        let path = PathBuf::from(&args.filepath);
        save_file(&path, &bytes)
            .await
            .map_err(|e| failed(e.to_string()))?;

        let resolved = std::path::absolute(&path).unwrap_or(path);
        info!(path = %resolved.display(), bytes = bytes.len(), "Image saved");

        Ok(CallToolResult::text(format!(
            "Successfully downloaded image to {}",
            resolved.display()
        )))
    }
}
