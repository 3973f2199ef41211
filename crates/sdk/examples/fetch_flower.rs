//! Search for one flower photo and save it locally.
//!
//! Saves the first hit's large image to `../images/flower.jpg`, relative to
//! the working directory.
//!
//! Run with: PIXABAY_API_KEY=... cargo run --example fetch_flower

use anyhow::{Context, Result};
use pixabay_sdk::{ImageType, PixabayClient, PixabayError, SearchParams};
use std::path::PathBuf;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .init();

    if let Err(e) = search_and_download().await {
        match e.downcast_ref::<PixabayError>() {
            Some(api_error) => tracing::error!(
                status = ?api_error.status(),
                message = %api_error.upstream_message(),
                "Pixabay request failed"
            ),
            None => tracing::error!("{:#}", e),
        }
    }
}

async fn search_and_download() -> Result<()> {
    let api_key = std::env::var("PIXABAY_API_KEY")
        .context("PIXABAY_API_KEY environment variable is required")?;
    let client = PixabayClient::builder().api_key(api_key).build()?;

    tracing::info!("Searching for flower images...");
    let params = SearchParams::new("flower")
        .per_page(3)
        .image_type(ImageType::Photo);
    let response = client.images().search(&params).await?;
    tracing::info!("Search response:\n{}", serde_json::to_string_pretty(&response)?);

    let Some(first) = response.hits.first() else {
        tracing::error!("No images found");
        return Ok(());
    };

    tracing::info!("Downloading image from: {}", first.large_image_url);
    let bytes = client.images().download(&first.large_image_url).await?;

    let images_dir = std::env::current_dir()?.join("..").join("images");
    tokio::fs::create_dir_all(&images_dir)
        .await
        .with_context(|| format!("Failed to create {}", images_dir.display()))?;

    let image_path: PathBuf = images_dir.join("flower.jpg");
    tokio::fs::write(&image_path, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", image_path.display()))?;

    tracing::info!("Image successfully downloaded to: {}", image_path.display());
    Ok(())
}
