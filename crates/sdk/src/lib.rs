//! # Pixabay SDK
//!
//! Thin async client for the Pixabay image search API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pixabay_sdk::{ImageType, PixabayClient, PixabayResult, SearchParams};
//!
//! #[tokio::main]
//! async fn main() -> PixabayResult<()> {
//!     let client = PixabayClient::builder()
//!         .api_key(std::env::var("PIXABAY_API_KEY").unwrap_or_default())
//!         .build()?;
//!
//!     let params = SearchParams::new("flower")
//!         .image_type(ImageType::Photo)
//!         .per_page(3);
//!     let response = client.images().search(&params).await?;
//!     println!("Found {} images", response.total_hits);
//!
//!     if let Some(hit) = response.hits.first() {
//!         let bytes = client.images().download(&hit.large_image_url).await?;
//!         println!("Downloaded {} bytes", bytes.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use api::{
    Category, Color, Hit, ImageType, Language, Order, Orientation, SearchParams, SearchResponse,
};
pub use client::{PixabayClient, PixabayClientBuilder};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{PixabayError, PixabayResult};
