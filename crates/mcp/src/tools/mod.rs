pub mod download;
pub mod search;
mod registry;

pub use download::DownloadImageTool;
pub use registry::{
    json_schema_boolean, json_schema_enum, json_schema_integer, json_schema_object,
    json_schema_string, parse_arguments, Tool, ToolRegistry,
};
pub use search::SearchImagesTool;

use anyhow::Result;
use pixabay_sdk::PixabayClient;
use std::sync::Arc;

/// Build the registry with every Pixabay tool, sharing one upstream client.
pub fn pixabay_registry(client: PixabayClient) -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(SearchImagesTool::new(client.clone())))?;
    registry.register(Arc::new(DownloadImageTool::new(client)))?;
    Ok(registry)
}
