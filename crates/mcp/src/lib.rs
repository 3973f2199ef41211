// MCP (Model Context Protocol) server exposing Pixabay image tools to agent clients

pub mod config;
pub mod error;
pub mod protocol;
pub mod server;
pub mod tools;

pub use config::Settings;
pub use error::{ErrorCode, McpError, ToolError};
pub use server::McpServer;
