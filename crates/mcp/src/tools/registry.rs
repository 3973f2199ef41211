// Tool registry: the single entry point for tool execution

use crate::error::{McpError, ToolError};
use crate::protocol::{CallToolResult, ToolSchema};
use anyhow::{bail, Result};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Tool executor trait
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool schema for MCP
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with given arguments
    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult, ToolError>;
}

/// Tool registry mapping names to handlers, in registration order
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    by_name: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Register a tool. Names must be unique.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        let name = tool.schema().name;
        if self.by_name.contains_key(&name) {
            bail!("Tool already registered: {}", name);
        }

        self.by_name.insert(name, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.by_name.get(name).map(|&i| self.tools[i].clone())
    }

    /// List all tool schemas
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.tools.iter().map(|t| t.schema()).collect()
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Dispatch an invocation by name.
    ///
    /// Upstream failures are rewritten into a uniform internal error; anything
    /// else the handler returns is passed through unchanged.
    pub async fn call(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<CallToolResult, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| McpError::method_not_found(format!("Unknown tool: {}", name)))?;

        debug!(tool = name, "Calling tool");
        match tool.execute(arguments).await {
            Err(ToolError::Upstream(e)) if e.is_transport() => {
                warn!(tool = name, error = %e, "Upstream request failed");
                Err(McpError::from_upstream(&e).into())
            }
            other => other,
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a tool's argument bag, treating absent arguments as an empty object.
pub fn parse_arguments<T: DeserializeOwned>(
    tool: &str,
    arguments: serde_json::Value,
) -> Result<T, McpError> {
    let arguments = if arguments.is_null() {
        serde_json::json!({})
    } else {
        arguments
    };

    serde_json::from_value(arguments)
        .map_err(|e| McpError::invalid_params(format!("Invalid arguments for {}: {}", tool, e)))
}

// Helper functions for creating tool schemas

pub fn json_schema_object(properties: serde_json::Value, required: Vec<&str>) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn json_schema_string(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "description": description
    })
}

pub fn json_schema_enum(
    description: &str,
    values: &[&str],
    default: Option<&str>,
) -> serde_json::Value {
    let mut schema = serde_json::json!({
        "type": "string",
        "description": description,
        "enum": values
    });
    if let Some(default) = default {
        schema["default"] = serde_json::json!(default);
    }
    schema
}

pub fn json_schema_integer(
    description: &str,
    minimum: u32,
    maximum: Option<u32>,
    default: u32,
) -> serde_json::Value {
    let mut schema = serde_json::json!({
        "type": "integer",
        "description": description,
        "minimum": minimum,
        "default": default
    });
    if let Some(maximum) = maximum {
        schema["maximum"] = serde_json::json!(maximum);
    }
    schema
}

pub fn json_schema_boolean(description: &str, default: bool) -> serde_json::Value {
    serde_json::json!({
        "type": "boolean",
        "description": description,
        "default": default
    })
}
