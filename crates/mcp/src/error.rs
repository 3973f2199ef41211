// Error taxonomy for tool invocations

use pixabay_sdk::PixabayError;

/// JSON-RPC error codes used by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
}

impl ErrorCode {
    pub fn code(self) -> i32 {
        match self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::InternalError => -32603,
        }
    }
}

/// A protocol-level failure with a code the caller can act on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct McpError {
    pub code: ErrorCode,
    pub message: String,
}

impl McpError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn method_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MethodNotFound, message)
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidParams, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Normalize an upstream failure into the uniform internal-error shape.
    pub fn from_upstream(error: &PixabayError) -> Self {
        let message = match error.status() {
            Some(status) => format!(
                "Pixabay API error (status {}): {}",
                status,
                error.upstream_message()
            ),
            None => format!("Pixabay API error: {}", error.upstream_message()),
        };
        Self::internal(message)
    }
}

/// Failure raised by a tool handler.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Raised deliberately by the handler; passed through unchanged.
    #[error(transparent)]
    Mcp(#[from] McpError),

    /// The upstream HTTP exchange failed.
    #[error(transparent)]
    Upstream(#[from] PixabayError),

    /// Anything the handler did not anticipate.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
