// MCP server: newline-delimited JSON-RPC over stdio

use crate::error::ToolError;
use crate::protocol::{
    negotiate_version, CallToolParams, InitializeParams, InitializeResult, JsonRpcError,
    JsonRpcRequest, JsonRpcResponse, ListToolsResult, ServerCapabilities, ServerInfo,
    ToolsCapability,
};
use crate::tools::ToolRegistry;
use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec, LinesCodecError};
use tracing::{debug, error, info, warn};

/// Server name reported during `initialize`.
pub const SERVER_NAME: &str = "pixabay-server";

/// Longest accepted request line.
const MAX_LINE_BYTES: usize = 4 * 1024 * 1024;

pub struct McpServer {
    registry: ToolRegistry,
    info: ServerInfo,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry,
            info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    /// Serve on the process's stdin/stdout until EOF or Ctrl-C.
    pub async fn start(self: Arc<Self>) -> Result<()> {
        info!("Pixabay MCP server running on stdio");

        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        };

        self.serve(tokio::io::stdin(), tokio::io::stdout(), shutdown)
            .await
    }

    /// Serve requests read from `reader`, writing responses to `writer`.
    ///
    /// Each request is handled on its own task, so a slow upstream call does
    /// not hold up unrelated requests; responses may therefore be written out
    /// of order. On EOF in-flight requests are allowed to finish. When
    /// `shutdown` resolves the transport is closed immediately.
    pub async fn serve<R, W, F>(self: Arc<Self>, reader: R, writer: W, shutdown: F) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Send + Unpin + 'static,
        F: Future<Output = ()>,
    {
        let mut lines = FramedRead::new(reader, LinesCodec::new_with_max_length(MAX_LINE_BYTES));
        let mut sink = FramedWrite::new(writer, LinesCodec::new());
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        let mut writer_task = tokio::spawn(async move {
            while let Some(line) = rx.recv().await {
                debug!("Sending: {}", line);
                sink.send(line).await?;
            }
            SinkExt::<String>::close(&mut sink).await?;
            Ok::<_, LinesCodecError>(())
        });

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Interrupt received, closing transport");
                    writer_task.abort();
                    return Ok(());
                }
                next = lines.next() => match next {
                    None => {
                        info!("stdin closed (EOF), shutting down...");
                        break;
                    }
                    Some(Err(LinesCodecError::MaxLineLengthExceeded)) => {
                        warn!("Dropping request longer than {} bytes", MAX_LINE_BYTES);
                        let response = JsonRpcResponse::error(
                            serde_json::Value::Null,
                            JsonRpcError::parse_error("request line too long"),
                        );
                        send_response(&tx, &response);
                    }
                    Some(Err(LinesCodecError::Io(e))) => {
                        error!("FATAL: Failed to read from stdin: {}", e);
                        writer_task.abort();
                        return Err(e).context("stdin read error");
                    }
                    Some(Ok(line)) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        debug!("Received: {}", line.trim());

                        let server = self.clone();
                        let tx = tx.clone();
                        tokio::spawn(async move {
                            if let Some(response) = server.handle_message(&line).await {
                                send_response(&tx, &response);
                            }
                        });
                    }
                }
            }
        }

        drop(tx);
        tokio::select! {
            joined = &mut writer_task => {
                joined
                    .context("response writer panicked")?
                    .context("stdout write error")?;
            }
            _ = &mut shutdown => {
                info!("Interrupt received, closing transport");
                writer_task.abort();
            }
        }

        info!("Server shutting down...");
        Ok(())
    }

    /// Handle one raw message. Returns `None` for notifications.
    pub async fn handle_message(&self, input: &str) -> Option<JsonRpcResponse> {
        let value: serde_json::Value = match serde_json::from_str(input) {
            Ok(v) => v,
            Err(e) => {
                warn!("Failed to parse request: {}", e);
                return Some(JsonRpcResponse::error(
                    serde_json::Value::Null,
                    JsonRpcError::parse_error(e),
                ));
            }
        };

        let request: JsonRpcRequest = match serde_json::from_value(value.clone()) {
            Ok(r) => r,
            Err(e) => {
                warn!("Malformed request: {}", e);
                let id = value.get("id").cloned().unwrap_or(serde_json::Value::Null);
                return Some(JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_request(format!("Invalid Request: {}", e)),
                ));
            }
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id.unwrap_or(serde_json::Value::Null),
                JsonRpcError::invalid_request("Invalid JSON-RPC version"),
            ));
        }

        if request.is_notification() {
            self.handle_notification(&request);
            return None;
        }

        let id = request.id.clone().unwrap_or(serde_json::Value::Null);
        match self.dispatch(&request.method, request.params).await {
            Ok(result) => Some(JsonRpcResponse::success(id, result)),
            Err(error) => Some(JsonRpcResponse::error(id, error)),
        }
    }

    fn handle_notification(&self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" => info!("Client initialized"),
            other => debug!("Ignoring notification: {}", other),
        }
    }

    async fn dispatch(
        &self,
        method: &str,
        params: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, JsonRpcError> {
        match method {
            "initialize" => {
                let params: InitializeParams = decode_params(params)?;
                info!(
                    client = %params.client_info.name,
                    client_version = %params.client_info.version,
                    protocol = %params.protocol_version,
                    "Initialize"
                );
                to_result(&InitializeResult {
                    protocol_version: negotiate_version(&params.protocol_version).to_string(),
                    capabilities: ServerCapabilities {
                        tools: Some(ToolsCapability {
                            list_changed: false,
                        }),
                    },
                    server_info: self.info.clone(),
                })
            }
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => to_result(&ListToolsResult {
                tools: self.registry.list_schemas(),
            }),
            "tools/call" => {
                let params: CallToolParams = decode_params(params)?;
                match self.registry.call(&params.name, params.arguments).await {
                    Ok(result) => to_result(&result),
                    Err(e) => Err(tool_error_to_rpc(&params.name, e)),
                }
            }
            other => Err(JsonRpcError::method_not_found(other)),
        }
    }
}

fn send_response(tx: &mpsc::UnboundedSender<String>, response: &JsonRpcResponse) {
    match serde_json::to_string(response) {
        Ok(json) => {
            if tx.send(json).is_err() {
                warn!("Transport closed, dropping response");
            }
        }
        Err(e) => error!("Failed to serialize response: {}", e),
    }
}

fn decode_params<T: serde::de::DeserializeOwned>(
    params: Option<serde_json::Value>,
) -> Result<T, JsonRpcError> {
    let params = params.ok_or_else(|| JsonRpcError::invalid_params("Missing params"))?;
    serde_json::from_value(params)
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {}", e)))
}

fn to_result<T: Serialize>(value: &T) -> Result<serde_json::Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}

fn tool_error_to_rpc(tool: &str, error: ToolError) -> JsonRpcError {
    match error {
        ToolError::Mcp(e) => e.into(),
        ToolError::Upstream(e) if e.is_transport() => {
            crate::error::McpError::from_upstream(&e).into()
        }
        ToolError::Upstream(e) => {
            error!(tool = tool, "Unhandled SDK failure: {}", e);
            JsonRpcError::internal_error(e.to_string())
        }
        ToolError::Other(e) => {
            error!(tool = tool, "Unhandled tool failure: {:#}", e);
            JsonRpcError::internal_error(format!("{:#}", e))
        }
    }
}
