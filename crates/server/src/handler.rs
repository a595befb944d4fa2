// Shared MCP request dispatch. The stdio and SSE front-ends both route
// through here so tool discovery and call behavior are identical across
// transports.

use crawl4ai_mcp_core::catalog;
use crawl4ai_mcp_core::protocol::{
    CallToolParams, CallToolResult, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListToolsResult, ServerCapabilities, ServerInfo, ToolsCapability,
    PROTOCOL_VERSION,
};
use crawl4ai_mcp_core::Forwarder;
use serde_json::{json, Value};
use tracing::debug;

pub const SERVER_NAME: &str = "crawl4ai-mcp";

/// Dispatches MCP requests to the catalog and the forwarder.
pub struct McpHandler {
    forwarder: Forwarder,
}

impl McpHandler {
    pub fn new(forwarder: Forwarder) -> Self {
        Self { forwarder }
    }

    /// Handle one JSON-RPC request. Notifications yield no response.
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            debug!(method = %request.method, "ignoring notification");
            return None;
        };

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(
                id,
                json!(InitializeResult {
                    protocol_version: PROTOCOL_VERSION.to_string(),
                    capabilities: ServerCapabilities {
                        tools: ToolsCapability {
                            list_changed: false,
                        },
                    },
                    server_info: ServerInfo {
                        name: SERVER_NAME.to_string(),
                        version: env!("CARGO_PKG_VERSION").to_string(),
                    },
                }),
            ),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(
                id,
                json!(ListToolsResult {
                    tools: catalog::tools()
                }),
            ),
            "tools/call" => {
                let params: CallToolParams =
                    match serde_json::from_value(request.params.unwrap_or(Value::Null)) {
                        Ok(params) => params,
                        Err(e) => {
                            return Some(JsonRpcResponse::error(
                                id,
                                JsonRpcError::invalid_params(e.to_string()),
                            ));
                        }
                    };
                JsonRpcResponse::success(id, json!(self.call_tool(params).await))
            }
            other => JsonRpcResponse::error(id, JsonRpcError::method_not_found(other)),
        };

        Some(response)
    }

    /// Forward a tool call; every failure becomes an in-band error result
    /// rather than a transport-level failure.
    pub async fn call_tool(&self, params: CallToolParams) -> CallToolResult {
        match self.forwarder.forward(&params.name, params.arguments).await {
            Ok(response) => CallToolResult::text(response.render()),
            Err(e) => CallToolResult::error(e.to_string()),
        }
    }
}
