// Plain HTTP front-end: a minimal JSON-RPC-shaped server.
//
// Every JSON-RPC-level outcome, including unknown methods, malformed
// bodies, and tool-call failures, rides an HTTP 200. Downstream consumers
// inspect the payload, not the status code.

use crate::handler::{McpHandler, SERVER_NAME};
use anyhow::Result;
use axum::{
    extract::State,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use crawl4ai_mcp_core::catalog;
use crawl4ai_mcp_core::protocol::{
    CallToolParams, CallToolResult, JsonRpcError, JsonRpcResponse, ListToolsResult,
};
use serde_json::Value;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Start the plain HTTP front-end.
pub async fn serve(port: u16, handler: McpHandler) -> Result<()> {
    let app = router(Arc::new(handler));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("Crawl4AI MCP server running on HTTP port {}", port);

    axum::serve(listener, app).await?;

    Ok(())
}

fn router(handler: Arc<McpHandler>) -> Router {
    Router::new()
        .route("/", get(index).post(rpc))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(handler)
}

/// Status/tool-name summary; requires no auth.
async fn index() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "tools": catalog::tool_names(),
    }))
}

/// JSON-RPC endpoint. `tools/list` and `tools/call` are the only methods.
async fn rpc(State(handler): State<Arc<McpHandler>>, body: String) -> impl IntoResponse {
    let envelope: Value = match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(e) => {
            let response =
                JsonRpcResponse::error(Value::Null, JsonRpcError::internal_error(e.to_string()));
            return Json(response);
        }
    };

    let id = envelope.get("id").cloned().unwrap_or(Value::Null);
    let method = envelope.get("method").and_then(Value::as_str).unwrap_or("");
    let params = envelope.get("params").cloned().unwrap_or(Value::Null);

    let response = match method {
        "tools/list" => JsonRpcResponse::success(
            id,
            serde_json::json!(ListToolsResult {
                tools: catalog::tools()
            }),
        ),
        "tools/call" => {
            // Bad params are an in-band tool error, same as a failed call.
            let result = match serde_json::from_value::<CallToolParams>(params) {
                Ok(params) => handler.call_tool(params).await,
                Err(e) => CallToolResult::error(e.to_string()),
            };
            JsonRpcResponse::success(id, serde_json::json!(result))
        }
        other => JsonRpcResponse::error(id, JsonRpcError::method_not_found(other)),
    };

    Json(response)
}
