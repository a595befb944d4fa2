// Stdio front-end: newline-delimited JSON-RPC over stdin/stdout.
//
// stdout carries protocol traffic only; all logging goes to stderr.

use crate::handler::McpHandler;
use anyhow::Result;
use crawl4ai_mcp_core::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};
use tracing::warn;

/// Run the message loop until stdin closes.
pub async fn serve(handler: McpHandler) -> Result<()> {
    let mut reader = FramedRead::new(tokio::io::stdin(), LinesCodec::new());
    let mut writer = FramedWrite::new(tokio::io::stdout(), LinesCodec::new());

    tracing::info!("Crawl4AI MCP server running on stdio");

    while let Some(line) = reader.next().await {
        let line = line?;
        if let Some(response) = respond_to_line(&handler, &line).await {
            writer.send(response).await?;
        }
    }

    Ok(())
}

/// Handle one inbound line. Blank lines are skipped; unparseable lines get
/// a JSON-RPC parse error with a null id.
async fn respond_to_line(handler: &McpHandler, line: &str) -> Option<String> {
    if line.trim().is_empty() {
        return None;
    }

    let response = match serde_json::from_str::<JsonRpcRequest>(line) {
        Ok(request) => handler.handle(request).await?,
        Err(e) => {
            warn!(error = %e, "discarding unparseable message");
            JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error())
        }
    };

    match serde_json::to_string(&response) {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(error = %e, "failed to serialize response");
            None
        }
    }
}
