use anyhow::Result;
use clap::Parser;
use crawl4ai_mcp_core::{Forwarder, ServerConfig};

mod handler;
mod http;
mod sse;
mod stdio;

use handler::McpHandler;

const DEFAULT_HTTP_PORT: u16 = 3000;
const DEFAULT_SSE_PORT: u16 = 3001;

#[derive(Parser, Debug)]
#[command(name = "crawl4ai-mcp")]
#[command(version)]
#[command(about = "MCP server for Crawl4AI - forwards tool calls to a remote crawling API", long_about = None)]
struct Args {
    /// Run in stdio mode for MCP clients (default)
    #[arg(long)]
    stdio: bool,

    /// Run in SSE mode for web interfaces
    #[arg(long)]
    sse: bool,

    /// Run in HTTP (JSON-RPC) mode
    #[arg(long)]
    http: bool,

    /// Crawl4AI API endpoint URL (required)
    #[arg(long, env = "CRAWL4AI_ENDPOINT")]
    endpoint: Option<String>,

    /// Bearer authentication token (optional)
    #[arg(long, env = "CRAWL4AI_BEARER_TOKEN")]
    bearer_token: Option<String>,

    /// Server port for the active mode
    #[arg(long)]
    port: Option<u16>,

    /// SSE server port (takes precedence over --port in SSE mode)
    #[arg(long)]
    sse_port: Option<u16>,
}

impl Args {
    fn http_port(&self) -> u16 {
        self.port
            .or_else(|| env_port("HTTP_PORT"))
            .unwrap_or(DEFAULT_HTTP_PORT)
    }

    fn sse_port(&self) -> u16 {
        self.sse_port
            .or(self.port)
            .or_else(|| env_port("SSE_PORT"))
            .unwrap_or(DEFAULT_SSE_PORT)
    }
}

fn env_port(name: &str) -> Option<u16> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout is reserved for the stdio transport, so all logging goes to
    // stderr in every mode.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = ServerConfig::new(args.endpoint.clone(), args.bearer_token.clone());
    if config.endpoint.is_none() {
        eprintln!("Error: CRAWL4AI_ENDPOINT is required");
        eprintln!("Use --endpoint or set CRAWL4AI_ENDPOINT environment variable");
        std::process::exit(1);
    }
    if let Err(e) = config.validate() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let handler = McpHandler::new(Forwarder::new(config));

    if args.http {
        http::serve(args.http_port(), handler).await?;
    } else if args.sse {
        sse::serve(args.sse_port(), handler).await?;
    } else {
        stdio::serve(handler).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stdio_is_the_default_mode() {
        let args = Args::parse_from(["crawl4ai-mcp", "--endpoint", "http://localhost:11235"]);
        assert!(!args.sse);
        assert!(!args.http);
    }

    #[test]
    fn ports_fall_back_to_defaults() {
        let args = Args::parse_from(["crawl4ai-mcp", "--http"]);
        assert_eq!(args.http_port(), DEFAULT_HTTP_PORT);

        let args = Args::parse_from(["crawl4ai-mcp", "--sse"]);
        assert_eq!(args.sse_port(), DEFAULT_SSE_PORT);
    }

    #[test]
    fn port_flag_overrides_both_modes() {
        let args = Args::parse_from(["crawl4ai-mcp", "--http", "--port", "8080"]);
        assert_eq!(args.http_port(), 8080);

        let args = Args::parse_from(["crawl4ai-mcp", "--sse", "--port", "8080"]);
        assert_eq!(args.sse_port(), 8080);
    }

    #[test]
    fn sse_port_flag_wins_in_sse_mode() {
        let args = Args::parse_from([
            "crawl4ai-mcp",
            "--sse",
            "--port",
            "8080",
            "--sse-port",
            "9090",
        ]);
        assert_eq!(args.sse_port(), 9090);
        assert_eq!(args.http_port(), 8080);
    }
}
