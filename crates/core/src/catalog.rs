// The fixed tool catalog and the tool-name -> remote-path mapping.
//
// Every front-end consults this module so tool discovery is identical
// across transports. Each tool maps one-to-one to a Crawl4AI API path.

use crate::protocol::ToolSchema;
use serde_json::json;

/// All tools exposed by this server, in stable order.
pub fn tools() -> Vec<ToolSchema> {
    vec![
        ToolSchema {
            name: "md".to_string(),
            description: "Convert webpage to clean markdown format with content filtering options"
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "url": { "type": "string", "description": "Target URL to crawl and convert to markdown" },
                    "c": { "type": "string", "default": "0", "description": "Cache-bust counter for forcing fresh content" },
                    "f": { "type": "string", "default": "fit", "enum": ["raw", "fit", "bm25", "llm"], "description": "Content filter strategy" },
                    "q": { "type": "string", "description": "Query string for BM25/LLM content filtering" },
                    "provider": { "type": "string", "description": "LLM provider override (e.g., \"anthropic/claude-3-opus\")" }
                },
                "required": ["url"]
            }),
        },
        ToolSchema {
            name: "html".to_string(),
            description: "Get cleaned and preprocessed HTML content for further processing"
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "url": { "type": "string", "description": "Target URL to crawl and extract HTML from" }
                },
                "required": ["url"]
            }),
        },
        ToolSchema {
            name: "screenshot".to_string(),
            description:
                "Capture full-page PNG screenshot of specified URL with configurable wait time"
                    .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "url": { "type": "string", "description": "Target URL to capture screenshot from" },
                    "output_path": { "type": "string", "description": "Optional path to save screenshot file" },
                    "screenshot_wait_for": { "type": "number", "default": 2, "description": "Wait time in seconds before capturing screenshot" }
                },
                "required": ["url"]
            }),
        },
        ToolSchema {
            name: "pdf".to_string(),
            description: "Generate PDF document from webpage for archival or printing purposes"
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "url": { "type": "string", "description": "Target URL to convert to PDF document" },
                    "output_path": { "type": "string", "description": "Optional path to save PDF file" }
                },
                "required": ["url"]
            }),
        },
        ToolSchema {
            name: "execute_js".to_string(),
            description: "Execute JavaScript code on specified URL and return comprehensive results"
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "url": { "type": "string", "description": "Target URL to execute JavaScript on" },
                    "scripts": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "List of JavaScript snippets to execute in order"
                    }
                },
                "required": ["url", "scripts"]
            }),
        },
        ToolSchema {
            name: "crawl".to_string(),
            description:
                "Crawl multiple URLs simultaneously and return comprehensive results for each"
                    .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "urls": {
                        "type": "array",
                        "items": { "type": "string" },
                        "maxItems": 100,
                        "minItems": 1,
                        "description": "List of URLs to crawl (maximum 100 URLs)"
                    },
                    "browser_config": { "type": "object", "description": "Browser configuration options (optional)" },
                    "crawler_config": { "type": "object", "description": "Crawler configuration options (optional)" }
                },
                "required": ["urls"]
            }),
        },
    ]
}

/// Tool names in the same order as [`tools`].
pub fn tool_names() -> Vec<String> {
    tools().into_iter().map(|t| t.name).collect()
}

/// Map a tool name to its remote API path. A miss means the tool does not
/// exist; there is no default path.
pub fn endpoint_path(name: &str) -> Option<&'static str> {
    match name {
        "md" => Some("/md"),
        "html" => Some("/html"),
        "screenshot" => Some("/screenshot"),
        "pdf" => Some("/pdf"),
        "execute_js" => Some("/execute_js"),
        "crawl" => Some("/crawl"),
        _ => None,
    }
}
