// Core types for the Crawl4AI MCP shim: configuration, protocol types,
// the tool catalog, and the forwarder that talks to the remote API.

pub mod catalog;
pub mod config;
pub mod error;
pub mod forwarder;
pub mod protocol;

pub use config::ServerConfig;
pub use error::{ForwardError, ForwardResult};
pub use forwarder::{Forwarder, RemoteResponse};
