//! Server Layer - Publii tools and their MCP transport
//!
//! - `tools`: the operation facade, one named tool per accessor capability
//! - `mcp`: `mcp-sdk-rs` handler serving those tools over stdio

pub mod mcp;
pub mod tools;

pub use mcp::McpService;
pub use tools::{PubliiTools, SiteLookup, ToolDefinition};
