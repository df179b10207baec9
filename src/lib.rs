//! # publii-mcp - MCP server for Publii CMS
//!
//! Read/write access to a Publii installation's local site databases.
//!
//! publii-mcp provides:
//! - Site discovery under `<data-dir>/sites/<name>/input/db.sqlite`
//! - Typed records for posts, pages, tags and authors
//! - Create/update/delete of posts and pages with Publii's side tables kept consistent
//! - Publii-compatible slug generation
//! - A Model Context Protocol tool surface over stdio

pub mod config;
pub mod content;
pub mod publii;
pub mod server;
pub mod slug;
pub mod status;
pub mod storage;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenient access
pub use content::{
    Author, ContentKind, ContentRecord, ContentSummary, ContentUpdate, DeletedContent, NewContent,
    SiteInfo, StatusFilter, Tag,
};
pub use publii::Publii;
pub use slug::generate_slug;
pub use status::{PublishState, Status};
pub use storage::SiteStore;

/// Result type alias for publii-mcp operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for publii-mcp operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
