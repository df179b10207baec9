//! Content types - typed records for the Publii `posts`, `tags` and `authors` tables
//!
//! Posts and pages share the `posts` table; a [`ContentKind`] selects the
//! partition and is derived from the page marker in the status column.

use crate::status::{PublishState, Status};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which half of the `posts` table an operation works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Blog post - status without the page marker
    Post,
    /// Static page - status carries `is-page`
    Page,
}

impl ContentKind {
    /// Get the string representation of the content kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Post => "post",
            ContentKind::Page => "page",
        }
    }

    /// Capitalized name for error messages
    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::Post => "Post",
            ContentKind::Page => "Page",
        }
    }

    /// Get all content kinds
    pub fn all() -> &'static [ContentKind] {
        &[ContentKind::Post, ContentKind::Page]
    }
}

impl FromStr for ContentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "post" | "posts" => Ok(ContentKind::Post),
            "page" | "pages" => Ok(ContentKind::Page),
            _ => Err(Error::Validation(format!("Unknown content kind: {}", s))),
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status filter for listings.
///
/// `Published` and `Draft` compare the stored status literally, so
/// `published,is-page` matches neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Published,
    Draft,
}

impl StatusFilter {
    /// Exact `posts.status` value to match, `None` for no filtering
    pub fn stored_value(&self) -> Option<&'static str> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Published => Some("published"),
            StatusFilter::Draft => Some("draft"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(StatusFilter::All),
            "published" => Ok(StatusFilter::Published),
            "draft" => Ok(StatusFilter::Draft),
            _ => Err(Error::Validation(format!(
                "Invalid status filter: '{}' (expected all, published or draft)",
                s
            ))),
        }
    }
}

/// A site directory under `<data-dir>/sites/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteInfo {
    pub name: String,
    pub has_db: bool,
}

/// Listing row for a post or page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentSummary {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub status: Status,
    pub author_id: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
}

/// A post or page with its body and passthrough fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentRecord {
    #[serde(flatten)]
    pub summary: ContentSummary,
    pub content: String,
    pub featured_image_id: Option<i64>,
    pub template: Option<String>,
}

/// Input for creating a post or page.
#[derive(Debug, Clone)]
pub struct NewContent {
    pub kind: ContentKind,
    pub title: String,
    pub content: String,
    /// Generated from the title when absent
    pub slug: Option<String>,
    pub status: PublishState,
    pub author_id: i64,
}

impl NewContent {
    /// Draft by author 1, slug derived from the title
    pub fn new(kind: ContentKind, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            content: content.into(),
            slug: None,
            status: PublishState::Draft,
            author_id: 1,
        }
    }

    pub fn post(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(ContentKind::Post, title, content)
    }

    pub fn page(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(ContentKind::Page, title, content)
    }

    /// Set an explicit slug
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_status(mut self, status: PublishState) -> Self {
        self.status = status;
        self
    }

    pub fn with_author(mut self, author_id: i64) -> Self {
        self.author_id = author_id;
        self
    }
}

/// Partial update of a post or page. `None` fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct ContentUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<PublishState>,
}

impl ContentUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.status.is_none()
    }
}

/// Confirmation returned by a delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletedContent {
    pub deleted: bool,
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// Convert a Publii epoch-milliseconds timestamp
pub fn timestamp_from_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_kind_roundtrip() {
        for kind in ContentKind::all() {
            let parsed: ContentKind = kind.as_str().parse().unwrap();
            assert_eq!(*kind, parsed);
        }
        assert_eq!(ContentKind::from_str("Pages").unwrap(), ContentKind::Page);
    }

    #[test]
    fn test_status_filter_parse() {
        assert_eq!(StatusFilter::from_str("all").unwrap(), StatusFilter::All);
        assert_eq!(StatusFilter::Published.stored_value(), Some("published"));
        assert_eq!(StatusFilter::All.stored_value(), None);
        assert!(matches!(StatusFilter::from_str("hidden"), Err(Error::Validation(_))));
    }

    #[test]
    fn test_new_content_defaults() {
        let draft = NewContent::page("About", "<p>hi</p>");
        assert_eq!(draft.kind, ContentKind::Page);
        assert_eq!(draft.status, PublishState::Draft);
        assert_eq!(draft.author_id, 1);
        assert!(draft.slug.is_none());
    }

    #[test]
    fn test_timestamp_serializes_as_iso8601() {
        let ts = timestamp_from_millis(1_700_000_000_123).unwrap();
        assert_eq!(
            serde_json::to_value(ts).unwrap(),
            serde_json::json!("2023-11-14T22:13:20.123Z")
        );
    }

    #[test]
    fn test_record_flattens_summary() {
        let record = ContentRecord {
            summary: ContentSummary {
                id: 3,
                title: "Hello".to_string(),
                slug: "hello".to_string(),
                status: Status::parse_stored("draft"),
                author_id: 1,
                created_at: None,
                modified_at: None,
            },
            content: "<p>x</p>".to_string(),
            featured_image_id: None,
            template: None,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["status"], "draft");
        assert_eq!(value["content"], "<p>x</p>");
    }
}
