//! Publii status strings
//!
//! Publii keeps the publish state and a handful of flags in one comma-joined
//! `posts.status` column, e.g. `published`, `draft,is-page` or
//! `published,featured`. [`Status`] is the typed form used by the rest of the
//! crate; the legacy string only exists at the storage boundary.

use crate::content::ContentKind;
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Flag that turns a `posts` row into a page
pub const PAGE_MARKER: &str = "is-page";

/// Publish state of a post or page.
///
/// Only `draft` and `published` can be written through this crate. Anything
/// else Publii itself may have stored is kept as `Other` so it survives a
/// re-encode untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PublishState {
    Draft,
    Published,
    Other(String),
}

impl PublishState {
    /// Get the string representation of the publish state
    pub fn as_str(&self) -> &str {
        match self {
            PublishState::Draft => "draft",
            PublishState::Published => "published",
            PublishState::Other(raw) => raw,
        }
    }

    fn from_stored(token: &str) -> Self {
        match token {
            "draft" => PublishState::Draft,
            "published" => PublishState::Published,
            other => PublishState::Other(other.to_string()),
        }
    }
}

impl FromStr for PublishState {
    type Err = Error;

    /// Parse caller input. Only the two canonical states are accepted.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "draft" => Ok(PublishState::Draft),
            "published" => Ok(PublishState::Published),
            _ => Err(Error::Validation(format!(
                "Invalid status: '{}' (expected 'draft' or 'published')",
                s
            ))),
        }
    }
}

impl fmt::Display for PublishState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Typed view of the composite `posts.status` column.
///
/// Serializes as the legacy composite string so callers see exactly what
/// Publii stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct Status {
    pub state: PublishState,
    pub is_page: bool,
    /// Extra Publii flags (`featured`, `hidden`, ...) in stored order
    pub flags: Vec<String>,
    /// Column text as read, echoed back until the state is replaced
    stored: Option<String>,
}

impl Status {
    /// Status for a freshly created item of the given kind
    pub fn new(state: PublishState, kind: ContentKind) -> Self {
        Self {
            state,
            is_page: kind == ContentKind::Page,
            flags: Vec::new(),
            stored: None,
        }
    }

    /// Decode a stored status string.
    ///
    /// The first token that is not the page marker is the publish state.
    /// The raw text is kept so an untouched status encodes byte-for-byte.
    pub fn parse_stored(raw: &str) -> Self {
        let mut state = None;
        let mut is_page = false;
        let mut flags = Vec::new();

        for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if token == PAGE_MARKER {
                is_page = true;
            } else if state.is_none() {
                state = Some(PublishState::from_stored(token));
            } else {
                flags.push(token.to_string());
            }
        }

        Self {
            state: state.unwrap_or_else(|| PublishState::Other(String::new())),
            is_page,
            flags,
            stored: Some(raw.to_string()),
        }
    }

    /// Encode to the string stored in `posts.status`
    pub fn to_stored(&self) -> String {
        if let Some(raw) = &self.stored {
            return raw.clone();
        }
        let mut parts: Vec<&str> = Vec::with_capacity(self.flags.len() + 2);
        if !self.state.as_str().is_empty() {
            parts.push(self.state.as_str());
        }
        parts.extend(self.flags.iter().map(String::as_str));
        if self.is_page {
            parts.push(PAGE_MARKER);
        }
        parts.join(",")
    }

    /// Replace the publish state, keeping the page marker and flags
    pub fn with_state(mut self, state: PublishState) -> Self {
        self.state = state;
        self.stored = None;
        self
    }

    pub fn kind(&self) -> ContentKind {
        if self.is_page {
            ContentKind::Page
        } else {
            ContentKind::Post
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_stored())
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.to_stored()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_page_gets_marker() {
        let status = Status::new(PublishState::Draft, ContentKind::Page);
        assert_eq!(status.to_stored(), "draft,is-page");

        let status = Status::new(PublishState::Published, ContentKind::Post);
        assert_eq!(status.to_stored(), "published");
    }

    #[test]
    fn test_parse_stored_page() {
        let status = Status::parse_stored("published,is-page");
        assert_eq!(status.state, PublishState::Published);
        assert!(status.is_page);
        assert_eq!(status.kind(), ContentKind::Page);
        assert!(status.flags.is_empty());
    }

    #[test]
    fn test_flags_survive_state_change() {
        let status = Status::parse_stored("draft,featured,is-page");
        let updated = status.with_state(PublishState::Published);
        assert_eq!(updated.to_stored(), "published,featured,is-page");
    }

    #[test]
    fn test_unknown_state_is_preserved() {
        let status = Status::parse_stored("trashed");
        assert_eq!(status.state, PublishState::Other("trashed".to_string()));
        assert_eq!(status.to_stored(), "trashed");

        let empty = Status::parse_stored("");
        assert_eq!(empty.to_stored(), "");
    }

    #[test]
    fn test_untouched_status_keeps_stored_text() {
        let status = Status::parse_stored("published, featured");
        assert_eq!(status.flags, vec!["featured".to_string()]);
        assert_eq!(status.to_stored(), "published, featured");
        assert_eq!(serde_json::to_value(&status).unwrap(), serde_json::json!("published, featured"));

        let updated = status.with_state(PublishState::Draft);
        assert_eq!(updated.to_stored(), "draft,featured");
    }

    #[test]
    fn test_input_accepts_only_canonical_states() {
        assert_eq!("draft".parse::<PublishState>().unwrap(), PublishState::Draft);
        assert_eq!("published".parse::<PublishState>().unwrap(), PublishState::Published);
        assert!(matches!("trashed".parse::<PublishState>(), Err(Error::Validation(_))));
        assert!(matches!("draft,is-page".parse::<PublishState>(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_serializes_as_composite_string() {
        let status = Status::new(PublishState::Draft, ContentKind::Page);
        assert_eq!(serde_json::to_value(&status).unwrap(), serde_json::json!("draft,is-page"));
    }
}
