//! Default `posts_additional_data` blobs written for new posts and pages
//!
//! Every item carries one `_core` block and one view settings block, both
//! stored as JSON text.

use crate::content::ContentKind;
use serde_json::{Map, Value, json};

pub const CORE_KEY: &str = "_core";
pub const POST_VIEW_SETTINGS_KEY: &str = "postViewSettings";
pub const PAGE_VIEW_SETTINGS_KEY: &str = "pageViewSettings";

const POST_VIEW_FIELDS: &[&str] = &[
    "displayDate",
    "displayAuthor",
    "displayLastUpdatedDate",
    "displayTags",
    "displayShareButtons",
    "displayAuthorBio",
    "displayPostNavigation",
    "displayRelatedPosts",
    "displayComments",
];

const PAGE_VIEW_FIELDS: &[&str] = &[
    "displayDate",
    "displayAuthor",
    "displayLastUpdatedDate",
    "displayShareButtons",
    "displayAuthorBio",
    "displayChildPages",
    "displayComments",
];

/// Key of the view settings row for the given kind
pub fn view_settings_key(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Post => POST_VIEW_SETTINGS_KEY,
        ContentKind::Page => PAGE_VIEW_SETTINGS_KEY,
    }
}

/// SEO and editor defaults
pub fn default_core_data() -> Value {
    json!({
        "metaTitle": "",
        "metaDesc": "",
        "metaRobots": "index, follow",
        "canonicalUrl": "",
        "mainTag": "",
        "editor": "tinymce",
    })
}

/// Every view option set to "inherit from theme" (empty select value)
pub fn default_view_settings(kind: ContentKind) -> Value {
    let fields = match kind {
        ContentKind::Post => POST_VIEW_FIELDS,
        ContentKind::Page => PAGE_VIEW_FIELDS,
    };

    let settings: Map<String, Value> = fields
        .iter()
        .map(|field| (field.to_string(), json!({ "type": "select", "value": "" })))
        .collect();

    Value::Object(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_settings_differ_by_kind() {
        let post = default_view_settings(ContentKind::Post);
        let page = default_view_settings(ContentKind::Page);

        assert!(post.get("displayTags").is_some());
        assert!(page.get("displayTags").is_none());
        assert!(page.get("displayChildPages").is_some());
        assert_eq!(post["displayDate"]["type"], "select");
    }

    #[test]
    fn test_keys() {
        assert_eq!(view_settings_key(ContentKind::Post), "postViewSettings");
        assert_eq!(view_settings_key(ContentKind::Page), "pageViewSettings");
        assert_eq!(default_core_data()["editor"], "tinymce");
    }
}
