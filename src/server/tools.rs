//! Operation facade - one named tool per accessor capability
//!
//! Each tool takes a JSON argument object, delegates to [`Publii`] and returns
//! a serializable record. The only logic here is argument defaults and the
//! `get_site_info` not-found shape.

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use crate::content::{
    Author, ContentKind, ContentRecord, ContentSummary, ContentUpdate, DeletedContent, NewContent,
    SiteInfo, StatusFilter, Tag,
};
use crate::publii::Publii;
use crate::status::PublishState;
use crate::{Error, Result};

fn default_filter() -> String {
    "all".to_string()
}

fn default_limit() -> i64 {
    20
}

fn default_status() -> String {
    "draft".to_string()
}

fn default_author() -> i64 {
    1
}

#[derive(Debug, Default, Deserialize)]
pub struct SiteArgs {
    pub site: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListArgs {
    pub site: Option<String>,
    /// all, published or draft
    #[serde(default = "default_filter")]
    pub status: String,
    /// Passed to SQLite as-is; a negative value means no limit
    #[serde(default = "default_limit")]
    pub limit: i64,
}

/// Addresses one post or page; accepts `post_id` or `page_id`
#[derive(Debug, Deserialize)]
pub struct ItemArgs {
    #[serde(alias = "post_id", alias = "page_id")]
    pub id: i64,
    pub site: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateArgs {
    pub title: String,
    pub content: String,
    pub site: Option<String>,
    pub slug: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_author")]
    pub author_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateArgs {
    #[serde(alias = "post_id", alias = "page_id")]
    pub id: i64,
    pub site: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<String>,
}

/// Result of `get_site_info`: the site, or an error value instead of a failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SiteLookup {
    Found(SiteInfo),
    Missing { error: String },
}

/// Name, description and JSON schema of one tool
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// The tool surface over one Publii installation
#[derive(Clone)]
pub struct PubliiTools {
    publii: Arc<Publii>,
}

impl PubliiTools {
    pub fn new(publii: Arc<Publii>) -> Self {
        Self { publii }
    }

    // ========== Sites ==========

    pub fn list_sites(&self) -> Result<Vec<SiteInfo>> {
        self.publii.list_sites()
    }

    pub fn get_site_info(&self, args: SiteArgs) -> Result<SiteLookup> {
        let site = args.site.as_deref();
        match self.publii.get_site(site)? {
            Some(info) => Ok(SiteLookup::Found(info)),
            None => {
                let name = site
                    .filter(|s| !s.is_empty())
                    .or(self.publii.default_site())
                    .unwrap_or("<none>");
                Ok(SiteLookup::Missing { error: format!("Site not found: {}", name) })
            }
        }
    }

    // ========== Posts ==========

    pub fn list_posts(&self, args: ListArgs) -> Result<Vec<ContentSummary>> {
        self.list(ContentKind::Post, args)
    }

    pub fn get_post(&self, args: ItemArgs) -> Result<ContentRecord> {
        self.publii.get_content(args.id, args.site.as_deref(), ContentKind::Post)
    }

    pub fn create_post(&self, args: CreateArgs) -> Result<ContentSummary> {
        self.create(ContentKind::Post, args)
    }

    pub fn update_post(&self, args: UpdateArgs) -> Result<ContentRecord> {
        self.update(ContentKind::Post, args)
    }

    pub fn delete_post(&self, args: ItemArgs) -> Result<DeletedContent> {
        self.publii.delete_content(args.id, args.site.as_deref(), ContentKind::Post)
    }

    // ========== Pages ==========

    pub fn list_pages(&self, args: ListArgs) -> Result<Vec<ContentSummary>> {
        self.list(ContentKind::Page, args)
    }

    pub fn get_page(&self, args: ItemArgs) -> Result<ContentRecord> {
        self.publii.get_content(args.id, args.site.as_deref(), ContentKind::Page)
    }

    pub fn create_page(&self, args: CreateArgs) -> Result<ContentSummary> {
        self.create(ContentKind::Page, args)
    }

    pub fn update_page(&self, args: UpdateArgs) -> Result<ContentRecord> {
        self.update(ContentKind::Page, args)
    }

    pub fn delete_page(&self, args: ItemArgs) -> Result<DeletedContent> {
        self.publii.delete_content(args.id, args.site.as_deref(), ContentKind::Page)
    }

    // ========== Tags & Authors ==========

    pub fn list_tags(&self, args: SiteArgs) -> Result<Vec<Tag>> {
        self.publii.list_tags(args.site.as_deref())
    }

    pub fn list_authors(&self, args: SiteArgs) -> Result<Vec<Author>> {
        self.publii.list_authors(args.site.as_deref())
    }

    fn list(&self, kind: ContentKind, args: ListArgs) -> Result<Vec<ContentSummary>> {
        let filter: StatusFilter = args.status.parse()?;
        self.publii.list_content(args.site.as_deref(), kind, filter, args.limit)
    }

    fn create(&self, kind: ContentKind, args: CreateArgs) -> Result<ContentSummary> {
        let status: PublishState = args.status.parse()?;
        let mut new = NewContent::new(kind, args.title, args.content)
            .with_status(status)
            .with_author(args.author_id);
        new.slug = args.slug;
        self.publii.create_content(&new, args.site.as_deref())
    }

    fn update(&self, kind: ContentKind, args: UpdateArgs) -> Result<ContentRecord> {
        let update = ContentUpdate {
            title: args.title,
            content: args.content,
            status: args.status.as_deref().map(str::parse::<PublishState>).transpose()?,
        };
        self.publii.update_content(args.id, args.site.as_deref(), kind, &update)
    }

    // ========== Dispatch ==========

    /// Invoke a tool by name with a JSON argument object
    pub fn call(&self, name: &str, arguments: Value) -> Result<Value> {
        tracing::debug!("Calling tool {}", name);
        let value = match name {
            "list_sites" => serde_json::to_value(self.list_sites()?)?,
            "get_site_info" => serde_json::to_value(self.get_site_info(parse_args(arguments)?)?)?,
            "list_posts" => serde_json::to_value(self.list_posts(parse_args(arguments)?)?)?,
            "get_post" => serde_json::to_value(self.get_post(parse_args(arguments)?)?)?,
            "create_post" => serde_json::to_value(self.create_post(parse_args(arguments)?)?)?,
            "update_post" => serde_json::to_value(self.update_post(parse_args(arguments)?)?)?,
            "delete_post" => serde_json::to_value(self.delete_post(parse_args(arguments)?)?)?,
            "list_pages" => serde_json::to_value(self.list_pages(parse_args(arguments)?)?)?,
            "get_page" => serde_json::to_value(self.get_page(parse_args(arguments)?)?)?,
            "create_page" => serde_json::to_value(self.create_page(parse_args(arguments)?)?)?,
            "update_page" => serde_json::to_value(self.update_page(parse_args(arguments)?)?)?,
            "delete_page" => serde_json::to_value(self.delete_page(parse_args(arguments)?)?)?,
            "list_tags" => serde_json::to_value(self.list_tags(parse_args(arguments)?)?)?,
            "list_authors" => serde_json::to_value(self.list_authors(parse_args(arguments)?)?)?,
            other => return Err(Error::UnknownTool(other.to_string())),
        };
        Ok(value)
    }

    /// Definitions of every tool [`PubliiTools::call`] accepts
    pub fn definitions() -> Vec<ToolDefinition> {
        vec![
            ToolDefinition {
                name: "list_sites",
                description: "List all available Publii sites",
                input_schema: object_schema(json!({}), &[]),
            },
            ToolDefinition {
                name: "get_site_info",
                description: "Show details of a site",
                input_schema: object_schema(json!({ "site": site_property() }), &[]),
            },
            ToolDefinition {
                name: "list_posts",
                description: "List blog posts of a site, newest first",
                input_schema: list_schema(),
            },
            ToolDefinition {
                name: "get_post",
                description: "Get a blog post with all details",
                input_schema: item_schema("post_id"),
            },
            ToolDefinition {
                name: "create_post",
                description: "Create a new blog post",
                input_schema: create_schema(),
            },
            ToolDefinition {
                name: "update_post",
                description: "Update title, content or status of a blog post",
                input_schema: update_schema("post_id"),
            },
            ToolDefinition {
                name: "delete_post",
                description: "Delete a blog post",
                input_schema: item_schema("post_id"),
            },
            ToolDefinition {
                name: "list_pages",
                description: "List static pages of a site, newest first",
                input_schema: list_schema(),
            },
            ToolDefinition {
                name: "get_page",
                description: "Get a static page with all details",
                input_schema: item_schema("page_id"),
            },
            ToolDefinition {
                name: "create_page",
                description: "Create a new static page",
                input_schema: create_schema(),
            },
            ToolDefinition {
                name: "update_page",
                description: "Update title, content or status of a static page",
                input_schema: update_schema("page_id"),
            },
            ToolDefinition {
                name: "delete_page",
                description: "Delete a static page",
                input_schema: item_schema("page_id"),
            },
            ToolDefinition {
                name: "list_tags",
                description: "List all tags of a site",
                input_schema: object_schema(json!({ "site": site_property() }), &[]),
            },
            ToolDefinition {
                name: "list_authors",
                description: "List all authors of a site",
                input_schema: object_schema(json!({ "site": site_property() }), &[]),
            },
        ]
    }
}

fn parse_args<T: for<'de> Deserialize<'de>>(arguments: Value) -> Result<T> {
    let arguments = if arguments.is_null() { json!({}) } else { arguments };
    serde_json::from_value(arguments)
        .map_err(|e| Error::Validation(format!("Invalid arguments: {}", e)))
}

fn object_schema(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

fn site_property() -> Value {
    json!({ "type": "string", "description": "Site name (uses the default site when empty)" })
}

fn list_schema() -> Value {
    object_schema(
        json!({
            "site": site_property(),
            "status": {
                "type": "string",
                "enum": ["all", "published", "draft"],
                "default": "all"
            },
            "limit": { "type": "integer", "default": 20 }
        }),
        &[],
    )
}

fn item_schema(id_field: &str) -> Value {
    let mut properties = json!({ "site": site_property() });
    properties[id_field] = json!({ "type": "integer" });
    object_schema(properties, &[id_field])
}

fn create_schema() -> Value {
    object_schema(
        json!({
            "title": { "type": "string" },
            "content": { "type": "string", "description": "HTML content" },
            "site": site_property(),
            "slug": { "type": "string", "description": "URL slug (generated from the title when empty)" },
            "status": { "type": "string", "enum": ["draft", "published"], "default": "draft" },
            "author_id": { "type": "integer", "default": 1 }
        }),
        &["title", "content"],
    )
}

fn update_schema(id_field: &str) -> Value {
    let mut properties = json!({
        "site": site_property(),
        "title": { "type": "string" },
        "content": { "type": "string" },
        "status": { "type": "string", "enum": ["draft", "published"] }
    });
    properties[id_field] = json!({ "type": "integer" });
    object_schema(properties, &[id_field])
}
