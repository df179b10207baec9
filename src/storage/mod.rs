//! Storage Layer - access to one Publii site database
//!
//! Publii's SQLite schema with the tables this crate touches:
//! - posts(id, title, authors, slug, text, featured_image_id, created_at, modified_at, status, template)
//! - posts_additional_data(post_id, key, value)
//! - posts_images(post_id, ...), posts_tags(tag_id, post_id)
//! - tags(id, name, slug, ...), authors(id, name, username, ...)

pub mod metadata;
pub mod schema;
pub mod sqlite;

pub use sqlite::SiteStore;
