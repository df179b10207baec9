//! Publii database schema definitions
//!
//! The schema is owned by Publii. These statements describe the columns this
//! crate depends on; they are never run against a real site database, only
//! used to build fixture databases.

/// SQL to create the posts table (posts and pages)
pub const CREATE_POSTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS posts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT,
    authors TEXT,
    slug TEXT,
    text TEXT,
    featured_image_id INTEGER,
    created_at DATETIME,
    modified_at DATETIME,
    status TEXT,
    template TEXT
)
"#;

/// SQL to create the posts_additional_data table
/// Holds JSON blobs keyed by `_core`, `postViewSettings`, `pageViewSettings`
pub const CREATE_POSTS_ADDITIONAL_DATA_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS posts_additional_data (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    post_id INTEGER,
    key TEXT,
    value TEXT
)
"#;

/// SQL to create the posts_images table
pub const CREATE_POSTS_IMAGES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS posts_images (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    post_id INTEGER,
    url TEXT,
    title TEXT,
    caption TEXT,
    additional_data TEXT
)
"#;

/// SQL to create the tags table
pub const CREATE_TAGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS tags (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    slug TEXT,
    description TEXT,
    additional_data TEXT
)
"#;

/// SQL to create the posts_tags join table
pub const CREATE_POSTS_TAGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS posts_tags (
    tag_id INTEGER NOT NULL,
    post_id INTEGER NOT NULL,
    PRIMARY KEY (tag_id, post_id)
)
"#;

/// SQL to create the authors table
pub const CREATE_AUTHORS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS authors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    username TEXT,
    password TEXT,
    config TEXT,
    additional_data TEXT
)
"#;

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![
        CREATE_POSTS_TABLE,
        CREATE_POSTS_ADDITIONAL_DATA_TABLE,
        CREATE_POSTS_IMAGES_TABLE,
        CREATE_TAGS_TABLE,
        CREATE_POSTS_TAGS_TABLE,
        CREATE_AUTHORS_TABLE,
    ]
}

/// Columns read for listings, in `row_to_summary` order
pub const SUMMARY_COLUMNS: &str = "id, title, slug, status, authors, created_at, modified_at";

/// Columns read for a full record, in `row_to_record` order
pub const RECORD_COLUMNS: &str =
    "id, title, slug, status, authors, created_at, modified_at, text, featured_image_id, template";

/// Row filter selecting pages
pub const PAGE_CLAUSE: &str = "instr(COALESCE(status, ''), 'is-page') > 0";

/// Row filter selecting posts
pub const POST_CLAUSE: &str = "instr(COALESCE(status, ''), 'is-page') = 0";
