//! Throw-away Publii data directories for tests

use std::path::{Path, PathBuf};
use rusqlite::{Connection, OptionalExtension, params};
use tempfile::TempDir;
use crate::publii::Publii;
use crate::storage::{SiteStore, schema};

pub const TEST_SITE: &str = "test-site";

/// A temp data directory with `sites/test-site/input/db.sqlite` and author 1
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let fixture = Self { dir: TempDir::new().unwrap() };
        fixture.add_site(TEST_SITE);
        fixture
    }

    /// A data directory without any `sites/` folder
    pub fn empty() -> Self {
        Self { dir: TempDir::new().unwrap() }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn db_path(&self, site: &str) -> PathBuf {
        self.path().join("sites").join(site).join("input").join("db.sqlite")
    }

    /// Create a site with the Publii schema and the default admin author
    pub fn add_site(&self, name: &str) -> PathBuf {
        let db_path = self.db_path(name);
        std::fs::create_dir_all(db_path.parent().unwrap()).unwrap();

        let conn = Connection::open(&db_path).unwrap();
        for stmt in schema::all_schema_statements() {
            conn.execute(stmt, []).unwrap();
        }
        conn.execute("INSERT INTO authors (id, name, username) VALUES (1, 'Admin', 'admin')", [])
            .unwrap();
        db_path
    }

    /// Create a site directory that has no database yet
    pub fn add_site_without_db(&self, name: &str) {
        std::fs::create_dir_all(self.path().join("sites").join(name).join("input")).unwrap();
    }

    /// Accessor with `test-site` as default
    pub fn publii(&self) -> Publii {
        Publii::new(self.path(), Some(TEST_SITE.to_string())).unwrap()
    }

    pub fn store(&self) -> SiteStore {
        SiteStore::open(&self.db_path(TEST_SITE)).unwrap()
    }

    fn connection(&self) -> Connection {
        Connection::open(self.db_path(TEST_SITE)).unwrap()
    }

    pub fn execute(&self, sql: &str) {
        self.connection().execute(sql, []).unwrap();
    }

    /// Insert a bare posts row with a fixed creation time
    pub fn insert_raw(&self, title: &str, status: &str, created_at: i64) -> i64 {
        let conn = self.connection();
        conn.execute(
            "INSERT INTO posts (title, authors, slug, text, created_at, modified_at, status) \
             VALUES (?1, '1', ?2, '', ?3, ?3, ?4)",
            params![title, crate::generate_slug(title), created_at, status],
        )
        .unwrap();
        conn.last_insert_rowid()
    }

    /// Link an image and a tag to a post
    pub fn attach_image_and_tag(&self, post_id: i64) {
        let conn = self.connection();
        conn.execute(
            "INSERT INTO posts_images (post_id, url) VALUES (?1, 'cover.jpg')",
            [post_id],
        )
        .unwrap();
        conn.execute("INSERT INTO tags (name, slug) VALUES ('News', 'news')", []).unwrap();
        let tag_id = conn.last_insert_rowid();
        conn.execute(
            "INSERT INTO posts_tags (tag_id, post_id) VALUES (?1, ?2)",
            params![tag_id, post_id],
        )
        .unwrap();
    }

    /// Read one `posts_additional_data` blob as JSON
    pub fn additional_data(&self, post_id: i64, key: &str) -> Option<serde_json::Value> {
        let raw: Option<String> = self
            .connection()
            .query_row(
                "SELECT value FROM posts_additional_data WHERE post_id = ?1 AND key = ?2",
                params![post_id, key],
                |row| row.get(0),
            )
            .optional()
            .unwrap();
        raw.map(|value| serde_json::from_str(&value).unwrap())
    }

    pub fn status_column(&self, id: i64) -> Option<String> {
        self.connection()
            .query_row("SELECT status FROM posts WHERE id = ?1", [id], |row| row.get(0))
            .unwrap()
    }

    pub fn count_rows(&self, table: &str, post_id: i64) -> usize {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE post_id = ?1", table);
        let count: i64 = self.connection().query_row(&sql, [post_id], |row| row.get(0)).unwrap();
        count as usize
    }
}
