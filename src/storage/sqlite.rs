//! SQLite storage implementation for a single Publii site

use std::path::Path;
use rusqlite::types::{Type, Value, ValueRef};
use rusqlite::{Connection, OpenFlags, OptionalExtension, Transaction, params, params_from_iter};
use chrono::{DateTime, Utc};
use crate::{Result, Error};
use crate::content::{
    Author, ContentKind, ContentRecord, ContentSummary, ContentUpdate, DeletedContent, NewContent,
    StatusFilter, Tag, timestamp_from_millis,
};
use crate::slug::generate_slug;
use crate::status::{PublishState, Status};
use super::{metadata, schema};

/// One open connection to a site's `db.sqlite`
pub struct SiteStore {
    conn: Connection,
}

impl SiteStore {
    /// Open an existing site database read-write. Never creates the file.
    pub fn open(path: &Path) -> Result<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags)?;
        Ok(Self { conn })
    }

    // ========== Content Operations ==========

    /// List posts or pages, newest first
    pub fn list_content(
        &self,
        kind: ContentKind,
        filter: StatusFilter,
        limit: i64,
    ) -> Result<Vec<ContentSummary>> {
        let mut sql = format!("SELECT {} FROM posts WHERE {}", schema::SUMMARY_COLUMNS, kind_clause(kind));
        let mut values: Vec<Value> = Vec::new();

        if let Some(status) = filter.stored_value() {
            sql.push_str(" AND status = ?");
            values.push(Value::Text(status.to_string()));
        }
        sql.push_str(" ORDER BY created_at DESC, id DESC LIMIT ?");
        values.push(Value::Integer(limit));

        let mut stmt = self.conn.prepare(&sql)?;
        let items = stmt
            .query_map(params_from_iter(values), row_to_summary)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(items)
    }

    /// Get a post or page by ID. Rows of the other kind are invisible.
    pub fn get_content(&self, id: i64, kind: ContentKind) -> Result<Option<ContentRecord>> {
        let sql = format!(
            "SELECT {} FROM posts WHERE id = ?1 AND {}",
            schema::RECORD_COLUMNS,
            kind_clause(kind)
        );
        self.conn
            .query_row(&sql, [id], row_to_record)
            .optional()
            .map_err(Into::into)
    }

    /// Insert a post or page together with its `_core` and view settings rows
    pub fn create_content(&mut self, new: &NewContent, now_millis: i64) -> Result<ContentSummary> {
        if !self.author_exists(new.author_id)? {
            return Err(Error::Validation(format!("Author with ID {} not found", new.author_id)));
        }
        if let PublishState::Other(raw) = &new.status {
            return Err(Error::Validation(format!(
                "Invalid status: '{}' (expected 'draft' or 'published')",
                raw
            )));
        }

        let status = Status::new(new.status.clone(), new.kind);
        let slug = match &new.slug {
            Some(slug) => slug.clone(),
            None => generate_slug(&new.title),
        };

        let tx = self.conn.transaction()?;
        tx.execute(
            r#"
            INSERT INTO posts (title, authors, slug, text, created_at, modified_at, status)
            VALUES (?1, ?2, ?3, ?4, ?5, ?5, ?6)
            "#,
            params![
                new.title,
                new.author_id.to_string(),
                slug,
                new.content,
                now_millis,
                status.to_stored(),
            ],
        )?;
        let id = tx.last_insert_rowid();

        insert_additional_data(&tx, id, metadata::CORE_KEY, &metadata::default_core_data())?;
        insert_additional_data(
            &tx,
            id,
            metadata::view_settings_key(new.kind),
            &metadata::default_view_settings(new.kind),
        )?;
        tx.commit()?;

        let created_at = timestamp_from_millis(now_millis);
        Ok(ContentSummary {
            id,
            title: new.title.clone(),
            slug,
            status,
            author_id: new.author_id,
            created_at,
            modified_at: created_at,
        })
    }

    /// Apply the supplied fields and bump `modified_at`.
    ///
    /// An empty update writes nothing and returns the current record.
    pub fn update_content(
        &self,
        id: i64,
        kind: ContentKind,
        update: &ContentUpdate,
        now_millis: i64,
    ) -> Result<Option<ContentRecord>> {
        let Some(current) = self.get_content(id, kind)? else {
            return Ok(None);
        };
        if update.is_empty() {
            return Ok(Some(current));
        }

        let mut assignments: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(title) = &update.title {
            assignments.push("title = ?");
            values.push(Value::Text(title.clone()));
        }
        if let Some(content) = &update.content {
            assignments.push("text = ?");
            values.push(Value::Text(content.clone()));
        }
        if let Some(state) = &update.status {
            if let PublishState::Other(raw) = state {
                return Err(Error::Validation(format!(
                    "Invalid status: '{}' (expected 'draft' or 'published')",
                    raw
                )));
            }
            let status = current.summary.status.clone().with_state(state.clone());
            assignments.push("status = ?");
            values.push(Value::Text(status.to_stored()));
        }
        assignments.push("modified_at = ?");
        values.push(Value::Integer(now_millis));
        values.push(Value::Integer(id));

        let sql = format!("UPDATE posts SET {} WHERE id = ?", assignments.join(", "));
        self.conn.execute(&sql, params_from_iter(values))?;

        self.get_content(id, kind)
    }

    /// Delete a post or page and every row that references it
    pub fn delete_content(&mut self, id: i64, kind: ContentKind) -> Result<Option<DeletedContent>> {
        let Some(existing) = self.get_content(id, kind)? else {
            return Ok(None);
        };

        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM posts_additional_data WHERE post_id = ?1", [id])?;
        tx.execute("DELETE FROM posts_images WHERE post_id = ?1", [id])?;
        tx.execute("DELETE FROM posts_tags WHERE post_id = ?1", [id])?;
        tx.execute("DELETE FROM posts WHERE id = ?1", [id])?;
        tx.commit()?;

        Ok(Some(DeletedContent {
            deleted: true,
            id,
            title: existing.summary.title,
        }))
    }

    // ========== Author & Tag Operations ==========

    pub fn author_exists(&self, id: i64) -> Result<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM authors WHERE id = ?1)",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// All authors in storage order
    pub fn list_authors(&self) -> Result<Vec<Author>> {
        let mut stmt = self.conn.prepare("SELECT id, name, username FROM authors")?;
        let authors = stmt
            .query_map([], |row| {
                Ok(Author {
                    id: row.get(0)?,
                    name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    username: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(authors)
    }

    /// All tags in storage order
    pub fn list_tags(&self) -> Result<Vec<Tag>> {
        let mut stmt = self.conn.prepare("SELECT id, name, slug FROM tags")?;
        let tags = stmt
            .query_map([], |row| {
                Ok(Tag {
                    id: row.get(0)?,
                    name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    slug: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tags)
    }
}

fn kind_clause(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Post => schema::POST_CLAUSE,
        ContentKind::Page => schema::PAGE_CLAUSE,
    }
}

fn insert_additional_data(
    tx: &Transaction<'_>,
    post_id: i64,
    key: &str,
    value: &serde_json::Value,
) -> Result<()> {
    tx.execute(
        "INSERT INTO posts_additional_data (post_id, key, value) VALUES (?1, ?2, ?3)",
        params![post_id, key, serde_json::to_string(value)?],
    )?;
    Ok(())
}

/// Helper to convert a `SUMMARY_COLUMNS` row to a ContentSummary
fn row_to_summary(row: &rusqlite::Row) -> rusqlite::Result<ContentSummary> {
    let status: Option<String> = row.get(3)?;

    Ok(ContentSummary {
        id: row.get(0)?,
        title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        slug: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        status: Status::parse_stored(status.as_deref().unwrap_or_default()),
        author_id: author_id_at(row, 4)?,
        created_at: timestamp_at(row, 5)?,
        modified_at: timestamp_at(row, 6)?,
    })
}

/// Helper to convert a `RECORD_COLUMNS` row to a ContentRecord
fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<ContentRecord> {
    Ok(ContentRecord {
        summary: row_to_summary(row)?,
        content: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
        featured_image_id: row.get(8)?,
        template: row.get(9)?,
    })
}

/// `posts.authors` holds the author ID as text, older rows as an integer
fn author_id_at(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<i64> {
    match row.get_ref(idx)? {
        ValueRef::Integer(id) => Ok(id),
        ValueRef::Text(bytes) => {
            let text = std::str::from_utf8(bytes).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })?;
            let first = text.split(',').next().unwrap_or_default().trim();
            first.parse::<i64>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })
        }
        other => Err(rusqlite::Error::InvalidColumnType(
            idx,
            "authors".to_string(),
            other.data_type(),
        )),
    }
}

/// Epoch-milliseconds column to a UTC instant; unreadable values become `None`
fn timestamp_at(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let millis = match row.get_ref(idx)? {
        ValueRef::Integer(ms) => Some(ms),
        ValueRef::Real(ms) => Some(ms as i64),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .ok()
            .and_then(|text| text.trim().parse::<i64>().ok()),
        ValueRef::Null | ValueRef::Blob(_) => None,
    };
    Ok(millis.and_then(timestamp_from_millis))
}
