//! Publii data directory access
//!
//! [`Publii`] resolves site names to `<data-dir>/sites/<name>/input/db.sqlite`
//! and opens a fresh [`SiteStore`] for every operation. Nothing is cached
//! between calls.

use std::path::{Path, PathBuf};
use chrono::Utc;
use crate::content::{
    Author, ContentKind, ContentRecord, ContentSummary, ContentUpdate, DeletedContent, NewContent,
    SiteInfo, StatusFilter, Tag,
};
use crate::storage::SiteStore;
use crate::{Error, Result};

/// File name of a site database inside `<site>/input/`
pub const DB_FILE_NAME: &str = "db.sqlite";

/// Accessor for one Publii installation
#[derive(Debug, Clone)]
pub struct Publii {
    data_dir: PathBuf,
    default_site: Option<String>,
}

impl Publii {
    /// Create an accessor rooted at a Publii data directory (the one containing `sites/`).
    ///
    /// Fails with [`Error::Config`] if the directory does not exist.
    pub fn new(data_dir: impl Into<PathBuf>, default_site: Option<String>) -> Result<Self> {
        let data_dir = data_dir.into();
        if !data_dir.exists() {
            return Err(Error::Config(format!(
                "Publii data directory not found: {}",
                data_dir.display()
            )));
        }

        Ok(Self {
            data_dir,
            default_site: default_site.filter(|s| !s.is_empty()),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn default_site(&self) -> Option<&str> {
        self.default_site.as_deref()
    }

    pub fn sites_dir(&self) -> PathBuf {
        self.data_dir.join("sites")
    }

    /// Explicit site name, else the default
    fn site_name<'a>(&'a self, site: Option<&'a str>) -> Option<&'a str> {
        site.filter(|s| !s.is_empty()).or(self.default_site())
    }

    /// Resolve a site to its database file.
    ///
    /// [`Error::Config`] when no site is given and no default is set,
    /// [`Error::NotFound`] when the database file is missing.
    pub fn db_path(&self, site: Option<&str>) -> Result<PathBuf> {
        let name = self.site_name(site).ok_or_else(|| {
            Error::Config("No site given and no default site configured".to_string())
        })?;

        let db_path = self.sites_dir().join(name).join("input").join(DB_FILE_NAME);
        if !db_path.is_file() {
            return Err(Error::NotFound(format!("Site not found: {}", name)));
        }

        tracing::debug!("Resolved site '{}' to {}", name, db_path.display());
        Ok(db_path)
    }

    fn open(&self, site: Option<&str>) -> Result<SiteStore> {
        SiteStore::open(&self.db_path(site)?)
    }

    // ========== Sites ==========

    /// Every directory under `sites/`, sorted by name
    pub fn list_sites(&self) -> Result<Vec<SiteInfo>> {
        let sites_dir = self.sites_dir();
        if !sites_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut sites = Vec::new();
        for entry in std::fs::read_dir(&sites_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }

            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                tracing::warn!("Skipping site directory with non UTF-8 name: {}", path.display());
                continue;
            };

            sites.push(SiteInfo {
                name: name.to_string(),
                has_db: path.join("input").join(DB_FILE_NAME).is_file(),
            });
        }

        sites.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(sites)
    }

    /// Look up a single site by name, or the default site
    pub fn get_site(&self, site: Option<&str>) -> Result<Option<SiteInfo>> {
        let Some(name) = self.site_name(site) else {
            return Ok(None);
        };
        Ok(self.list_sites()?.into_iter().find(|s| s.name == name))
    }

    // ========== Posts & Pages ==========

    pub fn list_content(
        &self,
        site: Option<&str>,
        kind: ContentKind,
        filter: StatusFilter,
        limit: i64,
    ) -> Result<Vec<ContentSummary>> {
        self.open(site)?.list_content(kind, filter, limit)
    }

    pub fn get_content(&self, id: i64, site: Option<&str>, kind: ContentKind) -> Result<ContentRecord> {
        self.open(site)?
            .get_content(id, kind)?
            .ok_or_else(|| not_found(kind, id))
    }

    pub fn create_content(&self, new: &NewContent, site: Option<&str>) -> Result<ContentSummary> {
        let mut store = self.open(site)?;
        let created = store.create_content(new, now_millis())?;
        tracing::info!(
            "Created {} {} '{}' ({})",
            new.kind,
            created.id,
            created.title,
            created.status
        );
        Ok(created)
    }

    pub fn update_content(
        &self,
        id: i64,
        site: Option<&str>,
        kind: ContentKind,
        update: &ContentUpdate,
    ) -> Result<ContentRecord> {
        let store = self.open(site)?;
        let record = store
            .update_content(id, kind, update, now_millis())?
            .ok_or_else(|| not_found(kind, id))?;
        if !update.is_empty() {
            tracing::info!("Updated {} {}", kind, id);
        }
        Ok(record)
    }

    pub fn delete_content(&self, id: i64, site: Option<&str>, kind: ContentKind) -> Result<DeletedContent> {
        let mut store = self.open(site)?;
        let deleted = store
            .delete_content(id, kind)?
            .ok_or_else(|| not_found(kind, id))?;
        tracing::info!("Deleted {} {} '{}'", kind, id, deleted.title);
        Ok(deleted)
    }

    // ========== Tags & Authors ==========

    pub fn list_tags(&self, site: Option<&str>) -> Result<Vec<Tag>> {
        self.open(site)?.list_tags()
    }

    pub fn list_authors(&self, site: Option<&str>) -> Result<Vec<Author>> {
        self.open(site)?.list_authors()
    }
}

fn not_found(kind: ContentKind, id: i64) -> Error {
    Error::NotFound(format!("{} with ID {} not found", kind.label(), id))
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
