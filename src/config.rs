use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Optional `publii-mcp.toml` settings; CLI flags take precedence
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PubliiConfig {
    pub data_dir: Option<PathBuf>,
    pub site: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("publii-mcp.toml")
}

/// `<Documents>/Publii`, where the Publii app keeps its data
pub fn default_data_dir() -> PathBuf {
    if let Some(docs) = directories::UserDirs::new().and_then(|dirs| dirs.document_dir().map(Path::to_path_buf)) {
        return docs.join("Publii");
    }
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join("Documents").join("Publii"))
        .unwrap_or_else(|| PathBuf::from("Publii"))
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<PubliiConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: PubliiConfig = toml::from_str(&contents)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(Some(config))
}

impl PubliiConfig {
    /// Data directory: flag, then config file, then the Publii default
    pub fn resolve_data_dir(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.data_dir.clone()).unwrap_or_else(default_data_dir)
    }

    /// Default site: flag, then config file
    pub fn resolve_site(&self, flag: Option<String>) -> Option<String> {
        flag.or_else(|| self.site.clone())
    }
}
