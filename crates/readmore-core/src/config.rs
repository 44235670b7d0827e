//! Configuration for readmore
//!
//! Loaded from `<config_dir>/readmore/config.toml` when present:
//!
//! ```toml
//! [api]
//! base_url = "http://127.0.0.1:8000"
//! search_limit = 20
//! timeout_secs = 15
//!
//! [storage]
//! layout = "snapshot"   # or "keyed"
//! data_dir = "/home/me/.local/share/readmore"
//!
//! [view]
//! recommend_page_size = 8
//! ```
//!
//! Every section and field is optional. `READMORE_API` overrides the base URL.

use crate::client::{DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};
use crate::store::{DirectoryBackend, KeyedStore, SnapshotStore, StateStore};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding `api.base_url`
pub const API_ENV_VAR: &str = "READMORE_API";

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("TOML parse error: {0}")]
    Parse(String),

    #[error("Value out of range: {0}")]
    OutOfRange(String),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReadMoreConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub view: ViewConfig,
}

/// Backend settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Results per search (1..=50)
    pub search_limit: u32,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            timeout_secs: 30,
            user_agent: format!("readmore/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// How the state is laid out on disk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageLayout {
    /// One atomically replaced `state.json`
    #[default]
    Snapshot,
    /// One `readmore_*.json` file per field
    Keyed,
}

/// Where and how state is persisted
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    pub layout: StorageLayout,
    /// Defaults to `<data_dir>/readmore`
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Data directory, falling back to `./.readmore` when the platform has none
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("readmore"))
                .unwrap_or_else(|| PathBuf::from(".readmore"))
        })
    }

    /// Open the configured store
    pub fn open_store(&self) -> Box<dyn StateStore> {
        let dir = self.resolved_data_dir();
        match self.layout {
            StorageLayout::Snapshot => Box::new(SnapshotStore::new(dir.join("state.json"))),
            StorageLayout::Keyed => Box::new(KeyedStore::new(DirectoryBackend::new(dir))),
        }
    }
}

/// Presentation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    pub recommend_page_size: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            recommend_page_size: crate::views::RECOMMEND_PAGE_SIZE,
        }
    }
}

impl ReadMoreConfig {
    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Default location of the config file
    pub fn standard_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("readmore").join("config.toml"))
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Load from `path` or the standard location, apply the environment
    /// override and validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path.map(Path::to_path_buf).or_else(Self::standard_path) {
            Some(p) => Self::load_from(&p)?,
            None => Self::default(),
        };
        if let Ok(base_url) = std::env::var(API_ENV_VAR) {
            config.api.base_url = base_url;
        }
        config.validate()?;
        Ok(config)
    }

    /// Replace `api.search_limit` (from a command-line flag) and revalidate
    pub fn override_search_limit(&mut self, limit: u32) -> Result<(), ConfigError> {
        self.api.search_limit = limit;
        self.validate()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_ok = url::Url::parse(&self.api.base_url)
            .map(|u| matches!(u.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !base_ok {
            return Err(ConfigError::OutOfRange(format!(
                "api.base_url must be an http(s) URL, got {:?}",
                self.api.base_url
            )));
        }

        if self.api.search_limit == 0 || self.api.search_limit > MAX_SEARCH_LIMIT {
            return Err(ConfigError::OutOfRange(format!(
                "api.search_limit must be between 1 and {}",
                MAX_SEARCH_LIMIT
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::OutOfRange(
                "api.timeout_secs must be positive".to_string(),
            ));
        }

        if self.view.recommend_page_size == 0 {
            return Err(ConfigError::OutOfRange(
                "view.recommend_page_size must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
