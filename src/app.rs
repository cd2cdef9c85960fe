use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use directories::ProjectDirs;
use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::api::ContactStore;
use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::detail::ContactDetail;
use crate::directory::Directory;
use crate::editor::ContactEditor;
use crate::navigation::LoadError;
use crate::utils::{DEFAULT_BASE_URL, normalize_url};

pub const BASE_URL_ENV: &str = "CONTACTS_API_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid base URL {url:?}: {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("cannot build HTTP client: {0}")]
    Client(#[from] ApiError),
}

/// Where the backend lives. Read once at startup; nothing is written back.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        let proj = ProjectDirs::from("com", "example", "contacts-client")?;
        Some(proj.config_dir().join("config.toml"))
    }

    /// Defaults, then the config file if there is one, then `CONTACTS_API_URL`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::config_path().as_deref(), env::var(BASE_URL_ENV).ok())
    }

    /// `load` with the file location and env value supplied by the caller.
    /// A missing file falls back to defaults.
    pub fn load_from(path: Option<&Path>, env_url: Option<String>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(path)?,
            _ => Self::default(),
        };
        config.override_base_url(env_url);
        debug!("using contacts backend at {}", config.base_url);
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Blank values are ignored.
    pub fn override_base_url(&mut self, value: Option<String>) {
        if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
            self.base_url = url;
        }
    }

    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let normalized = normalize_url(&self.base_url);
        Url::parse(&normalized).map_err(|source| ConfigError::Url {
            url: normalized,
            source,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Owns the one store adapter and hands it to each view.
#[derive(Clone)]
pub struct App {
    store: Arc<dyn ContactStore>,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self, ConfigError> {
        let base_url = config.base_url()?;
        info!("contacts backend: {base_url}");
        let client = ApiClient::with_timeout(base_url, config.request_timeout())?;
        Ok(Self::with_store(Arc::new(client)))
    }

    pub fn with_store(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> Arc<dyn ContactStore> {
        Arc::clone(&self.store)
    }

    pub fn directory(&self) -> Directory {
        Directory::new(self.store())
    }

    pub fn new_contact(&self) -> ContactEditor {
        ContactEditor::create(self.store())
    }

    pub async fn open_contact(&self, id: &str) -> Result<ContactDetail, LoadError> {
        ContactDetail::open(self.store(), id).await
    }

    pub async fn edit_contact(&self, id: &str) -> Result<ContactEditor, LoadError> {
        ContactEditor::edit(self.store(), id).await
    }
}
