use adw::Application;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const BASE_URL_ENV: &str = "FINLOG_BASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub start_route: String,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            start_route: "/".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    fn toml_path() -> Option<PathBuf> {
        let proj = ProjectDirs::from("com", "example", "finlog")?;
        Some(proj.config_dir().join("finlog.toml"))
    }

    /// Reads the user's config, writing the defaults out on first run.
    ///
    /// Problems never stop start-up: they fall back to defaults and come
    /// back as warnings, since the logger is not installed yet.
    pub fn load() -> (Self, Vec<ConfigError>) {
        let (mut config, warnings) = match Self::toml_path() {
            Some(path) => Self::load_or_init(&path),
            None => (Self::default(), Vec::new()),
        };
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            config.base_url = url;
        }
        config.base_url = crate::utils::normalize_url(&config.base_url);
        (config, warnings)
    }

    /// Reads `path`, or writes the defaults there when it does not exist.
    pub fn load_or_init(path: &Path) -> (Self, Vec<ConfigError>) {
        if path.exists() {
            match Self::load_from(path) {
                Ok(config) => (config, Vec::new()),
                Err(e) => (Self::default(), vec![e]),
            }
        } else {
            let config = Self::default();
            let warnings = config.save_to(path).err().into_iter().collect();
            (config, warnings)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let toml = toml::to_string_pretty(self)?;
        fs::write(path, toml).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

pub fn build_ui(app: &Application, config: &AppConfig) {
    crate::ui::load_css();
    crate::ui::main_window::show_main_window(app, config);
}
