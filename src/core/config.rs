use crate::utils::url::construct_api_url;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Base joined with `chat` / `upload` when no explicit URLs are configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000/api";

const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_STATIC_DIR: &str = "public";
const DEFAULT_UPLOADS_DIR: &str = "uploads";

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Config {
    /// Backend API base URL (e.g., "http://localhost:3000/api")
    pub backend_url: Option<String>,
    /// Full chat endpoint URL; overrides `backend_url` joining. Useful when
    /// the real backend serves `/chat` on a different host than uploads.
    pub chat_url: Option<String>,
    /// Full upload endpoint URL; overrides `backend_url` joining.
    pub upload_url: Option<String>,
    /// Simulated typing pacing between bubbles (default on)
    pub typing: Option<bool>,
    /// Typing pace override in milliseconds per character
    pub typing_ms_per_char: Option<u64>,
    /// Transcript log file enabled at startup
    pub log_file: Option<String>,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct ServerConfig {
    pub port: Option<u16>,
    pub static_dir: Option<String>,
    pub uploads_dir: Option<String>,
}

/// Errors that can occur when loading configuration from disk.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse the configuration file as valid TOML.
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "Failed to read config at {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "Failed to parse config at {}: {}", path.display(), source)
            }
        }
    }
}

impl StdError for ConfigError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

impl Config {
    pub fn load() -> Result<Config, Box<dyn StdError>> {
        Self::load_from_path(&Self::config_path())
    }

    pub fn load_from_path(config_path: &Path) -> Result<Config, Box<dyn StdError>> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
                path: config_path.to_path_buf(),
                source,
            })?;
            let config: Config =
                toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                    path: config_path.to_path_buf(),
                    source,
                })?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to_path(&self, config_path: &Path) -> Result<(), Box<dyn StdError>> {
        let parent = config_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty());

        if let Some(dir) = parent {
            fs::create_dir_all(dir)?;
        }

        let contents = toml::to_string_pretty(self)?;
        let mut temp_file = match parent {
            Some(dir) => NamedTempFile::new_in(dir)?,
            None => NamedTempFile::new()?,
        };

        temp_file.write_all(contents.as_bytes())?;
        temp_file.as_file_mut().sync_all()?;
        temp_file
            .persist(config_path)
            .map_err(|err| -> Box<dyn StdError> { Box::new(err) })?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let proj_dirs = ProjectDirs::from("dev", "fourloop", "glow-chat")
            .expect("Failed to determine config directory");
        proj_dirs.config_dir().join("config.toml")
    }

    fn base_url(&self) -> &str {
        self.backend_url.as_deref().unwrap_or(DEFAULT_BACKEND_URL)
    }

    pub fn effective_chat_url(&self) -> String {
        match &self.chat_url {
            Some(url) => url.clone(),
            None => construct_api_url(self.base_url(), "chat"),
        }
    }

    pub fn effective_upload_url(&self) -> String {
        match &self.upload_url {
            Some(url) => url.clone(),
            None => construct_api_url(self.base_url(), "upload"),
        }
    }

    pub fn typing_enabled(&self) -> bool {
        self.typing.unwrap_or(true)
    }

    pub fn server_port(&self) -> u16 {
        self.server.port.unwrap_or(DEFAULT_SERVER_PORT)
    }

    pub fn server_static_dir(&self) -> PathBuf {
        PathBuf::from(
            self.server
                .static_dir
                .as_deref()
                .unwrap_or(DEFAULT_STATIC_DIR),
        )
    }

    pub fn server_uploads_dir(&self) -> PathBuf {
        PathBuf::from(
            self.server
                .uploads_dir
                .as_deref()
                .unwrap_or(DEFAULT_UPLOADS_DIR),
        )
    }
}
