use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

// =============================================================================
// Defaults
// =============================================================================

/// Default package index (PyPI)
pub const DEFAULT_INDEX_URL: &str = "https://pypi.org";

/// Timeout for a single index lookup in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Timeout for a single download in milliseconds (5 minutes)
pub const DOWNLOAD_TIMEOUT_MS: u64 = 300_000;

/// Program used to download distributions
pub const DEFAULT_DOWNLOAD_PROGRAM: &str = "pip";

/// Number of progress markers written per console line
pub const PROGRESS_LINE_WIDTH: usize = 40;

/// Environment variable holding the tracing filter
pub const LOG_ENV_VAR: &str = "PKG_UPDATE_LOG";

const APP_DIR: &str = "pkg-update";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Package root {0:?} is not a directory")]
    RootNotADirectory(PathBuf),
}

/// Update configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateConfig {
    /// Base URL of the package index
    pub index_url: String,
    /// Only consider stable releases as update targets
    pub stable_only: bool,
    /// Index lookup timeout in milliseconds
    pub fetch_timeout_ms: u64,
    pub download: DownloadConfig,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            stable_only: true,
            fetch_timeout_ms: FETCH_TIMEOUT_MS,
            download: DownloadConfig::default(),
        }
    }
}

/// Download-related configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DownloadConfig {
    /// Program invoked to fetch a distribution
    pub program: String,
    /// Download timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_DOWNLOAD_PROGRAM.to_string(),
            timeout_ms: DOWNLOAD_TIMEOUT_MS,
        }
    }
}

impl UpdateConfig {
    /// Load the configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the explicit config file if given, else the default one if it
    /// exists, else the built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = config_path();
                if default_path.is_file() {
                    Self::from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Simple-index URL handed to the downloader
    pub fn simple_index_url(&self) -> String {
        format!("{}/simple", self.index_url.trim_end_matches('/'))
    }
}

/// Returns the path to the data directory for pkg-update.
/// Uses $XDG_DATA_HOME/pkg-update if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/pkg-update,
/// or ./pkg-update if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("pkg-update.log")
}

/// Returns the path to the default config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("config.json")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn update_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<UpdateConfig>(json!({
            "stableOnly": false
        }))
        .unwrap();

        assert!(!result.stable_only);
        assert_eq!(result.index_url, DEFAULT_INDEX_URL);
        assert_eq!(result.download, DownloadConfig::default());
    }

    #[test]
    fn update_config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<UpdateConfig>(json!({
            "indexUrl": "https://mirror.example.com",
            "stableOnly": false,
            "fetchTimeoutMs": 1000,
            "download": {
                "program": "pip3",
                "timeoutMs": 2000
            }
        }))
        .unwrap();

        assert_eq!(
            result,
            UpdateConfig {
                index_url: "https://mirror.example.com".to_string(),
                stable_only: false,
                fetch_timeout_ms: 1000,
                download: DownloadConfig {
                    program: "pip3".to_string(),
                    timeout_ms: 2000,
                },
            }
        );
    }

    #[test]
    fn from_file_reports_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = UpdateConfig::from_file(&path);

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn load_with_missing_explicit_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        let result = UpdateConfig::load(Some(&path));

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn simple_index_url_strips_trailing_slash() {
        let config = UpdateConfig {
            index_url: "https://pypi.org/".to_string(),
            ..UpdateConfig::default()
        };

        assert_eq!(config.simple_index_url(), "https://pypi.org/simple");
    }

    #[test]
    fn data_dir_with_env_uses_xdg_data_home_when_set() {
        let path = data_dir_with_env(
            Some("/tmp/test-data".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-data/pkg-update"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_home_local_share() {
        let path = data_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(path, PathBuf::from("/home/user/.local/share/pkg-update"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = data_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./pkg-update"));
    }
}
