// Settings persistence. Values are stored as JSON under the user's config
// directory and re-read before every publish or pull, so edits made in the
// settings form apply to the next call without restarting.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE_URL: &str = "https://flowtwo.io";

const ENV_API_BASE_URL: &str = "FLOW2_API_BASE_URL";
const ENV_USERNAME: &str = "FLOW2_USERNAME";
const ENV_PASSWORD: &str = "FLOW2_PASSWORD";

/// Connection settings for the Flow2 admin API. Keys keep the camelCase
/// names of the settings file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub api_base_url: String,
    pub auth_username: String,
    pub auth_password: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            auth_username: String::new(),
            auth_password: String::new(),
        }
    }
}

impl Settings {
    /// Default location: `<config dir>/flow2/settings.json`, falling back to
    /// the working directory when the platform has no config dir.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("flow2")
            .join("settings.json")
    }

    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Settings::default())
            }
            Err(err) => return Err(Error::local_io("failed to read settings", path, err)),
        };
        Self::from_json(&data).map_err(|err| Error::Settings {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Load settings and then apply `FLOW2_*` environment overrides.
    pub fn resolve(path: &Path) -> Result<Self> {
        let mut settings = Self::load(path)?;
        settings.apply_overrides(|key| std::env::var(key).ok());
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| {
                Error::local_io("failed to create settings directory", parent, err)
            })?;
        }
        let data = serde_json::to_string_pretty(self).map_err(|err| Error::Settings {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        std::fs::write(path, data)
            .map_err(|err| Error::local_io("failed to write settings", path, err))
    }

    fn from_json(data: &str) -> serde_json::Result<Self> {
        if data.trim().is_empty() {
            return Ok(Settings::default());
        }
        serde_json::from_str(data)
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_BASE_URL) {
            self.api_base_url = url;
        }
        if let Some(username) = lookup(ENV_USERNAME) {
            self.auth_username = username;
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            self.auth_password = password;
        }
    }
}
