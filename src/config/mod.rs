//! Persistent settings for weekly-brief.
//!
//! Settings are read from `~/.config/weekly-brief/settings.toml` at startup.
//! A missing file is treated as an empty configuration; `configure` creates it.
//! Secrets never live here, see [`crate::store`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use url::Url;

use crate::app::{BriefError, Result};
use crate::domain::SenderIdentity;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings persisted between invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rss_feed_url: Option<String>,
    pub content_url: Option<String>,
    pub campaign_endpoint_url: Option<String>,
    /// Timeout applied to every HTTP request, in seconds.
    pub request_timeout_secs: u64,
    pub sender: SenderIdentity,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rss_feed_url: None,
            content_url: None,
            campaign_endpoint_url: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            sender: SenderIdentity::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path`.
    ///
    /// A missing file yields the defaults. Missing fields in an existing file
    /// use default values; an unparsable file is an error.
    pub fn load_from(path: &Path) -> std::result::Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Like [`Settings::load_from`], but an unparsable file yields the
    /// defaults so it can be overwritten.
    pub fn load_or_default(path: &Path) -> std::result::Result<Self, ConfigError> {
        match Self::load_from(path) {
            Err(e @ ConfigError::Parse { .. }) => {
                tracing::warn!(error = %e, "Ignoring unreadable settings file");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Write settings to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> std::result::Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(content.as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Get the default settings path: `~/.config/weekly-brief/settings.toml`
    pub fn default_path() -> std::result::Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("weekly-brief").join("settings.toml"))
    }

    pub fn rss_feed(&self) -> Result<Url> {
        parse_stored_url(self.rss_feed_url.as_deref(), "rss_feed_url")
    }

    pub fn content(&self) -> Result<Url> {
        parse_stored_url(self.content_url.as_deref(), "content_url")
    }

    pub fn campaign_endpoint(&self) -> Result<Url> {
        parse_stored_url(
            self.campaign_endpoint_url.as_deref(),
            "campaign_endpoint_url",
        )
    }
}

fn parse_stored_url(value: Option<&str>, name: &'static str) -> Result<Url> {
    let value = value.ok_or(BriefError::MissingSetting(name))?;
    Ok(Url::parse(value)?)
}

/// Settings file errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write settings file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse settings file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}
