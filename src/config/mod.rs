//
//  bitly-cli
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Optional preferences for the `bitly` command, stored as TOML in a
//! platform-specific directory. The access token is not part of
//! this file; it lives in `~/.bitly` or the environment (see [`crate::auth`]).
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/bitly/config.toml`
//! - **macOS**: `~/Library/Application Support/bitly/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\bitly\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [core]
//! group_guid = "Ba1bc23dE4F"
//! domain = "bit.ly"
//! timeout = 30
//! short_domains = ["bit.ly", "go.acme.co"]
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bitly_cli::config::Config;
//!
//! let mut config = Config::load()?;
//! config.set("domain", "bit.ly")?;
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod file;

pub use file::*;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::bitlink::DEFAULT_SHORT_DOMAIN;
use crate::api::{ClientOptions, DEFAULT_TIMEOUT};

/// Keys accepted by [`Config::get`], [`Config::set`] and [`Config::unset`].
pub const VALID_CORE_KEYS: &[&str] = &["group_guid", "domain", "timeout", "short_domains"];

/// Global configuration container for the Bitly CLI.
///
/// ```rust
/// use bitly_cli::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.core.timeout, 30);
/// assert_eq!(config.core.short_domains, vec!["bit.ly".to_string()]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Core CLI configuration options.
    #[serde(default)]
    pub core: CoreConfig,
}

/// Core configuration options.
///
/// | Field | Default |
/// |-------|---------|
/// | `group_guid` | `None` (account default group) |
/// | `domain` | `None` (account default domain) |
/// | `timeout` | `30` seconds |
/// | `short_domains` | `["bit.ly"]` |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Group GUID new bitlinks are created in.
    #[serde(default)]
    pub group_guid: Option<String>,

    /// Short domain new bitlinks are issued on.
    #[serde(default)]
    pub domain: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Domains whose links are expanded rather than shortened.
    #[serde(default = "default_short_domains")]
    pub short_domains: Vec<String>,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_short_domains() -> Vec<String> {
    vec![DEFAULT_SHORT_DOMAIN.to_string()]
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            group_guid: None,
            domain: None,
            timeout: default_timeout(),
            short_domains: default_short_domains(),
        }
    }
}

impl Config {
    /// Loads configuration from the default location.
    ///
    /// A missing file is not an error; defaults are used.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads configuration from `path`, or defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not
    /// valid TOML for this schema.
    pub fn load_from(path: &Path) -> Result<Self> {
        if config_exists(path) {
            let content = read_config_file(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    /// Returns the path to the configuration file.
    ///
    /// The file may not exist; this only returns where it would be.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Gets a core configuration value by key.
    ///
    /// ```rust
    /// use bitly_cli::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.get("timeout"), Some("30".to_string()));
    /// assert_eq!(config.get("domain"), None);
    /// assert_eq!(config.get("unknown_key"), None);
    /// ```
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "group_guid" => self.core.group_guid.clone(),
            "domain" => self.core.domain.clone(),
            "timeout" => Some(self.core.timeout.to_string()),
            "short_domains" => Some(self.core.short_domains.join(",")),
            _ => None,
        }
    }

    /// Sets a core configuration value by key.
    ///
    /// `short_domains` takes a comma-separated list. Changes are only
    /// persisted when [`Config::save`] is called.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys, a non-numeric or zero `timeout`,
    /// and an empty `short_domains` list.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "group_guid" => self.core.group_guid = Some(value.to_string()),
            "domain" => self.core.domain = Some(value.to_string()),
            "timeout" => {
                let secs: u64 = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid value for timeout: '{}'", value))?;
                if secs == 0 {
                    bail!("Invalid value for timeout: must be at least 1 second");
                }
                self.core.timeout = secs;
            }
            "short_domains" => {
                let domains: Vec<String> = value
                    .split(',')
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .map(str::to_string)
                    .collect();
                if domains.is_empty() {
                    bail!("Invalid value for short_domains: at least one domain is required");
                }
                self.core.short_domains = domains;
            }
            _ => bail!(
                "Unknown configuration key '{}'. Valid keys: {}",
                key,
                VALID_CORE_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Resets a core configuration value to its default.
    pub fn unset(&mut self, key: &str) -> Result<()> {
        match key {
            "group_guid" => self.core.group_guid = None,
            "domain" => self.core.domain = None,
            "timeout" => self.core.timeout = default_timeout(),
            "short_domains" => self.core.short_domains = default_short_domains(),
            _ => bail!(
                "Unknown configuration key '{}'. Valid keys: {}",
                key,
                VALID_CORE_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Client options derived from this configuration.
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            timeout: std::time::Duration::from_secs(self.core.timeout),
            group_guid: self.core.group_guid.clone(),
            domain: self.core.domain.clone(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut config = Config::default();
        config.set("domain", "go.acme.co").unwrap();
        config.set("short_domains", "bit.ly, go.acme.co ,").unwrap();
        config.set("timeout", "5").unwrap();

        assert_eq!(config.get("domain"), Some("go.acme.co".to_string()));
        assert_eq!(config.get("short_domains"), Some("bit.ly,go.acme.co".to_string()));
        assert_eq!(config.core.timeout, 5);
    }

    #[test]
    fn test_set_rejects_invalid_values() {
        let mut config = Config::default();
        assert!(config.set("timeout", "soon").is_err());
        assert!(config.set("timeout", "0").is_err());
        assert!(config.set("short_domains", " , ").is_err());
        assert!(config.set("editor", "vim").is_err());
        assert_eq!(config.core.timeout, 30);
    }

    #[test]
    fn test_unset_restores_defaults() {
        let mut config = Config::default();
        config.set("group_guid", "Ba1bc23dE4F").unwrap();
        config.set("timeout", "90").unwrap();
        config.unset("group_guid").unwrap();
        config.unset("timeout").unwrap();
        assert_eq!(config.get("group_guid"), None);
        assert_eq!(config.core.timeout, 30);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("group_guid", "Ba1bc23dE4F").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.core.group_guid.as_deref(), Some("Ba1bc23dE4F"));
        assert_eq!(loaded.core.short_domains, vec!["bit.ly".to_string()]);
    }

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        write_config_file(&path, "[core]\ndomain = \"bit.ly\"\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.core.domain.as_deref(), Some("bit.ly"));
        assert_eq!(loaded.core.timeout, 30);
    }

    #[test]
    fn test_client_options() {
        let mut config = Config::default();
        config.set("timeout", "7").unwrap();
        config.set("domain", "bit.ly").unwrap();
        let options = config.client_options();
        assert_eq!(options.timeout.as_secs(), 7);
        assert_eq!(options.domain.as_deref(), Some("bit.ly"));
        assert!(options.group_guid.is_none());
    }
}
