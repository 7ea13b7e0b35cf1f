//
//  teamcity-cli
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! This module manages the connection settings of the `tc` tool. Settings
//! live in a TOML file in the platform configuration directory and can be
//! overridden per invocation through command-line flags or environment
//! variables (`TEAMCITY_HOST`, `TEAMCITY_TOKEN`, `TEAMCITY_USERNAME`,
//! `TEAMCITY_PASSWORD`).
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/tc/config.toml`
//! - **macOS**: `~/Library/Application Support/tc/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\tc\config\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [server]
//! host = "teamcity.example.com"
//! port = 8111
//! use_ssl = false
//! api_version = "latest"
//! cache = true
//! timeout_secs = 30
//!
//! [server.auth]
//! token = "eyJ0eXAiOiAiVENWMiJ9..."
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use teamcity_cli::config::Config;
//!
//! let mut config = Config::load()?;
//! config.set("api_version", "2018.1")?;
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Submodules
//!
//! - [`file`]: Low-level configuration file I/O operations
//! - [`hosts`]: Server address parsing and display

mod file;
mod hosts;

pub use file::*;
pub use hosts::*;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::auth::Credential;

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &[
    "host",
    "port",
    "use_ssl",
    "api_version",
    "user_agent",
    "cache",
    "timeout_secs",
    "auth.username",
    "auth.password",
    "auth.token",
    "auth.guest",
];

/// Root of the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
}

/// Connection settings for a TeamCity server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host name, optionally with port and context path.
    #[serde(default)]
    pub host: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(default = "default_use_ssl")]
    pub use_ssl: bool,

    /// REST API version segment, e.g. `2018.1` or `latest`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Cache GET responses for the lifetime of the client.
    #[serde(default)]
    pub cache: bool,

    /// Per-request timeout of the HTTP transport.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub auth: AuthConfig,
}

fn default_use_ssl() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: None,
            use_ssl: default_use_ssl(),
            api_version: None,
            user_agent: None,
            cache: false,
            timeout_secs: None,
            auth: AuthConfig::default(),
        }
    }
}

/// Stored credentials.
#[derive(Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AuthConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default)]
    pub guest: bool,
}

impl AuthConfig {
    /// The credential these settings describe.
    ///
    /// A token wins over username and password, which win over guest
    /// access.
    pub fn credential(&self) -> Credential {
        if let Some(token) = self.token.as_deref().filter(|t| !t.is_empty()) {
            return Credential::bearer(token);
        }
        if let Some(username) = self.username.as_deref().filter(|u| !u.is_empty()) {
            return Credential::basic(username, self.password.clone().unwrap_or_default());
        }
        if self.guest {
            return Credential::Guest;
        }
        Credential::None
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("token", &self.token.as_deref().map(crate::auth::mask_token))
            .field("guest", &self.guest)
            .finish()
    }
}

impl Config {
    /// Loads the configuration from the default location, or defaults if
    /// the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            return Ok(Self::default());
        }
        let content = read_config_file(path)?;
        toml::from_str(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        write_config_file(path, &content)
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Reads a setting. Secrets are returned as stored.
    pub fn get(&self, key: &str) -> Option<String> {
        let server = &self.server;
        match key {
            "host" => Some(server.host.clone()).filter(|h| !h.is_empty()),
            "port" => server.port.map(|p| p.to_string()),
            "use_ssl" => Some(server.use_ssl.to_string()),
            "api_version" => server.api_version.clone(),
            "user_agent" => server.user_agent.clone(),
            "cache" => Some(server.cache.to_string()),
            "timeout_secs" => server.timeout_secs.map(|t| t.to_string()),
            "auth.username" => server.auth.username.clone(),
            "auth.password" => server.auth.password.clone(),
            "auth.token" => server.auth.token.clone(),
            "auth.guest" => Some(server.auth.guest.to_string()),
            _ => None,
        }
    }

    /// Updates a setting from its textual form.
    ///
    /// # Returns
    ///
    /// `Ok(false)` for an unknown key.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not parse for the key's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<bool> {
        let server = &mut self.server;
        match key {
            "host" => apply_host(server, value),
            "port" => server.port = Some(parse_value(key, value)?),
            "use_ssl" => server.use_ssl = parse_value(key, value)?,
            "api_version" => server.api_version = non_empty(value),
            "user_agent" => server.user_agent = non_empty(value),
            "cache" => server.cache = parse_value(key, value)?,
            "timeout_secs" => server.timeout_secs = Some(parse_value(key, value)?),
            "auth.username" => server.auth.username = non_empty(value),
            "auth.password" => server.auth.password = non_empty(value),
            "auth.token" => server.auth.token = non_empty(value),
            "auth.guest" => server.auth.guest = parse_value(key, value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid value '{value}' for '{key}'"))
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.server.use_ssl);
        assert!(!config.server.cache);
        assert_eq!(config.server.auth.credential(), Credential::None);
    }

    #[test]
    fn test_parse_toml() {
        let content = r#"
            [server]
            host = "ci.example.com"
            port = 8111
            use_ssl = false
            api_version = "latest"

            [server.auth]
            username = "admin"
            password = "secret"
        "#;
        let config: Config = toml::from_str(content).unwrap();
        assert_eq!(config.server.port, Some(8111));
        assert!(!config.server.use_ssl);
        assert_eq!(
            config.server.auth.credential(),
            Credential::basic("admin", "secret")
        );
    }

    #[test]
    fn test_token_wins_over_basic() {
        let auth = AuthConfig {
            username: Some("admin".to_string()),
            password: Some("secret".to_string()),
            token: Some("tok".to_string()),
            guest: true,
        };
        assert_eq!(auth.credential(), Credential::bearer("tok"));
    }

    #[test]
    fn test_get_and_set() {
        let mut config = Config::default();
        assert!(config.set("port", "8111").unwrap());
        assert!(config.set("cache", "true").unwrap());
        assert!(config.set("auth.guest", "true").unwrap());
        assert!(!config.set("editor", "vim").unwrap());

        assert_eq!(config.get("port").as_deref(), Some("8111"));
        assert_eq!(config.get("cache").as_deref(), Some("true"));
        assert_eq!(config.server.auth.credential(), Credential::Guest);
        assert!(config.get("host").is_none());
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("port", "eighty").is_err());
        assert!(config.set("use_ssl", "maybe").is_err());
    }

    #[test]
    fn test_set_host_with_scheme() {
        let mut config = Config::default();
        config.set("host", "http://CI.example.com:8111/").unwrap();
        assert_eq!(config.server.host, "ci.example.com:8111");
        assert!(!config.server.use_ssl);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("host", "ci.example.com").unwrap();
        config.set("auth.token", "tok").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let auth = AuthConfig {
            password: Some("hunter2".to_string()),
            token: Some("abcdefghijkl".to_string()),
            ..Default::default()
        };
        let debug = format!("{auth:?}");
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("abcdefghijkl"));
    }
}
