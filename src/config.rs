//! Configuration loading and management.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Prefix prepended to every command name unless the entry overrides it.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Case sensitivity for entries that don't set their own.
    #[serde(default)]
    pub case_sensitive: bool,
    /// Whether [`Dispatcher::handle_privmsg`](crate::Dispatcher::handle_privmsg)
    /// acts on incoming messages.
    #[serde(default = "default_true")]
    pub default_listeners: bool,
    /// Characters that mark a target as a channel (ISUPPORT CHANTYPES).
    #[serde(default = "default_chantypes")]
    pub chantypes: String,
    /// Command manifest configuration.
    #[serde(default)]
    pub commands: CommandsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            case_sensitive: false,
            default_listeners: true,
            chantypes: default_chantypes(),
            commands: CommandsConfig::default(),
        }
    }
}

/// Where command manifests live.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandsConfig {
    /// Directory walked by the manifest loader. `None` registers built-ins only.
    pub dir: Option<PathBuf>,
}

fn default_prefix() -> String {
    "!".to_string()
}

fn default_chantypes() -> String {
    "#".to_string()
}

fn default_true() -> bool {
    true
}
