//! Configuration management for autocomment.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::policy::Memento;

/// Global configuration stored in `~/.autocomment/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub hooks: HooksConfig,

    /// Per-policy settings keyed by policy unique id.
    #[serde(default)]
    pub policies: BTreeMap<String, PolicySettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GitConfig {
    /// Lines starting with this character are not part of the message.
    #[serde(default = "default_comment_char")]
    pub comment_char: char,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            comment_char: default_comment_char(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HooksConfig {
    /// Drop work item associations once a commit succeeds.
    #[serde(default = "default_true")]
    pub clear_after_commit: bool,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            clear_after_commit: true,
        }
    }
}

/// Host-side state of one registered policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PolicySettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Opaque settings owned by the policy, stored next to `enabled`.
    #[serde(flatten)]
    pub settings: Memento,
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            settings: Memento::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_comment_char() -> char {
    '#'
}

impl Config {
    /// Load config from ~/.autocomment/config.toml
    pub fn load() -> Result<Self, Error> {
        Self::load_from(&Self::path())
    }

    /// Load config from a file, falling back to defaults when it is missing.
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to ~/.autocomment/config.toml
    pub fn save(&self) -> Result<(), Error> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Path to global autocomment directory (~/.autocomment/)
    pub fn global_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".autocomment")
    }

    /// Path to config file
    pub fn path() -> PathBuf {
        Self::global_dir().join("config.toml")
    }
}
