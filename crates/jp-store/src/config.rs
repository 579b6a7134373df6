//! Runtime configuration.
//!
//! Read from `config.toml` in the data directory unless a path is given.
//! Every field has a default, so a missing file or a partial file is fine.

use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::{Deserialize, Serialize};

use jp_core::{DEFAULT_JOURNEY_LENGTH, LayoutConfig, MILESTONE_FREQUENCY};

use crate::error::Result;

/// Default base directory for all journey storage.
pub fn default_base_dir() -> PathBuf {
    dirs_home().join(".journey-path")
}

fn dirs_home() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub journey: JourneyConfig,
    pub server: ServerConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JourneyConfig {
    /// Days in a newly started journey.
    pub length: u32,
    pub milestone_frequency: u32,
}

impl Default for JourneyConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_JOURNEY_LENGTH,
            milestone_frequency: MILESTONE_FREQUENCY,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:7878".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load `path`, or `<base_dir>/config.toml` when no path is given.
    /// An explicit path must exist; the default location may be absent.
    pub fn load(path: Option<&Path>, base_dir: &Path) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (base_dir.join("config.toml"), false),
        };

        if !required && !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }
}
