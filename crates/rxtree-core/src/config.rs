//! Configuration handling for rxtree

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RxError;

/// Directory holding project-level configuration.
pub const CONFIG_DIR: &str = ".rxtree";

/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// rxtree configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// rxtree-specific settings
    #[serde(default, alias = "rxt")]
    pub rxtree: RxConfig,
}

/// Core rxtree settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RxConfig {
    /// Passes run by `transform` when none are given on the command line
    #[serde(default = "default_passes")]
    pub passes: Vec<String>,

    /// Characters removed by the strip-chars pass when `--strip` is absent
    #[serde(default)]
    pub strip: String,

    /// Flags applied to bare (non-literal) patterns
    #[serde(default)]
    pub flags: String,

    /// Emit compact single-line JSON instead of pretty-printed output
    #[serde(default)]
    pub compact: bool,
}

fn default_passes() -> Vec<String> {
    vec!["ungroup".to_string(), "dedupe-class".to_string()]
}

impl Default for RxConfig {
    fn default() -> Self {
        Self {
            passes: default_passes(),
            strip: String::new(),
            flags: String::new(),
            compact: false,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, RxError> {
        let content = fs::read_to_string(path)
            .map_err(|e| RxError::Config(format!("failed to read config file: {}", e)))?;
        toml::from_str(&content)
            .map_err(|e| RxError::Config(format!("failed to parse config file: {}", e)))
    }

    /// Load configuration from .rxtree/config.toml in the given project root
    pub fn load_from_project(project_root: &Path) -> Result<Self, RxError> {
        let config_path = Self::project_path(project_root);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Config::default())
        }
    }

    /// Path of the project config file under `project_root`.
    pub fn project_path(project_root: &Path) -> PathBuf {
        project_root.join(CONFIG_DIR).join(CONFIG_FILE)
    }
}
