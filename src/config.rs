//! Configuration file handling for folio

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cache::paths;
use crate::error::{FolioError, Result};
use crate::github::GITHUB_API_BASE;
use crate::markdown::MarkdownMode;

pub const DEFAULT_USERNAME: &str = "octocat";
pub const DEFAULT_OUTPUT: &str = "index.html";

/// Optional settings file. Every field can also come from a flag or env var.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// GitHub user the dashboard is built for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// API base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    /// README conversion strategy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<MarkdownMode>,

    /// Where the page is written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl Config {
    /// Load from `path`, or from the default location when `path` is `None`.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match paths::config_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(&contents)
            .map_err(|e| FolioError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or(DEFAULT_USERNAME)
    }

    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(GITHUB_API_BASE)
    }

    pub fn markdown(&self) -> MarkdownMode {
        self.markdown.unwrap_or_default()
    }

    pub fn output(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }
}
