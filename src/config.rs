//! Configuration handling for the TUI

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Site used when nothing else is configured
pub const DEFAULT_SITE_URL: &str = "http://localhost:8080";
/// Screen size assumed for centring share popups
pub const DEFAULT_SCREEN_SIZE: (u32, u32) = (1920, 1080);

pub const SITE_URL_VAR: &str = "TECHNEWS_SITE_URL";
pub const ARTICLE_VAR: &str = "TECHNEWS_ARTICLE";

const LOG_FILE_NAME: &str = "technews-tui.log";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("br", "technews", "technews-tui")
}

/// Where the log file goes, when a data dir exists
pub fn log_file_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join(LOG_FILE_NAME))
}

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TuiConfig {
    /// Base URL of the TechNews site
    pub site_url: Option<String>,
    /// Article id or URL opened on the article view
    pub article: Option<String>,
    /// File receiving share events, one JSON object per line
    pub analytics_log: Option<PathBuf>,
    /// Screen size `[width, height]` for popup placement
    pub screen_size: Option<(u32, u32)>,
    /// Try the desktop clipboard before the terminal one
    pub prefer_system_clipboard: Option<bool>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }
}

/// Effective settings after applying environment and command line overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub site_url: Url,
    pub article: Option<String>,
    pub analytics_log: Option<PathBuf>,
    pub screen_size: (u32, u32),
    pub prefer_system_clipboard: bool,
}

impl Settings {
    /// Resolve from the process environment and first command line argument
    pub fn from_environment(config: TuiConfig) -> Result<Self> {
        Self::resolve(
            config,
            |key| std::env::var(key).ok(),
            std::env::args().nth(1),
        )
    }

    /// Command line beats environment, environment beats the config file
    pub fn resolve(
        config: TuiConfig,
        env: impl Fn(&str) -> Option<String>,
        cli_article: Option<String>,
    ) -> Result<Self> {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let site = non_empty(env(SITE_URL_VAR))
            .or(non_empty(config.site_url))
            .unwrap_or_else(|| DEFAULT_SITE_URL.to_string());
        let site_url =
            Url::parse(site.trim()).with_context(|| format!("Invalid site URL: {site}"))?;

        let article = non_empty(cli_article)
            .or(non_empty(env(ARTICLE_VAR)))
            .or(non_empty(config.article));

        Ok(Self {
            site_url,
            article,
            analytics_log: config.analytics_log,
            screen_size: config.screen_size.unwrap_or(DEFAULT_SCREEN_SIZE),
            prefer_system_clipboard: config.prefer_system_clipboard.unwrap_or(true),
        })
    }
}
