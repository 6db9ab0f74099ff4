//! Optional reporting of share actions

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// A share action as reported to analytics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareEvent {
    pub event: &'static str,
    pub method: String,
    pub content_type: &'static str,
    pub content_id: String,
}

impl ShareEvent {
    pub fn article(method: impl Into<String>, content_id: impl Into<String>) -> Self {
        Self {
            event: "share",
            method: method.into(),
            content_type: "article",
            content_id: content_id.into(),
        }
    }
}

/// Receives share events
#[cfg_attr(test, mockall::automock)]
pub trait AnalyticsSink {
    fn record(&mut self, event: &ShareEvent) -> Result<()>;
}

/// Appends one JSON object per line to a file
pub struct JsonLinesSink {
    path: PathBuf,
}

impl JsonLinesSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AnalyticsSink for JsonLinesSink {
    fn record(&mut self, event: &ShareEvent) -> Result<()> {
        let mut line = serde_json::to_string(event)?;
        line.push('\n');
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}
