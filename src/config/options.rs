// src/config/options.rs
use std::{fs, path::{Path, PathBuf}, time::Duration};

use serde::Deserialize;

use super::consts::*;
use super::vocab::Vocabulary;
use crate::error::Result;

/// Everything a run needs. Every section falls back to its `Default`,
/// so a config file only has to name what it changes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    pub flow: FlowOptions,
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
    pub vocab: Vocabulary,
}

impl AppOptions {
    /// Read a TOML file on top of the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Where the remote flow lives and how to talk to it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FlowOptions {
    /// Submission targets are resolved against this.
    pub base_url: String,
    /// Visited best-effort to seed the session.
    pub entry_url: String,
    pub list_url: String,
    pub form_selector: String,
    pub control_selector: String,
    pub user_agent: String,
    pub max_redirects: usize,
    pub timeout_secs: u64,
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self {
            base_url: s!(BASE_URL),
            entry_url: s!(ENTRY_URL),
            list_url: s!(LIST_URL),
            form_selector: s!(FORM_SELECTOR),
            control_selector: s!(CONTROL_SELECTOR),
            user_agent: s!(USER_AGENT),
            max_redirects: MAX_REDIRECTS,
            timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }
}

impl FlowOptions {
    /// Per-request timeout; `None` when disabled with `timeout_secs = 0`.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScrapeOptions {
    /// Simultaneous conversations.
    pub workers: usize,
    /// `false` stops after the listing (summary-only output).
    pub enrich: bool,
    pub min_table_text: usize,
    pub detail: DetailLimits,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            workers: WORKERS,
            enrich: true,
            min_table_text: MIN_TABLE_TEXT,
            detail: DetailLimits::default(),
        }
    }
}

/// Text length ceilings for the detail page pass, in bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DetailLimits {
    pub skip_ceiling: usize,
    pub value_ceiling: usize,
}

impl Default for DetailLimits {
    fn default() -> Self {
        Self {
            skip_ceiling: DETAIL_SKIP_CEILING,
            value_ceiling: DETAIL_VALUE_CEILING,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// `None` writes to stdout.
    pub out: Option<PathBuf>,
    pub pretty: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { out: None, pretty: true }
    }
}
