use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::matching::MatchConfig;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";
pub const DEFAULT_TIMEOUT: &str = "60s";
pub const DEFAULT_MOCK_DELAY: &str = "2s";

/// Client configuration.
///
/// Example YAML:
/// ```yaml
/// backend_url: "http://localhost:8001"
/// source: live
/// timeout: "60s"
/// catalog: ~/internships.json
/// matching:
///   limit: 5
/// mock:
///   delay: "2s"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Where analyses come from (default: live)
    #[serde(default)]
    pub source: SourceMode,

    /// Time budget for one analysis request, humantime format (default: "60s")
    #[serde(default = "default_timeout")]
    pub timeout: String,

    /// Optional JSON catalog replacing the built-in postings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    #[serde(default)]
    pub matching: MatchConfig,

    #[serde(default)]
    pub mock: MockConfig,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    #[default]
    Live,
    Mock,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MockConfig {
    /// Simulated analysis time, humantime format (default: "2s")
    #[serde(default = "default_mock_delay")]
    pub delay: String,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_timeout() -> String {
    DEFAULT_TIMEOUT.to_string()
}

fn default_mock_delay() -> String {
    DEFAULT_MOCK_DELAY.to_string()
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            delay: default_mock_delay(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            source: SourceMode::default(),
            timeout: default_timeout(),
            catalog: None,
            matching: MatchConfig::default(),
            mock: MockConfig::default(),
        }
    }
}

impl Config {
    pub fn timeout_duration(&self) -> Result<Duration> {
        humantime::parse_duration(self.timeout.trim())
            .with_context(|| format!("Invalid timeout '{}'", self.timeout))
    }

    pub fn mock_delay(&self) -> Result<Duration> {
        humantime::parse_duration(self.mock.delay.trim())
            .with_context(|| format!("Invalid mock delay '{}'", self.mock.delay))
    }
}
