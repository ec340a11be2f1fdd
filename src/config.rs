use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{FpError, Result};
use crate::extract::{DEFAULT_FEATURE_SELECTOR, DEFAULT_WAIT_TIMEOUT};

/// Tool defaults, optionally overridden by a TOML config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// CSS selector for the rendered feature list.
    pub selector: String,
    /// Report output path.
    pub output: PathBuf,
    pub webdriver: WebdriverEndpoints,
    pub timeouts: Timeouts,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WebdriverEndpoints {
    /// Endpoint for chrome/chromium/brave (chromedriver).
    pub chromium: String,
    /// Endpoint for firefox (geckodriver).
    pub gecko: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Timeouts {
    /// Bound on the feature-list readiness wait.
    #[serde(with = "humantime_serde")]
    pub wait: Duration,
    /// Fixed delay after navigation before scraping, for pages that compute
    /// slow signals.
    #[serde(with = "humantime_serde")]
    pub settle: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            selector: DEFAULT_FEATURE_SELECTOR.to_string(),
            output: PathBuf::from("output.json"),
            webdriver: WebdriverEndpoints::default(),
            timeouts: Timeouts::default(),
        }
    }
}

impl Default for WebdriverEndpoints {
    fn default() -> Self {
        Self {
            chromium: "http://localhost:9515".to_string(),
            gecko: "http://localhost:4444".to_string(),
        }
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            wait: DEFAULT_WAIT_TIMEOUT,
            settle: Duration::ZERO,
        }
    }
}

impl Config {
    /// Load from `path` when given, otherwise return defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let raw = fs::read_to_string(path).map_err(|e| {
                    FpError::Config(format!("Failed to read config {}: {}", path.display(), e))
                })?;
                toml::from_str(&raw).map_err(|e| {
                    FpError::Config(format!("Invalid config {}: {}", path.display(), e))
                })
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.selector.trim().is_empty() {
            return Err(FpError::config("Feature selector must not be empty"));
        }
        if self.output.as_os_str().is_empty() {
            return Err(FpError::config("Output path must not be empty"));
        }
        Ok(())
    }
}
