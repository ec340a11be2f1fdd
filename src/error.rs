use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::ParseError;

#[derive(Debug, Error)]
pub enum FpError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ParseError),

    #[error("WebDriver session error: {0}")]
    Session(#[from] fantoccini::error::NewSessionError),

    #[error("WebDriver command error: {0}")]
    Command(#[from] fantoccini::error::CmdError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FpError {
    pub fn config(message: impl Into<String>) -> Self {
        FpError::Config(message.into())
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            FpError::Io(e) => ErrorPayload::new(
                ErrorCategory::Io,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            FpError::Network(e) => ErrorPayload::new(
                ErrorCategory::Network,
                e.to_string(),
                "Check that the WebDriver endpoint is reachable (chromedriver --port=9515, geckodriver --port 4444).",
            ),
            FpError::InvalidUrl(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Verify the target URL format (e.g., http://localhost:80).",
            ),
            FpError::Session(e) => ErrorPayload::new(
                ErrorCategory::Session,
                e.to_string(),
                "Ensure the WebDriver for the chosen browser is running and matches --webdriver-url, and that no stale session is open.",
            ),
            FpError::Command(e) => ErrorPayload::new(
                ErrorCategory::Session,
                e.to_string(),
                "The browser session dropped or a command failed; rerun with --verbose for the failing step.",
            ),
            FpError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check JSON/serialization inputs; run with --verbose for details.",
            ),
            FpError::Config(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("webdriver") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Start the matching driver first (chromedriver for chrome/chromium/brave, geckodriver for firefox) or pass --webdriver-url.",
                    )
                } else if lower.contains("extension") || lower.contains("add-on") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Verify the extension path; chromium-family browsers take .crx files, firefox takes .xpi files.",
                    )
                } else if lower.contains("selector") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Pass a non-empty CSS selector (e.g., '#featureList li') via --selector or the config file.",
                    )
                } else if lower.contains("config") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check the TOML config file syntax and field names.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check flags/paths and the config file.",
                    )
                }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, FpError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Session,
    Network,
    Io,
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorCategory::Config => "config",
            ErrorCategory::Session => "session",
            ErrorCategory::Network => "network",
            ErrorCategory::Io => "io",
            ErrorCategory::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}
