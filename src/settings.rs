use std::path::{Path, PathBuf};
use std::time::Duration;

use fpscan_lib::{Browser, Config, Engine, FpError};

/// Resolved settings for one scan after merging CLI flags and config file.
#[derive(Debug, Clone)]
pub struct ResolvedScanSettings {
    pub selector: String,
    pub output: PathBuf,
    pub webdriver_url: String,
    pub wait: Duration,
    pub settle: Duration,
}

/// Merge CLI arguments with the config file, preferring CLI values when the
/// flags were given.
pub fn resolve_scan_settings(
    browser: Browser,
    cli_selector: Option<String>,
    cli_output: Option<PathBuf>,
    cli_webdriver_url: Option<String>,
    cli_wait_timeout: Option<u64>,
    cli_settle: Option<u64>,
    config: &Config,
) -> ResolvedScanSettings {
    let webdriver_url = cli_webdriver_url.unwrap_or_else(|| match browser.engine() {
        Engine::Chromium => config.webdriver.chromium.clone(),
        Engine::Gecko => config.webdriver.gecko.clone(),
    });

    ResolvedScanSettings {
        selector: cli_selector.unwrap_or_else(|| config.selector.clone()),
        output: cli_output.unwrap_or_else(|| config.output.clone()),
        webdriver_url,
        wait: cli_wait_timeout
            .map(Duration::from_secs)
            .unwrap_or(config.timeouts.wait),
        settle: cli_settle
            .map(Duration::from_secs)
            .unwrap_or(config.timeouts.settle),
    }
}

/// Load and validate the config file, or return defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config, FpError> {
    let cfg = Config::load(path)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Log effective settings to stderr (verbose mode).
pub fn log_effective_config(
    settings: &ResolvedScanSettings,
    browser: Browser,
    config_path: Option<&Path>,
) {
    let source = config_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    eprintln!(
        "Effective config [{source}]: browser={}, webdriver={}, selector={:?}, output={}, wait={}s, settle={}s",
        browser,
        settings.webdriver_url,
        settings.selector,
        settings.output.display(),
        settings.wait.as_secs(),
        settings.settle.as_secs()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use fpscan_lib::{Timeouts, WebdriverEndpoints};

    #[test]
    fn resolve_prefers_config_when_flags_absent() {
        let cfg = Config {
            selector: "#fp li".to_string(),
            output: PathBuf::from("custom.json"),
            webdriver: WebdriverEndpoints {
                chromium: "http://localhost:1111".to_string(),
                gecko: "http://localhost:2222".to_string(),
            },
            timeouts: Timeouts {
                wait: Duration::from_secs(8),
                settle: Duration::from_secs(12),
            },
        };

        let resolved = resolve_scan_settings(Browser::Firefox, None, None, None, None, None, &cfg);

        assert_eq!(resolved.selector, "#fp li");
        assert_eq!(resolved.output, PathBuf::from("custom.json"));
        assert_eq!(resolved.webdriver_url, "http://localhost:2222");
        assert_eq!(resolved.wait, Duration::from_secs(8));
        assert_eq!(resolved.settle, Duration::from_secs(12));
    }

    #[test]
    fn resolve_prefers_cli_when_flags_present() {
        let cfg = Config::default();
        let resolved = resolve_scan_settings(
            Browser::Chrome,
            Some("#other li".to_string()),
            Some(PathBuf::from("out.json")),
            Some("http://localhost:9999".to_string()),
            Some(30),
            Some(2),
            &cfg,
        );

        assert_eq!(resolved.selector, "#other li");
        assert_eq!(resolved.output, PathBuf::from("out.json"));
        assert_eq!(resolved.webdriver_url, "http://localhost:9999");
        assert_eq!(resolved.wait, Duration::from_secs(30));
        assert_eq!(resolved.settle, Duration::from_secs(2));
    }

    #[test]
    fn webdriver_endpoint_follows_browser_engine() {
        let cfg = Config::default();
        let chromium =
            resolve_scan_settings(Browser::Brave, None, None, None, None, None, &cfg);
        let gecko = resolve_scan_settings(Browser::Firefox, None, None, None, None, None, &cfg);

        assert_eq!(chromium.webdriver_url, "http://localhost:9515");
        assert_eq!(gecko.webdriver_url, "http://localhost:4444");
    }

    #[test]
    fn load_config_rejects_invalid_selector() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("fpscan.toml");
        std::fs::write(&path, "selector = \"\"\n").expect("write config");

        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().to_ascii_lowercase().contains("selector"));
    }
}
