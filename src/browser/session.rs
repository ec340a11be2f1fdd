//! WebDriver-backed browser sessions.
//!
//! A [`DriverSession`] wraps a fantoccini client connected to an external
//! chromedriver/geckodriver endpoint. The session owns a temporary
//! `--user-data-dir` profile for chromium-family browsers, which is removed
//! when the session is torn down.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::Utc;
use fantoccini::elements::Element;
use fantoccini::{Client, ClientBuilder, Locator};
use rand::Rng;
use tempfile::TempDir;

use super::profiles::{self, Browser, Engine, SessionOptions};
use crate::error::{FpError, Result};
use crate::page::{Page, PageElement};

/// How long the endpoint status probe may take.
const STATUS_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Progress callback, invoked with human-readable status lines.
pub type ProgressFn = Arc<dyn Fn(&str) + Send + Sync>;

/// One exclusive browser session for the lifetime of a scan.
#[derive(Debug)]
pub struct DriverSession {
    client: Client,
    webdriver_url: String,
    /// Temp profile backing `--user-data-dir`; removed on drop.
    _profile_dir: Option<TempDir>,
}

/// A matched element within a [`DriverSession`] page.
pub struct DriverElement {
    element: Element,
}

impl DriverSession {
    /// Connect a new session to `webdriver_url` with the launch profile for
    /// `browser` and `options`.
    ///
    /// Extension files are validated up front; chromium-family `.crx` files
    /// are embedded in the capabilities, firefox `.xpi` files are installed
    /// through geckodriver once the session exists. Files with any other
    /// suffix are passed over, matching the path-based label mapping in the
    /// report.
    pub async fn launch(
        browser: Browser,
        options: &SessionOptions,
        webdriver_url: &str,
        progress: Option<ProgressFn>,
    ) -> Result<Self> {
        for path in &options.extensions {
            if !path.exists() {
                return Err(FpError::Config(format!(
                    "Extension file not found: {}",
                    path.display()
                )));
            }
        }

        ensure_webdriver_available(webdriver_url).await?;

        let profile_dir = match browser.engine() {
            Engine::Chromium => Some(
                tempfile::Builder::new()
                    .prefix("fpscan-profile-")
                    .tempdir()?,
            ),
            Engine::Gecko => None,
        };

        let encoded = match browser.engine() {
            Engine::Chromium => encode_crx_extensions(&options.extensions)?,
            Engine::Gecko => Vec::new(),
        };

        let caps = profiles::capabilities(
            browser,
            options,
            profile_dir.as_ref().map(TempDir::path),
            &encoded,
        );

        log_progress(
            &progress,
            &format!("Connecting to WebDriver at {webdriver_url}…"),
        );
        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(webdriver_url)
            .await?;

        let session = Self {
            client,
            webdriver_url: webdriver_url.trim_end_matches('/').to_owned(),
            _profile_dir: profile_dir,
        };

        if browser.engine() == Engine::Gecko {
            if let Err(err) = session
                .install_gecko_addons(&options.extensions, &progress)
                .await
            {
                // Do not leak the half-built session.
                let _ = session.close().await;
                return Err(err);
            }
        }

        Ok(session)
    }

    async fn install_gecko_addons(
        &self,
        extensions: &[PathBuf],
        progress: &Option<ProgressFn>,
    ) -> Result<()> {
        for path in extensions.iter().filter(|p| has_suffix(p, "xpi")) {
            log_progress(progress, &format!("Installing add-on {}…", path.display()));
            self.install_addon(path).await?;
        }
        Ok(())
    }

    /// Install a firefox add-on through geckodriver's `moz/addon/install`
    /// extension endpoint (temporary install, gone with the session).
    async fn install_addon(&self, path: &Path) -> Result<()> {
        let session_id = self.client.session_id().await?.ok_or_else(|| {
            FpError::config("WebDriver session has no id; cannot install add-ons")
        })?;
        let endpoint = format!(
            "{}/session/{}/moz/addon/install",
            self.webdriver_url, session_id
        );
        let path = fs::canonicalize(path)?;
        let body = serde_json::json!({
            "path": path.to_string_lossy(),
            "temporary": true,
        });

        let response = reqwest::Client::new()
            .post(&endpoint)
            .json(&body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(FpError::Config(format!(
                "geckodriver rejected add-on install for {} (status {})",
                path.display(),
                response.status()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Page for DriverSession {
    type Element = DriverElement;

    async fn navigate(&self, url: &str) -> Result<()> {
        self.client.goto(url).await?;
        Ok(())
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<DriverElement>> {
        let elements = self.client.find_all(Locator::Css(selector)).await?;
        Ok(elements
            .into_iter()
            .map(|element| DriverElement { element })
            .collect())
    }

    async fn evaluate_script(&self, script: &str) -> Result<String> {
        let value = self.client.execute(script, Vec::new()).await?;
        Ok(value
            .as_str()
            .map(str::to_owned)
            .unwrap_or_else(|| value.to_string()))
    }

    async fn title(&self) -> Result<String> {
        self.evaluate_script("return document.title;").await
    }

    async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }
}

#[async_trait]
impl PageElement for DriverElement {
    async fn first_text(&self, selector: &str) -> Result<Option<String>> {
        match self.element.find(Locator::Css(selector)).await {
            Ok(found) => Ok(Some(found.text().await?)),
            Err(err) if err.is_no_such_element() => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Probe `{webdriver_url}/status` so a missing driver process fails fast
/// with a useful message instead of a connect error mid-handshake.
pub async fn ensure_webdriver_available(webdriver_url: &str) -> Result<()> {
    let status_url = format!("{}/status", webdriver_url.trim_end_matches('/'));
    let probe = reqwest::Client::new()
        .get(&status_url)
        .timeout(STATUS_PROBE_TIMEOUT)
        .send()
        .await;
    match probe {
        Ok(_) => Ok(()),
        Err(err) => Err(FpError::Config(format!(
            "No WebDriver endpoint responding at {webdriver_url}: {err}"
        ))),
    }
}

/// Append a `nocache` query parameter so repeated probes bypass browser and
/// server caches.
pub fn append_cache_buster(url: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let salt: u32 = rand::thread_rng().gen_range(0..100_000);
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}nocache={millis}_{salt}")
}

/// Base64-encode every `.crx` file in `paths` for capability embedding.
fn encode_crx_extensions(paths: &[PathBuf]) -> Result<Vec<String>> {
    let mut encoded = Vec::new();
    for path in paths.iter().filter(|p| has_suffix(p, "crx")) {
        let bytes = fs::read(path)?;
        encoded.push(BASE64.encode(bytes));
    }
    Ok(encoded)
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case(suffix))
        .unwrap_or(false)
}

fn log_progress(progress: &Option<ProgressFn>, message: &str) {
    if let Some(callback) = progress {
        callback(message);
    }
}
