//! Fingerprint Probe (fpscan) Library
//!
//! A library for driving a browser through a WebDriver endpoint with
//! privacy/anti-fingerprinting launch profiles, scraping the rendered
//! fingerprint feature list, and writing a schema-normalized JSON report.
//!
//! # Module Overview
//!
//! - [`browser`] - launch profiles and WebDriver session management
//! - [`page`] - the page capability interface the core is written against
//! - [`extract`] - best-effort feature extraction from a rendered page
//! - [`report`] - report assembly and persistence
//! - [`schema`] - the canonical expected-field schema
//! - [`config`] - configuration file support
//! - [`error`] - error types and payloads
//!
//! # Example
//!
//! ```no_run
//! use fpscan_lib::{
//!     build_report, extract, write_report, Browser, DriverSession, Page, RunConfig,
//!     SessionOptions, DEFAULT_FEATURE_SELECTOR, DEFAULT_WAIT_TIMEOUT, EXPECTED_FIELDS,
//! };
//!
//! # async fn example() -> fpscan_lib::Result<()> {
//! let options = SessionOptions::default();
//! let session =
//!     DriverSession::launch(Browser::Chrome, &options, "http://localhost:9515", None).await?;
//! session.navigate("http://localhost:80").await?;
//!
//! let features = extract(&session, DEFAULT_FEATURE_SELECTOR, DEFAULT_WAIT_TIMEOUT).await;
//! let title = session.title().await?;
//! let run = RunConfig {
//!     browser: "chrome".into(),
//!     privacy_max: false,
//!     incognito: false,
//!     extensions: Vec::new(),
//! };
//! let report = build_report(&features, &EXPECTED_FIELDS, &run, &title);
//! write_report(&report, std::path::Path::new("output.json"))?;
//! session.close().await
//! # }
//! ```

pub mod browser;
pub mod config;
pub mod error;
pub mod extract;
pub mod page;
pub mod report;
pub mod schema;

pub use browser::{
    append_cache_buster, capabilities, chromium_args, ensure_webdriver_available, gecko_prefs,
    Browser, Capabilities, DriverElement, DriverSession, Engine, PrefValue, PrivacyMode,
    ProgressFn, SessionOptions,
};
pub use config::{Config, Timeouts, WebdriverEndpoints};
pub use error::{ErrorCategory, ErrorPayload, FpError, Result};
pub use extract::{
    body_text, extract, FeatureMap, BODY_TEXT_PLACEHOLDER, DEFAULT_FEATURE_SELECTOR,
    DEFAULT_WAIT_TIMEOUT,
};
pub use page::{Page, PageElement, StaticEntry, StaticPage};
pub use report::{
    build_report, build_report_at, extension_labels, write_report, Report, RunConfig, RunSummary,
};
pub use schema::EXPECTED_FIELDS;
