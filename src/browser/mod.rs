//! Browser session management.
//!
//! # Module Structure
//!
//! - [`profiles`] - declarative launch-profile tables and capability building
//! - [`session`] - WebDriver sessions over an external driver endpoint
//!
//! # Example
//!
//! ```no_run
//! use fpscan_lib::{Browser, DriverSession, PrivacyMode, SessionOptions};
//!
//! # async fn example() -> fpscan_lib::Result<()> {
//! let options = SessionOptions {
//!     headless: true,
//!     privacy: PrivacyMode::Max,
//!     ..SessionOptions::default()
//! };
//! let session =
//!     DriverSession::launch(Browser::Chrome, &options, "http://localhost:9515", None).await?;
//! # Ok(())
//! # }
//! ```

mod profiles;
mod session;

pub use profiles::{
    capabilities, chromium_args, gecko_prefs, Browser, Capabilities, Engine, PrefValue,
    PrivacyMode, SessionOptions,
};
pub use session::{
    append_cache_buster, ensure_webdriver_available, DriverElement, DriverSession, ProgressFn,
};
