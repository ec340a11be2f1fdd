//! Per-browser launch profiles.
//!
//! The switch and preference sets for every browser × privacy-mode
//! combination live here as plain data; [`capabilities`] folds the selected
//! rows into a WebDriver capability object. Nothing in this module talks to
//! a browser, so the whole table is unit-testable.

use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};

/// WebDriver capability object, keyed by vendor-prefixed option names.
pub type Capabilities = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Browser {
    /// Alias for Chrome; kept distinct so reports echo the caller's choice.
    Chromium,
    Chrome,
    Brave,
    Firefox,
}

/// Browser engine family, which decides the capability dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    Chromium,
    Gecko,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivacyMode {
    /// Minimal fingerprint protection.
    Baseline,
    /// Every available privacy/anti-fingerprinting setting.
    Max,
}

/// Options for one browser session.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub headless: bool,
    pub incognito: bool,
    pub privacy: PrivacyMode,
    /// Extension files (.crx for chromium-family, .xpi for firefox).
    pub extensions: Vec<PathBuf>,
}

impl Default for PrivacyMode {
    fn default() -> Self {
        PrivacyMode::Baseline
    }
}

impl Browser {
    pub fn engine(self) -> Engine {
        match self {
            Browser::Chromium | Browser::Chrome | Browser::Brave => Engine::Chromium,
            Browser::Firefox => Engine::Gecko,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Chrome => "chrome",
            Browser::Brave => "brave",
            Browser::Firefox => "firefox",
        }
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Firefox profile preference value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefValue {
    Bool(bool),
    Int(i64),
}

impl From<PrefValue> for Value {
    fn from(value: PrefValue) -> Self {
        match value {
            PrefValue::Bool(b) => Value::Bool(b),
            PrefValue::Int(i) => Value::from(i),
        }
    }
}

/// Switches every chromium-family session gets.
const CHROMIUM_BASE_ARGS: &[&str] = &["--no-sandbox", "--disable-dev-shm-usage"];

/// Chrome additionally re-enables --load-extension support.
const CHROME_BASE_ARGS: &[&str] = &["--disable-features=DisableLoadExtensionCommandLineSwitch"];

const CHROMIUM_BASELINE_ARGS: &[&str] =
    &["--disable-plugins-discovery", "--disable-popup-blocking"];

const CHROME_BASELINE_ARGS: &[&str] = &["--enable-features=EnableDoNotTrack"];

/// Privacy-max switches shared by the whole chromium family.
const CHROMIUM_PRIVACY_ARGS: &[&str] = &[
    "--disable-plugins-discovery",
    "--disable-extensions",
    "--disable-popup-blocking",
    "--disable-translate",
    "--disable-background-networking",
    "--disable-sync",
    "--disable-default-apps",
    "--disable-webgl",
    "--disable-site-isolation-trials",
];

/// Privacy-max switches Chrome gets on top of the family set; Brave ships
/// its own tracking defenses and skips these.
const CHROME_PRIVACY_ARGS: &[&str] = &[
    "--enable-features=EnableDoNotTrack",
    "--force-enable-do-not-track",
    "--disable-third-party-cookies",
    "--disable-features=InterestCohortAPI,Topics,FirstPartySets,PrivacySandboxSettings2",
];

const GECKO_BASELINE_PREFS: &[(&str, PrefValue)] = &[
    ("privacy.trackingprotection.enabled", PrefValue::Bool(true)),
    (
        "privacy.trackingprotection.fingerprinting.enabled",
        PrefValue::Bool(true),
    ),
    (
        "privacy.trackingprotection.cryptomining.enabled",
        PrefValue::Bool(true),
    ),
];

const GECKO_PRIVACY_PREFS: &[(&str, PrefValue)] = &[
    ("privacy.resistFingerprinting", PrefValue::Bool(true)),
    ("privacy.trackingprotection.enabled", PrefValue::Bool(true)),
    (
        "privacy.trackingprotection.fingerprinting.enabled",
        PrefValue::Bool(true),
    ),
    (
        "privacy.trackingprotection.cryptomining.enabled",
        PrefValue::Bool(true),
    ),
    ("privacy.firstparty.isolate", PrefValue::Bool(true)),
    ("webgl.disabled", PrefValue::Bool(true)),
    ("dom.webnotifications.enabled", PrefValue::Bool(false)),
    (
        "dom.webnotifications.serviceworker.enabled",
        PrefValue::Bool(false),
    ),
    ("dom.push.enabled", PrefValue::Bool(false)),
    ("dom.battery.enabled", PrefValue::Bool(false)),
    ("dom.enable_performance", PrefValue::Bool(false)),
    ("media.peerconnection.enabled", PrefValue::Bool(false)),
    ("media.navigator.enabled", PrefValue::Bool(false)),
    ("media.webspeech.recognition.enable", PrefValue::Bool(false)),
    ("media.webspeech.synth.enabled", PrefValue::Bool(false)),
    ("beacon.enabled", PrefValue::Bool(false)),
    ("geo.enabled", PrefValue::Bool(false)),
    ("network.cookie.cookieBehavior", PrefValue::Int(1)),
    ("network.dns.disablePrefetch", PrefValue::Bool(true)),
    ("network.prefetch-next", PrefValue::Bool(false)),
    ("network.http.sendRefererHeader", PrefValue::Int(0)),
    ("network.http.referer.spoofSource", PrefValue::Bool(true)),
    ("network.http.referer.XOriginPolicy", PrefValue::Int(2)),
    (
        "network.http.referer.XOriginTrimmingPolicy",
        PrefValue::Int(2),
    ),
    ("device.sensors.enabled", PrefValue::Bool(false)),
    ("device.sensors.ambientLight.enabled", PrefValue::Bool(false)),
    ("device.sensors.motion.enabled", PrefValue::Bool(false)),
    ("device.sensors.orientation.enabled", PrefValue::Bool(false)),
    ("device.sensors.proximity.enabled", PrefValue::Bool(false)),
    ("dom.gamepad.enabled", PrefValue::Bool(false)),
    ("dom.w3c_pointer_events.enabled", PrefValue::Bool(false)),
    ("dom.event.clipboardevents.enabled", PrefValue::Bool(false)),
    ("layers.acceleration.disabled", PrefValue::Bool(true)),
    ("dom.serviceWorkers.enabled", PrefValue::Bool(false)),
    ("dom.storage.enabled", PrefValue::Bool(false)),
    ("dom.sessionstore.enabled", PrefValue::Bool(false)),
    ("dom.indexedDB.enabled", PrefValue::Bool(false)),
    ("dom.caches.enabled", PrefValue::Bool(false)),
    ("browser.cache.disk.enable", PrefValue::Bool(false)),
    ("browser.cache.memory.enable", PrefValue::Bool(false)),
];

/// Command-line switches for a chromium-family browser in the given mode.
pub fn chromium_args(browser: Browser, mode: PrivacyMode) -> Vec<&'static str> {
    let mut args: Vec<&'static str> = CHROMIUM_BASE_ARGS.to_vec();
    let is_brave = browser == Browser::Brave;
    if !is_brave {
        args.extend_from_slice(CHROME_BASE_ARGS);
    }
    match mode {
        PrivacyMode::Baseline => {
            args.extend_from_slice(CHROMIUM_BASELINE_ARGS);
            if !is_brave {
                args.extend_from_slice(CHROME_BASELINE_ARGS);
            }
        }
        PrivacyMode::Max => {
            args.extend_from_slice(CHROMIUM_PRIVACY_ARGS);
            if !is_brave {
                args.extend_from_slice(CHROME_PRIVACY_ARGS);
            }
        }
    }
    args
}

/// Profile preferences for a gecko browser in the given mode.
pub fn gecko_prefs(mode: PrivacyMode) -> &'static [(&'static str, PrefValue)] {
    match mode {
        PrivacyMode::Baseline => GECKO_BASELINE_PREFS,
        PrivacyMode::Max => GECKO_PRIVACY_PREFS,
    }
}

/// Build the WebDriver capability object for one session.
///
/// `user_data_dir` is the temporary profile directory for chromium-family
/// sessions; `encoded_extensions` are base64 `.crx` payloads (chromium-family
/// only — gecko add-ons are installed after the session is created).
pub fn capabilities(
    browser: Browser,
    options: &SessionOptions,
    user_data_dir: Option<&Path>,
    encoded_extensions: &[String],
) -> Capabilities {
    let mut caps = Capabilities::new();
    match browser.engine() {
        Engine::Chromium => {
            let mut args: Vec<String> = chromium_args(browser, options.privacy)
                .into_iter()
                .map(str::to_owned)
                .collect();
            if options.headless {
                args.push("--headless=new".to_owned());
            }
            if options.incognito {
                args.push("--incognito".to_owned());
            }
            if let Some(dir) = user_data_dir {
                args.push(format!("--user-data-dir={}", dir.display()));
            }

            let mut chrome_opts = Map::new();
            chrome_opts.insert("args".to_owned(), json!(args));
            if !encoded_extensions.is_empty() {
                chrome_opts.insert("extensions".to_owned(), json!(encoded_extensions));
            }
            if options.privacy == PrivacyMode::Max {
                chrome_opts.insert("excludeSwitches".to_owned(), json!(["enable-automation"]));
                chrome_opts.insert("useAutomationExtension".to_owned(), json!(false));
            }
            caps.insert("goog:chromeOptions".to_owned(), Value::Object(chrome_opts));
        }
        Engine::Gecko => {
            let mut args: Vec<&str> = Vec::new();
            if options.headless {
                args.push("-headless");
            }
            if options.incognito {
                args.push("-private");
            }

            let mut prefs = Map::new();
            for (key, value) in gecko_prefs(options.privacy) {
                prefs.insert((*key).to_owned(), Value::from(*value));
            }

            let mut firefox_opts = Map::new();
            firefox_opts.insert("args".to_owned(), json!(args));
            firefox_opts.insert("prefs".to_owned(), Value::Object(prefs));
            caps.insert("moz:firefoxOptions".to_owned(), Value::Object(firefox_opts));
        }
    }
    caps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_of(caps: &Capabilities, key: &str) -> Vec<String> {
        caps[key]["args"]
            .as_array()
            .expect("args array")
            .iter()
            .map(|v| v.as_str().unwrap().to_owned())
            .collect()
    }

    #[test]
    fn browser_engines_and_names() {
        assert_eq!(Browser::Chromium.engine(), Engine::Chromium);
        assert_eq!(Browser::Brave.engine(), Engine::Chromium);
        assert_eq!(Browser::Firefox.engine(), Engine::Gecko);
        assert_eq!(Browser::Chromium.as_str(), "chromium");
        assert_eq!(Browser::Firefox.to_string(), "firefox");
    }

    #[test]
    fn chrome_privacy_max_includes_full_switch_set() {
        let args = chromium_args(Browser::Chrome, PrivacyMode::Max);
        for expected in [
            "--no-sandbox",
            "--disable-webgl",
            "--disable-site-isolation-trials",
            "--force-enable-do-not-track",
            "--disable-features=InterestCohortAPI,Topics,FirstPartySets,PrivacySandboxSettings2",
        ] {
            assert!(args.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn brave_privacy_max_skips_chrome_only_switches() {
        let args = chromium_args(Browser::Brave, PrivacyMode::Max);
        assert!(args.contains(&"--disable-webgl"));
        assert!(!args.contains(&"--force-enable-do-not-track"));
        assert!(!args.contains(&"--disable-third-party-cookies"));
    }

    #[test]
    fn chrome_baseline_keeps_do_not_track_only() {
        let args = chromium_args(Browser::Chrome, PrivacyMode::Baseline);
        assert!(args.contains(&"--enable-features=EnableDoNotTrack"));
        assert!(args.contains(&"--disable-plugins-discovery"));
        assert!(!args.contains(&"--disable-webgl"));
    }

    #[test]
    fn gecko_baseline_prefs_are_the_tracking_protection_trio() {
        let prefs = gecko_prefs(PrivacyMode::Baseline);
        assert_eq!(prefs.len(), 3);
        assert!(prefs
            .iter()
            .all(|(key, value)| key.starts_with("privacy.trackingprotection.")
                && *value == PrefValue::Bool(true)));
    }

    #[test]
    fn gecko_privacy_max_prefs_cover_fingerprinting_surface() {
        let prefs = gecko_prefs(PrivacyMode::Max);
        let get = |name: &str| {
            prefs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| *value)
        };
        assert_eq!(get("privacy.resistFingerprinting"), Some(PrefValue::Bool(true)));
        assert_eq!(get("webgl.disabled"), Some(PrefValue::Bool(true)));
        assert_eq!(get("network.cookie.cookieBehavior"), Some(PrefValue::Int(1)));
        assert_eq!(get("network.http.referer.XOriginPolicy"), Some(PrefValue::Int(2)));
    }

    #[test]
    fn chromium_capabilities_wire_headless_incognito_and_profile() {
        let options = SessionOptions {
            headless: true,
            incognito: true,
            privacy: PrivacyMode::Baseline,
            extensions: Vec::new(),
        };
        let caps = capabilities(
            Browser::Chrome,
            &options,
            Some(Path::new("/tmp/fpscan-profile-x")),
            &[],
        );

        let args = args_of(&caps, "goog:chromeOptions");
        assert!(args.contains(&"--headless=new".to_owned()));
        assert!(args.contains(&"--incognito".to_owned()));
        assert!(args.contains(&"--user-data-dir=/tmp/fpscan-profile-x".to_owned()));
        assert!(caps["goog:chromeOptions"].get("excludeSwitches").is_none());
    }

    #[test]
    fn chromium_privacy_max_capabilities_disable_automation_banners() {
        let options = SessionOptions {
            privacy: PrivacyMode::Max,
            ..SessionOptions::default()
        };
        let caps = capabilities(Browser::Chrome, &options, None, &[]);
        let chrome_opts = &caps["goog:chromeOptions"];
        assert_eq!(
            chrome_opts["excludeSwitches"],
            json!(["enable-automation"])
        );
        assert_eq!(chrome_opts["useAutomationExtension"], json!(false));
    }

    #[test]
    fn chromium_capabilities_embed_encoded_extensions() {
        let encoded = vec!["Y3J4LXBheWxvYWQ=".to_owned()];
        let caps = capabilities(Browser::Brave, &SessionOptions::default(), None, &encoded);
        assert_eq!(
            caps["goog:chromeOptions"]["extensions"],
            json!(["Y3J4LXBheWxvYWQ="])
        );
    }

    #[test]
    fn gecko_capabilities_carry_args_and_prefs() {
        let options = SessionOptions {
            headless: true,
            incognito: true,
            privacy: PrivacyMode::Max,
            extensions: Vec::new(),
        };
        let caps = capabilities(Browser::Firefox, &options, None, &[]);

        let args = args_of(&caps, "moz:firefoxOptions");
        assert_eq!(args, vec!["-headless", "-private"]);

        let prefs = &caps["moz:firefoxOptions"]["prefs"];
        assert_eq!(prefs["privacy.resistFingerprinting"], json!(true));
        assert_eq!(prefs["network.cookie.cookieBehavior"], json!(1));
        assert!(caps.get("goog:chromeOptions").is_none());
    }
}
