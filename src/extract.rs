//! Fingerprint feature extraction from a rendered page.
//!
//! Extraction is deliberately best-effort: the probed page may block, omit,
//! or rename signals depending on the browser and installed extensions, so a
//! malformed entry is skipped rather than failing the run, and a readiness
//! timeout degrades to "whatever is there" instead of an error.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::page::{Page, PageElement};

/// Default CSS selector for the rendered feature list.
pub const DEFAULT_FEATURE_SELECTOR: &str = "#featureList li";

/// Default bound on the readiness wait.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Substituted when the page's body text cannot be read.
pub const BODY_TEXT_PLACEHOLDER: &str = "<unable to retrieve body text>";

/// Sub-node holding an entry's field name.
const LABEL_SELECTOR: &str = "h3";

/// Sub-node holding an entry's value.
const VALUE_SELECTOR: &str = "pre";

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Field name to raw string value, as found on the page.
pub type FeatureMap = HashMap<String, String>;

/// Read all feature entries under `selector` from `page`.
///
/// Waits up to `wait` for at least one matching element, polling at a fixed
/// interval; on timeout the scrape proceeds with whatever is present. For
/// each element the first nested `h3` is the label and the first nested
/// `pre` the value, both trimmed; entries missing either sub-node are
/// skipped, and a repeated label keeps the last value seen.
pub async fn extract<P: Page>(page: &P, selector: &str, wait: Duration) -> FeatureMap {
    let deadline = Instant::now() + wait;
    let elements = loop {
        match page.find_all(selector).await {
            Ok(found) if !found.is_empty() => break found,
            Ok(found) if Instant::now() >= deadline => break found,
            Err(_) if Instant::now() >= deadline => break Vec::new(),
            _ => tokio::time::sleep(POLL_INTERVAL).await,
        }
    };

    let mut features = FeatureMap::new();
    for element in &elements {
        let Ok(Some(label)) = element.first_text(LABEL_SELECTOR).await else {
            continue;
        };
        let Ok(Some(value)) = element.first_text(VALUE_SELECTOR).await else {
            continue;
        };
        features.insert(label.trim().to_owned(), value.trim().to_owned());
    }
    features
}

/// Best-effort body text of `page`, with a fixed placeholder on script
/// failure.
pub async fn body_text<P: Page>(page: &P) -> String {
    page.evaluate_script("return document.body ? (document.body.innerText || '') : '';")
        .await
        .unwrap_or_else(|_| BODY_TEXT_PLACEHOLDER.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::StaticPage;

    const SHORT_WAIT: Duration = Duration::from_millis(50);

    #[tokio::test]
    async fn extracts_trimmed_label_value_pairs() {
        let page = StaticPage::new("probe")
            .with_feature("  Canvas Fingerprint  ", " abc123 ")
            .with_feature("WebGL Vendor", "Mesa");

        let features = extract(&page, DEFAULT_FEATURE_SELECTOR, SHORT_WAIT).await;
        assert_eq!(features.len(), 2);
        assert_eq!(features["Canvas Fingerprint"], "abc123");
        assert_eq!(features["WebGL Vendor"], "Mesa");
    }

    #[tokio::test]
    async fn skips_entries_missing_label_or_value() {
        let page = StaticPage::new("probe")
            .with_entry(Some("Orphan Label"), None)
            .with_entry(None, Some("orphan value"))
            .with_feature("Platform", "Linux x86_64");

        let features = extract(&page, DEFAULT_FEATURE_SELECTOR, SHORT_WAIT).await;
        assert_eq!(features.len(), 1);
        assert_eq!(features["Platform"], "Linux x86_64");
    }

    #[tokio::test]
    async fn duplicate_labels_keep_the_last_value() {
        let page = StaticPage::new("probe")
            .with_feature("User-Agent", "UA1")
            .with_feature("User-Agent", "UA2");

        let features = extract(&page, DEFAULT_FEATURE_SELECTOR, SHORT_WAIT).await;
        assert_eq!(features.len(), 1);
        assert_eq!(features["User-Agent"], "UA2");
    }

    #[tokio::test]
    async fn waits_for_late_rendering_feature_lists() {
        let page = StaticPage::new("probe")
            .with_feature("Time Zone", "Europe/Berlin")
            .visible_after_polls(2);

        let features = extract(&page, DEFAULT_FEATURE_SELECTOR, Duration::from_secs(2)).await;
        assert_eq!(features["Time Zone"], "Europe/Berlin");
        assert!(page.poll_count() >= 3);
    }

    #[tokio::test]
    async fn timeout_degrades_to_empty_map() {
        let page = StaticPage::new("probe")
            .with_feature("Locale", "en-US")
            .visible_after_polls(1_000);

        let features = extract(&page, DEFAULT_FEATURE_SELECTOR, Duration::from_millis(300)).await;
        assert!(features.is_empty());
    }

    #[tokio::test]
    async fn empty_page_yields_empty_map() {
        let page = StaticPage::new("probe");
        let features = extract(&page, DEFAULT_FEATURE_SELECTOR, SHORT_WAIT).await;
        assert!(features.is_empty());
    }

    #[tokio::test]
    async fn body_text_substitutes_placeholder_on_script_failure() {
        let page = StaticPage::new("probe");
        assert_eq!(body_text(&page).await, BODY_TEXT_PLACEHOLDER);

        let page = StaticPage::new("probe").with_body_text("rendered body");
        assert_eq!(body_text(&page).await, "rendered body");
    }
}
