//! Report assembly and persistence.
//!
//! A run produces exactly one report: the extracted feature map normalized
//! against the canonical field schema, plus the run configuration and a
//! build-time timestamp, serialized as indented UTF-8 JSON.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, SecondsFormat};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::extract::FeatureMap;

/// Known privacy-tool names, matched as substrings against extension file
/// paths. Paths matching nothing are dropped from the report's label list.
const KNOWN_EXTENSIONS: &[(&[&str], &str)] = &[
    (&["ublock"], "ublock origin (lite)"),
    (
        &["privacybadger", "privacy-badger", "privacy_badger"],
        "privacy badger",
    ),
    (&["noscript"], "noscript"),
    (&["canvasblocker"], "canvasblocker"),
];

/// The configuration one scan ran under, as supplied by the caller.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Browser name exactly as chosen on the command line.
    pub browser: String,
    pub privacy_max: bool,
    pub incognito: bool,
    /// Raw extension file paths handed to the session.
    pub extensions: Vec<PathBuf>,
}

/// The persisted result of one scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// ISO-8601 timestamp captured at build time.
    pub timestamp: String,
    /// Document title of the probed page.
    pub title: String,
    pub config: RunSummary,
    /// Every schema field, in schema order; missing fields are empty strings.
    pub features: IndexMap<String, String>,
}

/// Display form of the run configuration embedded in the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub browser: String,
    pub privacy_max: bool,
    pub incognito: bool,
    /// Friendly names of recognized extensions, input order preserved.
    pub extensions: Vec<String>,
}

impl Report {
    /// Whether the page exposed any fingerprint data at all.
    pub fn has_features(&self) -> bool {
        self.features.values().any(|value| !value.is_empty())
    }
}

/// Map raw extension paths to friendly tool names.
///
/// Matching is case-insensitive substring search against the known-tool
/// table; unmatched paths are silently dropped (display-only transform).
pub fn extension_labels(paths: &[PathBuf]) -> Vec<String> {
    let mut labels = Vec::new();
    for path in paths {
        let lower = path.to_string_lossy().to_ascii_lowercase();
        for (needles, label) in KNOWN_EXTENSIONS {
            if needles.iter().any(|needle| lower.contains(needle)) {
                labels.push((*label).to_owned());
                break;
            }
        }
    }
    labels
}

/// Assemble a report with a timestamp captured now.
pub fn build_report(
    features: &FeatureMap,
    schema: &[&str],
    run: &RunConfig,
    title: &str,
) -> Report {
    build_report_at(features, schema, run, title, Local::now())
}

/// Assemble a report with an injected timestamp.
///
/// Deterministic: identical inputs yield byte-identical serialized reports.
pub fn build_report_at(
    features: &FeatureMap,
    schema: &[&str],
    run: &RunConfig,
    title: &str,
    timestamp: DateTime<Local>,
) -> Report {
    let normalized = schema
        .iter()
        .map(|name| {
            let value = features.get(*name).cloned().unwrap_or_default();
            ((*name).to_owned(), value)
        })
        .collect();

    Report {
        timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Micros, false),
        title: title.to_owned(),
        config: RunSummary {
            browser: run.browser.clone(),
            privacy_max: run.privacy_max,
            incognito: run.incognito,
            extensions: extension_labels(&run.extensions),
        },
        features: normalized,
    }
}

/// Serialize `report` as indented UTF-8 JSON and write it to `path` in a
/// single write. Non-ASCII characters are preserved, not escaped.
pub fn write_report(report: &Report, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(report)?;
    fs::write(path, content)?;
    Ok(())
}
