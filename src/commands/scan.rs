use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use fpscan_lib::{
    append_cache_buster, body_text, build_report, extract, write_report, Browser, DriverSession,
    FeatureMap, Page, PrivacyMode, ProgressFn, RunConfig, SessionOptions, EXPECTED_FIELDS,
};
use url::Url;

use crate::cli::BrowserChoice;
use crate::formatting::{exit_code_for_scan, render_error, scan_status};
use crate::settings::{load_config, log_effective_config, resolve_scan_settings, ResolvedScanSettings};

/// Run the scan command.
#[allow(clippy::too_many_arguments)]
pub async fn run_scan(
    config_path: Option<PathBuf>,
    verbose: bool,
    browser: BrowserChoice,
    url: String,
    headless: bool,
    privacy_max: bool,
    incognito: bool,
    extensions: Vec<PathBuf>,
    webdriver_url: Option<String>,
    output: Option<PathBuf>,
    selector: Option<String>,
    wait_timeout: Option<u64>,
    settle: Option<u64>,
    no_cache_buster: bool,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err),
    };
    let browser = browser_from_cli(browser);
    let settings = resolve_scan_settings(
        browser,
        selector,
        output,
        webdriver_url,
        wait_timeout,
        settle,
        &config,
    );
    if verbose {
        log_effective_config(&settings, browser, config_path.as_deref());
    }

    eprintln!("[config] Browser: {browser}");
    eprintln!("[config] Privacy-max: {privacy_max}");
    eprintln!("[config] Incognito/private: {incognito}");
    eprintln!("[config] Extensions: {extensions:?}");

    if let Err(err) = Url::parse(&url) {
        return render_error(err.into());
    }

    let options = SessionOptions {
        headless,
        incognito,
        privacy: if privacy_max {
            PrivacyMode::Max
        } else {
            PrivacyMode::Baseline
        },
        extensions: extensions.clone(),
    };
    let progress: Option<ProgressFn> = if verbose {
        Some(Arc::new(|msg: &str| eprintln!("{msg}")))
    } else {
        None
    };

    eprintln!("[info] Launching {browser} ...");
    let session =
        match DriverSession::launch(browser, &options, &settings.webdriver_url, progress).await {
            Ok(session) => session,
            Err(err) => return render_error(err),
        };

    let target = if no_cache_buster {
        url.clone()
    } else {
        append_cache_buster(&url)
    };

    let scanned = scan_page(&session, &target, &settings, verbose).await;

    // The session is released on every path before the exit code is decided.
    if let Err(err) = session.close().await {
        eprintln!("[warn] Failed to close browser session: {err}");
    }

    let (features, title) = match scanned {
        Ok(result) => result,
        Err(err) => return render_error(err),
    };

    let run = RunConfig {
        browser: browser.as_str().to_string(),
        privacy_max,
        incognito,
        extensions,
    };
    let report = build_report(&features, &EXPECTED_FIELDS, &run, &title);

    if let Err(err) = write_report(&report, &settings.output) {
        return render_error(err);
    }
    let status = scan_status(&report);
    eprintln!(
        "[info] Report written to {} ({} of {} fields found)",
        settings.output.display(),
        report.features.values().filter(|v| !v.is_empty()).count(),
        report.features.len()
    );
    exit_code_for_scan(status)
}

/// Navigate, settle, and scrape one page.
async fn scan_page(
    session: &DriverSession,
    target: &str,
    settings: &ResolvedScanSettings,
    verbose: bool,
) -> fpscan_lib::Result<(FeatureMap, String)> {
    eprintln!("[info] Navigating to {target} ...");
    session.navigate(target).await?;

    if !settings.settle.is_zero() {
        if verbose {
            eprintln!(
                "Settling for {}s before scraping…",
                settings.settle.as_secs()
            );
        }
        tokio::time::sleep(settings.settle).await;
    }

    if verbose {
        let body = body_text(session).await;
        let snippet: String = body.chars().take(200).collect();
        eprintln!("Body snippet: {snippet}");
    }

    let features = extract(session, &settings.selector, settings.wait).await;
    let title = session.title().await?;
    Ok((features, title))
}

fn browser_from_cli(choice: BrowserChoice) -> Browser {
    match choice {
        BrowserChoice::Chromium => Browser::Chromium,
        BrowserChoice::Chrome => Browser::Chrome,
        BrowserChoice::Brave => Browser::Brave,
        BrowserChoice::Firefox => Browser::Firefox,
    }
}
