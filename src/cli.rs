use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fpscan")]
#[command(
    version,
    about = "Fingerprint probe - drive a browser through WebDriver and capture fingerprinting signals as JSON",
    long_about = "Fingerprint probe (fpscan)\n\nModes:\n- scan: open a target URL in a chosen browser with privacy/anti-fingerprinting launch profiles, scrape the rendered fingerprint feature list, and write a schema-normalized JSON report.\n- fields: print the canonical expected-field schema.\n\nA matching WebDriver process must be running (chromedriver for chrome/chromium/brave, geckodriver for firefox).\n\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML) to set defaults for selector/output/webdriver endpoints/timeouts; CLI flags override config"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe a URL and write the fingerprint report
    Scan {
        #[arg(long, value_enum, help = "Browser to use (chromium is an alias for chrome)")]
        browser: BrowserChoice,

        #[arg(long, help = "Target URL")]
        url: String,

        #[arg(long, help = "Run the browser headless (may change the fingerprint)")]
        headless: bool,

        #[arg(long, help = "Enable all available privacy settings")]
        privacy_max: bool,

        #[arg(long, help = "Enable incognito/private mode")]
        incognito: bool,

        #[arg(
            long = "extension",
            value_name = "PATH",
            help = "Path to a browser extension (.crx or .xpi). Can be repeated"
        )]
        extensions: Vec<PathBuf>,

        #[arg(
            long,
            value_name = "URL",
            help = "WebDriver endpoint (defaults to http://localhost:9515 for chromium-family, http://localhost:4444 for firefox)"
        )]
        webdriver_url: Option<String>,

        #[arg(long, short, value_name = "PATH", help = "Report output path")]
        output: Option<PathBuf>,

        #[arg(
            long,
            value_name = "CSS",
            help = "CSS selector for the rendered feature list"
        )]
        selector: Option<String>,

        #[arg(
            long,
            value_name = "SECONDS",
            help = "Bound on the feature-list readiness wait"
        )]
        wait_timeout: Option<u64>,

        #[arg(
            long,
            value_name = "SECONDS",
            help = "Fixed delay after navigation before scraping, for pages that compute slow signals"
        )]
        settle: Option<u64>,

        #[arg(long, help = "Navigate to the URL as-is, without a cache-busting query parameter")]
        no_cache_buster: bool,
    },

    /// Print the canonical expected-field schema, one name per line
    Fields,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum BrowserChoice {
    Chromium,
    Chrome,
    Brave,
    Firefox,
}

pub fn parse() -> Cli {
    Cli::parse()
}
