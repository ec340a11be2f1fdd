mod cli;
mod commands;
mod formatting;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use commands::{run_fields, run_scan};

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}

async fn run() -> ExitCode {
    let args = cli::parse();

    match args.command {
        Commands::Scan {
            browser,
            url,
            headless,
            privacy_max,
            incognito,
            extensions,
            webdriver_url,
            output,
            selector,
            wait_timeout,
            settle,
            no_cache_buster,
        } => {
            run_scan(
                args.config,
                args.verbose,
                browser,
                url,
                headless,
                privacy_max,
                incognito,
                extensions,
                webdriver_url,
                output,
                selector,
                wait_timeout,
                settle,
                no_cache_buster,
            )
            .await
        }
        Commands::Fields => run_fields(),
    }
}
