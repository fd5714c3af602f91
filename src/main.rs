// Entrypoint for the CLI.
// - Loads `.env`, parses flags/environment into a `Config`.
// - Runs the composer, then the uploader, and prints the hosted URL.
// Either phase failing prints the error chain and exits with status 1.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use banner_upload::cli::Cli;
use banner_upload::compose::compose;
use banner_upload::logging::init_subscriber;
use banner_upload::prompt::TerminalPrompt;
use banner_upload::upload::ImgbbClient;
use banner_upload::Config;

fn main() -> ExitCode {
    // `.env` is optional: the same values may come from the real environment.
    let dotenv_result = dotenv::dotenv();

    let cli = Cli::parse();
    if let Err(err) = init_subscriber(cli.debug) {
        eprintln!("failed to initialise logging: {err}");
    }
    if let Err(err) = dotenv_result {
        tracing::debug!(error = %err, "no .env loaded");
    }

    let config = cli.into_config();

    if let Err(err) = compose(&config, &mut TerminalPrompt).context("build banner") {
        eprintln!("{err:#}");
        return ExitCode::from(1);
    }

    match upload(&config) {
        Ok(url) => {
            println!("URL: {url}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(1)
        }
    }
}

fn upload(config: &Config) -> anyhow::Result<String> {
    let client = ImgbbClient::from_config(config)?;
    let url = client.upload(&config.output).context("upload banner")?;
    Ok(url)
}
