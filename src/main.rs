//! gist - upload local files to https://gist.github.com.
//!
//! Reads the files named on the command line, creates one public gist
//! holding them, and prints its URL.

mod cli;
mod logging;

use std::process::ExitCode;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use gist_config::Config;
use gist_config::auth::resolve_token;
use gist_config::env::process_env;
use gist_github::{GistClient, GistRequest};
use secrecy::SecretString;
use tracing::{Instrument, info, warn};

use crate::cli::Cli;
use crate::logging::Logger;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Nothing to upload: show usage before touching config or the network
    if cli.files.is_empty() {
        eprintln!("{}", Cli::command().render_help());
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(url) => {
            println!("{url}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<String> {
    let loaded = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    eprintln!("Using config file: {}", loaded.path.display());

    let logger = Logger::init(&loaded.config.log).context("failed to initialize logging")?;
    if let Some(path) = logger.file() {
        eprintln!("Using output log file: {}", path.display());
    }

    let _guard = logger.set_default();
    let result = upload(&cli, &loaded.config)
        .instrument(logger.root_span())
        .await;
    if let Err(err) = &result {
        tracing::error!(error = %format!("{err:#}"), "gist upload failed");
    }
    result
}

async fn upload(cli: &Cli, config: &Config) -> anyhow::Result<String> {
    let gist = GistRequest::from_paths(&cli.desc, &cli.files, cli.duplicate_policy())
        .context("failed to read input files")?;
    info!(
        files = gist.files.len(),
        description = %gist.description,
        "gist payload built"
    );

    let token = resolve_token(config.token(), process_env)
        .await
        .map(SecretString::from);
    if token.is_none() {
        warn!("no GitHub token found, sending unauthenticated request");
    }

    let client = GistClient::new(&config.api_url, token)?;
    let created = client.create(&gist).await.map_err(|err| {
        let context = match err.api_message() {
            Some(message) => format!("failed to create gist: {message}"),
            None => "failed to create gist".to_string(),
        };
        anyhow::Error::new(err).context(context)
    })?;

    info!(url = %created.html_url, "gist created successfully");
    Ok(created.html_url)
}
