//! bubblesum - Bubble Babble checksum tool

use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bubblesum::cli::{Cli, Command, LogLevel};
use bubblesum::commands::{self, CheckOptions};
use bubblesum::{CommandSource, Manifest, Verifier};

/// Exit status for usage errors and unreadable input.
const STATUS_ERROR: i32 = 2;

/// Logs go to stderr; `silent` turns them off entirely, even with RUST_LOG.
fn initialize_tracing(log_level: LogLevel, silent: bool) {
    let filter = if silent {
        EnvFilter::new("off")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(log_level.to_filter_directive()))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let silent = matches!(cli.command, Command::Check { status: true, .. });
    initialize_tracing(cli.log_level, silent);

    let status = match run(cli).await {
        Ok(status) => status,
        Err(e) => {
            eprintln!("bubblesum: {:#}", e);
            STATUS_ERROR
        }
    };

    std::process::exit(status);
}

async fn run(cli: Cli) -> Result<i32> {
    let verifier = Verifier::new(
        CommandSource::new(cli.source_config()),
        cli.verifier_config(),
    );
    tracing::debug!(
        "Using hasher {:?} with {} jobs",
        verifier.source().config().program,
        verifier.config().jobs
    );

    // stderr stays unlocked; tracing writes to it too
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut err = std::io::stderr();

    let status = match cli.command {
        Command::Hash { binary, files } => {
            commands::hash(&verifier, &files, binary, &mut out, &mut err).await?
        }
        Command::Check {
            quiet,
            status,
            format,
            manifest,
        } => {
            let parsed = Manifest::read(&manifest)
                .await
                .with_context(|| format!("cannot check {}", manifest.display()))?;
            let options = CheckOptions {
                quiet,
                status,
                format,
            };
            commands::check(&verifier, &parsed, options, &mut out, &mut err).await?
        }
        Command::Encode { hex } => commands::encode(&hex, &mut out)
            .with_context(|| format!("cannot encode {:?}", hex))?,
        Command::Decode { encoded } => commands::decode(&encoded, &mut out)
            .with_context(|| format!("cannot decode {:?}", encoded))?,
    };

    Ok(status)
}
