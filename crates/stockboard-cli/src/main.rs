mod cli;
mod commands;
mod error;
mod metadata;
mod output;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let envelope = commands::run(&cli).await?;
    output::render(&envelope, cli.format, cli.pretty)?;

    if !envelope.errors.is_empty() {
        return Ok(ExitCode::from(3));
    }

    Ok(ExitCode::SUCCESS)
}

/// Diagnostics go to stderr so stdout stays parseable.
///
/// Called once from `run`; a second global subscriber would panic.
fn init_tracing(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// `--verbose` overrides `RUST_LOG`; otherwise warnings and above.
fn tracing_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_flag_enables_debug_output() {
        assert_eq!(tracing_filter(true).to_string(), "debug");
    }
}
