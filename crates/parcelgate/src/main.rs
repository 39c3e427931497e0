mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use parcelgate_core::FedEx;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a carrier
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        cmd => {
            let profile = config::resolve_profile(&cli.global)?;
            let carrier = FedEx::http(profile.carrier.clone())?;

            tracing::debug!(
                command = ?cmd,
                profile = %profile.name,
                test = carrier.is_test_mode(),
                "dispatching command"
            );
            commands::dispatch(cmd, &carrier, &profile, &cli.global).await
        }
    }
}
