//! Command dispatch: bridges CLI args -> carrier operations -> output formatting.

pub mod account;
pub mod config_cmd;
pub mod rates;
pub mod track;
pub mod util;

use parcelgate_core::FedEx;

use crate::cli::{Command, GlobalOpts};
use crate::config::ActiveProfile;
use crate::error::CliError;

/// Dispatch a carrier-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    carrier: &FedEx,
    profile: &ActiveProfile,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Register(args) => account::register(carrier, profile, args, global).await,
        Command::Subscribe(args) => account::subscribe(carrier, profile, args, global).await,
        Command::VersionCapture(args) => account::capture_version(carrier, args, global).await,
        Command::Rates(args) => rates::handle(carrier, args, global).await,
        Command::Track(args) => track::handle(carrier, args, global).await,
        // Config is handled before a carrier is built
        Command::Config(_) => Err(CliError::Internal {
            message: "config commands do not reach the carrier".into(),
        }),
    }
}
